//! Command-line front end over the person repository.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{FindArgs, GetArgs, ListArgs};

#[derive(Parser, Debug)]
#[command(name = "reactive-people")]
#[command(about = "Look up people through Mono/Flux style containers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .reactive-people/
    #[arg(short, long, global = true, env = "REACTIVE_PEOPLE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one person by ID
    Get(GetArgs),
    /// List every person in dataset order
    List(ListArgs),
    /// Filter all people and reduce to one match
    Find(FindArgs),
}

/// Print a command error and exit with a failure status.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
