//! reactive-people CLI entry point.

use anyhow::Result;
use clap::Parser;

use reactive_people::cli::{commands, handle_error, Cli, Commands};
use reactive_people::infrastructure::logging::{LogConfig, LoggerImpl};
use reactive_people::{Config, ConfigLoader, InMemoryPersonRepository};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config.as_deref(), cli.json).await {
        handle_error(err, cli.json);
    }
}

async fn run(command: Commands, config_path: Option<&std::path::Path>, json: bool) -> Result<()> {
    let config: Config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let repository = InMemoryPersonRepository::new();

    match command {
        Commands::Get(args) => commands::get::execute(args, &repository, json).await,
        Commands::List(args) => {
            commands::list::execute(args, &repository, config.streaming.channel_capacity, json).await
        }
        Commands::Find(args) => commands::find::execute(args, &repository, json).await,
    }
}
