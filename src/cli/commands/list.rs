//! `list` command: drain `find_all` through a channel.

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::PersonListOutput;
use crate::cli::output::output;
use crate::domain::ports::PersonRepository;
use crate::reactive::Signal;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show at most this many people
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn execute(
    args: ListArgs,
    repository: &dyn PersonRepository,
    channel_capacity: usize,
    json_mode: bool,
) -> Result<()> {
    let mut all = repository.find_all();
    if let Some(limit) = args.limit {
        all = all.take(limit);
    }

    let mut rx = all.to_channel(channel_capacity);
    let mut people = Vec::new();
    while let Some(signal) = rx.recv().await {
        match signal {
            Signal::Next(person) => people.push(person),
            Signal::Error(err) => return Err(err.into()),
            Signal::Complete => break,
        }
    }
    debug!(count = people.len(), "listing complete");

    let total = people.len();
    output(&PersonListOutput { people, total }, json_mode);
    Ok(())
}
