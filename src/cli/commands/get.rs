//! `get` command: single lookup by ID.

use anyhow::{Context, Result};
use clap::Args;

use super::PersonOutput;
use crate::cli::output::output;
use crate::domain::models::PersonId;
use crate::domain::ports::PersonRepository;
use crate::reactive::{Mono, ReactiveError};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Person ID
    #[arg(allow_negative_numbers = true)]
    pub id: PersonId,
}

pub async fn execute(args: GetArgs, repository: &dyn PersonRepository, json_mode: bool) -> Result<()> {
    let not_found = ReactiveError::NotFound(format!("no person with id {}", args.id));
    let person = repository
        .get_by_id(args.id)
        .switch_if_empty(Mono::error(not_found))
        .await
        .with_context(|| format!("Lookup of person {} failed", args.id))?;

    output(&PersonOutput::from(person), json_mode);
    Ok(())
}
