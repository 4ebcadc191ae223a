//! `find` command: filter `find_all`, then reduce leniently or strictly.

use anyhow::{Context, Result};
use clap::Args;

use super::PersonOutput;
use crate::cli::output::output;
use crate::domain::models::PersonId;
use crate::domain::ports::PersonRepository;

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Match this ID
    #[arg(long, allow_negative_numbers = true)]
    pub id: Option<PersonId>,

    /// Match this last name (case-insensitive)
    #[arg(long)]
    pub last_name: Option<String>,

    /// Fail unless exactly one person matches
    #[arg(long)]
    pub strict: bool,
}

impl FindArgs {
    fn matches(&self, id: PersonId, last_name: &str) -> bool {
        self.id.map_or(true, |wanted| wanted == id)
            && self
                .last_name
                .as_deref()
                .map_or(true, |wanted| wanted.eq_ignore_ascii_case(last_name))
    }
}

pub async fn execute(args: FindArgs, repository: &dyn PersonRepository, json_mode: bool) -> Result<()> {
    let strict = args.strict;
    let matching = repository
        .find_all()
        .filter(move |person| args.matches(person.id(), person.last_name()));

    let person = if strict {
        matching.single().await.context("Expected exactly one matching person")?
    } else {
        matching.next().await?
    };

    output(&PersonOutput::from(person), json_mode);
    Ok(())
}
