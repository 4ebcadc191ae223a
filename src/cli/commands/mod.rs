//! CLI command implementations.

pub mod find;
pub mod get;
pub mod list;

pub use find::FindArgs;
pub use get::GetArgs;
pub use list::ListArgs;

use serde::Serialize;

use crate::cli::output::{CommandOutput, TableFormatter};
use crate::domain::models::Person;

/// A single person, or nothing when a lenient lookup found no match.
#[derive(Debug, Serialize)]
pub struct PersonOutput {
    pub found: bool,
    pub person: Option<Person>,
}

impl From<Option<Person>> for PersonOutput {
    fn from(person: Option<Person>) -> Self {
        Self {
            found: person.is_some(),
            person,
        }
    }
}

impl CommandOutput for PersonOutput {
    fn to_human(&self) -> String {
        match &self.person {
            Some(person) => TableFormatter::new().format_people(std::slice::from_ref(person)),
            None => "No matching person.".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonListOutput {
    pub people: Vec<Person>,
    pub total: usize,
}

impl CommandOutput for PersonListOutput {
    fn to_human(&self) -> String {
        if self.people.is_empty() {
            return "No people found.".to_string();
        }
        format!(
            "{}\n{} person(s)",
            TableFormatter::new().format_people(&self.people),
            self.total
        )
    }
}
