//! Person domain model.
//!
//! A person is identified by its `id` alone: two records with the same id are
//! the same person whatever their names say.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::str::FromStr;

use crate::domain::errors::{DomainError, DomainResult};

/// Identity of a [`Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i32);

impl PersonId {
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for PersonId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl FromStr for PersonId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable person record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Person {
    id: PersonId,
    first_name: String,
    last_name: String,
}

impl Person {
    pub fn new(
        id: impl Into<PersonId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// A record carrying only its identity, with empty names.
    ///
    /// Compares equal to any full record with the same id.
    pub fn with_id(id: impl Into<PersonId>) -> Self {
        Self::new(id, String::new(), String::new())
    }

    pub fn builder() -> PersonBuilder {
        PersonBuilder::default()
    }

    pub const fn id(&self) -> PersonId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, _) => self.last_name.clone(),
        }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.full_name())
    }
}

/// Step-by-step construction of a [`Person`]; names default to empty.
#[derive(Debug, Clone, Default)]
pub struct PersonBuilder {
    id: Option<PersonId>,
    first_name: String,
    last_name: String,
}

impl PersonBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<PersonId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    /// Finish the record. The id is the only required field.
    pub fn build(self) -> DomainResult<Person> {
        let id = self
            .id
            .ok_or_else(|| DomainError::ValidationFailed("person id is required".to_string()))?;
        Ok(Person {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
        })
    }
}
