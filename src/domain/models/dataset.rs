//! Fixed, insertion-ordered collection of people.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::person::{Person, PersonId};
use crate::domain::errors::{DomainError, DomainResult};

/// Immutable id -> person mapping that remembers insertion order.
///
/// Built once and never mutated. The record slice is reference counted so
/// sequences over it can outlive the borrow that created them.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Person]>,
    index: HashMap<PersonId, usize>,
}

impl Dataset {
    /// Build a dataset, rejecting repeated ids.
    pub fn from_records<I>(records: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = Person>,
    {
        let records: Vec<Person> = records.into_iter().collect();
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(duplicate) = records.iter().find(|person| !seen.insert(person.id())) {
            return Err(DomainError::DuplicateId(duplicate.id()));
        }

        Ok(Self::from_unique(records.into()))
    }

    /// The four people every lookup service instance starts with.
    pub fn seed() -> Self {
        Self::from_unique(Arc::new([
            Person::new(1, "Michael", "Weston"),
            Person::new(2, "Fiona", "Glenanne"),
            Person::new(3, "Sam", "Axe"),
            Person::new(4, "Jesse", "Porter"),
        ]))
    }

    /// Index `records`, whose ids must already be distinct.
    fn from_unique(records: Arc<[Person]>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, person)| (person.id(), position))
            .collect();

        Self { records, index }
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Shared handle to the records in insertion order.
    pub fn records(&self) -> Arc<[Person]> {
        Arc::clone(&self.records)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.records.iter().map(Person::id)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::seed()
    }
}
