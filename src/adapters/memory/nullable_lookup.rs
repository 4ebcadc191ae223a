//! Lookup honoring the legacy "no container on miss" contract.
//!
//! Older callers were written against a lookup that handed back no container
//! at all for an unknown id. This adapter keeps that contract for them as a
//! separate type; [`InMemoryPersonRepository`] itself always answers a miss
//! with an empty container. Use [`Mono::or_empty`] to bring a result back to
//! the empty-container form.

use std::sync::Arc;

use tracing::debug;

use super::person_repository::InMemoryPersonRepository;
use crate::domain::models::{Dataset, Person, PersonId};
use crate::reactive::Mono;

#[derive(Debug, Clone)]
pub struct NullableLookup {
    dataset: Arc<Dataset>,
}

impl NullableLookup {
    /// Share the dataset of an existing repository.
    pub fn new(repository: &InMemoryPersonRepository) -> Self {
        Self {
            dataset: repository.shared_dataset(),
        }
    }

    /// `Some` present container on a hit, `None` on a miss.
    pub fn get_by_id(&self, id: PersonId) -> Option<Mono<Person>> {
        let found = self.dataset.get(id).cloned().map(Mono::just);
        if found.is_none() {
            debug!(id = %id, "person not found, returning no container");
        }
        found
    }
}
