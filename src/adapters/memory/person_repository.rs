//! In-memory implementation of the PersonRepository port.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::models::{Dataset, Person, PersonId};
use crate::domain::ports::PersonRepository;
use crate::reactive::{Flux, Mono};

/// Person repository backed by an immutable [`Dataset`].
///
/// The dataset is shared read-only, so any number of lookups and sequence
/// observers can run concurrently without locking.
#[derive(Debug, Clone)]
pub struct InMemoryPersonRepository {
    dataset: Arc<Dataset>,
}

impl InMemoryPersonRepository {
    /// Create a repository over the seed dataset.
    pub fn new() -> Self {
        Self::with_dataset(Dataset::seed())
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub(crate) fn shared_dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }
}

impl Default for InMemoryPersonRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonRepository for InMemoryPersonRepository {
    #[instrument(skip(self), fields(id = %id))]
    fn get_by_id(&self, id: PersonId) -> Mono<Person> {
        match self.dataset.get(id) {
            Some(person) => Mono::just(person.clone()),
            None => {
                debug!("person not found");
                Mono::empty()
            }
        }
    }

    #[instrument(skip(self), fields(count = self.dataset.len()))]
    fn find_all(&self) -> Flux<Person> {
        Flux::from_shared(self.dataset.records())
    }
}
