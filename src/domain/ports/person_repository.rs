//! Person repository port.

use crate::domain::models::{Person, PersonId};
use crate::reactive::{Flux, Mono};

/// Read-only lookup over a fixed set of people.
///
/// Both operations return immediately; the containers are driven by the
/// caller. A missing id is reported as an empty [`Mono`], never as an
/// error and never as a substituted record.
pub trait PersonRepository: Send + Sync {
    /// Get a person by ID.
    fn get_by_id(&self, id: PersonId) -> Mono<Person>;

    /// All people in dataset insertion order.
    fn find_all(&self) -> Flux<Person>;
}
