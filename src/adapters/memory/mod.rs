//! In-memory adapters over a fixed [`Dataset`](crate::domain::models::Dataset).
//!
//! - `InMemoryPersonRepository`: the repository port; misses are empty
//! - `NullableLookup`: legacy contract where a miss yields no container

pub mod nullable_lookup;
pub mod person_repository;

pub use nullable_lookup::NullableLookup;
pub use person_repository::InMemoryPersonRepository;
