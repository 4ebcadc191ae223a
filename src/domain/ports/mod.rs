//! Port trait definitions (Hexagonal Architecture)
//!
//! - PersonRepository: lookup contract returning async containers
//!
//! Serving layers depend on these traits, never on a concrete adapter.

pub mod person_repository;

pub use person_repository::PersonRepository;
