//! reactive-people - person lookup through async containers
//!
//! A fixed, in-memory set of people exposed through two operations:
//! `get_by_id`, which answers with a single-value [`Mono`], and `find_all`,
//! which answers with a lazy multi-value [`Flux`].
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Reactive** (`reactive`): the `Mono`/`Flux` container contract
//! - **Domain Layer** (`domain`): records, dataset, repository port
//! - **Adapters** (`adapters`): in-memory repository implementations
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use reactive_people::{InMemoryPersonRepository, PersonId, PersonRepository};
//!
//! let repository = InMemoryPersonRepository::new();
//! let michael = repository.get_by_id(PersonId(1)).block().unwrap();
//! assert_eq!(michael.map(|p| p.first_name().to_string()), Some("Michael".to_string()));
//!
//! let missing = repository.get_by_id(PersonId(5)).block().unwrap();
//! assert!(missing.is_none());
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod reactive;

// Re-export commonly used types for convenience
pub use adapters::{InMemoryPersonRepository, NullableLookup};
pub use domain::models::{Config, Dataset, LoggingConfig, Person, PersonId, StreamingConfig};
pub use domain::ports::PersonRepository;
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use reactive::{Cardinality, Flux, Mono, ReactiveError, ReactiveResult, Signal, Subscription, Termination};
