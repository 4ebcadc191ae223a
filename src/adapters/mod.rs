//! Adapters implementing domain ports.

pub mod memory;

pub use memory::{InMemoryPersonRepository, NullableLookup};
