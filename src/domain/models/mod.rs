pub mod config;
pub mod dataset;
pub mod person;

pub use config::{Config, LoggingConfig, StreamingConfig};
pub use dataset::Dataset;
pub use person::{Person, PersonBuilder, PersonId};
