//! Domain layer for the person lookup service
//!
//! This module contains the record types, the fixed dataset, and the
//! repository port consumed by serving layers.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
