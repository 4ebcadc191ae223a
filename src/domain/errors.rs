//! Domain errors for the person lookup service.

use thiserror::Error;

use crate::domain::models::PersonId;

/// Domain-level errors raised while building records and datasets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Duplicate person id in dataset: {0}")]
    DuplicateId(PersonId),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
