//! Errors carried in the error state of a container.

use std::fmt;

use thiserror::Error;

/// How many elements a strict reduction actually found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// The sequence completed without emitting anything.
    None,
    /// The sequence emitted a second element.
    Many,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "no elements"),
            Self::Many => write!(f, "more than one element"),
        }
    }
}

/// Terminal error of a [`Mono`](super::Mono) or [`Flux`](super::Flux).
///
/// Errors are cloned to every observer of a shared evaluation, so payloads
/// are kept as rendered strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactiveError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Expected exactly one element, found {0}")]
    AmbiguousOrEmpty(Cardinality),

    #[error("Transform failed: {0}")]
    TransformFailure(String),

    #[error("Blocking call inside an async runtime context; await the container instead")]
    BlockingInAsyncContext,

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl ReactiveError {
    /// Wrap a failure raised by a user supplied transform or predicate.
    pub fn transform(err: impl fmt::Display) -> Self {
        Self::TransformFailure(err.to_string())
    }

    /// Wrap a failure produced by a source outside this crate.
    pub fn upstream(err: impl fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }

    /// Whether this error came from a strict single-element reduction.
    pub const fn is_ambiguous_or_empty(&self) -> bool {
        matches!(self, Self::AmbiguousOrEmpty(_))
    }
}

pub type ReactiveResult<T> = Result<T, ReactiveError>;
