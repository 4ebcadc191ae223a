//! Infrastructure layer
//!
//! Process-level concerns shared by every front end:
//! - Configuration loading (figment)
//! - Structured logging (tracing)

pub mod config;
pub mod logging;
