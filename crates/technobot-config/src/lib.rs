//! Configuration schema and loading for TECHNOBOT.
//!
//! This crate owns the config model, JSON5 parsing, and validation used by
//! the server binary and by embedders.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Configuration schema models.
pub use model::*;
