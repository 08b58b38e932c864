//! Unified error types for the GAT ecosystem
//!
//! [`GatError`] is the common error type at API boundaries. Model crates keep
//! their own structured error enums and convert into `GatError` when a caller
//! wants uniform handling.
//!
//! # Example
//!
//! ```ignore
//! use gat_core::{GatError, GatResult};
//!
//! fn prepare_feeder(path: &str) -> GatResult<()> {
//!     let settings = load_settings(path)?;
//!     init_transformers(&settings)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all GAT operations.
#[derive(Error, Debug)]
pub enum GatError {
    /// I/O errors (file access, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Solver/algorithm errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// Configuration errors (missing, mistyped or inconsistent configuration objects)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model construction errors (element cannot enter service)
    #[error("Model error: {0}")]
    Model(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using GatError.
pub type GatResult<T> = Result<T, GatError>;

impl From<anyhow::Error> for GatError {
    fn from(err: anyhow::Error) -> Self {
        GatError::Other(err.to_string())
    }
}

impl From<String> for GatError {
    fn from(s: String) -> Self {
        GatError::Other(s)
    }
}

impl From<&str> for GatError {
    fn from(s: &str) -> Self {
        GatError::Other(s.to_string())
    }
}

// TOML configuration files
impl From<toml::de::Error> for GatError {
    fn from(err: toml::de::Error) -> Self {
        GatError::Parse(err.to_string())
    }
}
