//! Error types for the command line layer.
//!
//! Packaging failures arrive as [`crate::bundler::Error`] and are passed through
//! unchanged so configuration remediation text reaches the user intact.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, NipkgError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum NipkgError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Packaging pipeline errors
    #[error(transparent)]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
