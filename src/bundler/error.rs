//! Error types for the packaging pipeline.
//!
//! Every stage of the pipeline reports through [`Error`]. Filesystem failures carry the
//! operation and path that failed, external commands carry their exit code and captured
//! stderr, and configuration errors carry remediation text for the user.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving, staging and assembling a package.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Free-form error message.
    #[error("{0}")]
    GenericError(String),

    /// IO error without path context.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// IO error with the operation and path that failed.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// Operation being performed.
        context: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: io::Error,
    },

    /// JSON (de)serialization error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// Directory traversal error.
    #[error(transparent)]
    WalkdirError(#[from] walkdir::Error),

    /// Relative path computation error.
    #[error(transparent)]
    StripPrefixError(#[from] std::path::StripPrefixError),

    /// An external command could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that was attempted.
        command: String,
        /// Spawn error.
        #[source]
        error: io::Error,
    },

    /// An external command ran but exited unsuccessfully.
    #[error("`{command}` exited with {}{}", exit_code_text(.code), stderr_suffix(.stderr))]
    CommandExit {
        /// Command line that was run.
        command: String,
        /// Exit code, `None` if terminated by a signal.
        code: Option<i32>,
        /// Captured stderr (empty when output was streamed).
        stderr: String,
    },

    /// Missing or invalid configuration.
    #[error("{message}\n{remediation}")]
    Config {
        /// What is wrong.
        message: String,
        /// How to fix it, usually with an example config snippet.
        remediation: String,
    },

    /// Error wrapped with additional context.
    #[error("{context}: {source}")]
    Context {
        /// Context message.
        context: String,
        /// Wrapped error.
        source: Box<Error>,
    },
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl Error {
    /// Builds a configuration error.
    pub fn config(message: impl Into<String>, remediation: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            remediation: remediation.into(),
        }
    }
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps the error with the operation description and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attaches a context message to results and options.
pub trait Context<T> {
    /// Wraps the error (or a `None`) with the given message.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Like [`Context::context`], with a lazily built message.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: context.to_string(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: f().to_string(),
            source: Box::new(e.into()),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
