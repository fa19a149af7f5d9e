//! NI package bundler for web application build output
//!
//! This library packages the build output of Node.js and Angular projects as `.nipkg`
//! files: Debian-style ar archives holding `debian-binary`, `control.tar.gz` and
//! `data.tar.gz`.
//!
//! It can be used both as a CLI tool (`nipkg`) and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, NipkgError, Result};
