//! Package orchestration.
//!
//! This module provides the [`Bundler`] orchestrator and the collaborators it drives.
//!
//! - [`checksum`] - SHA-256 of the finished package
//! - [`orchestrator`] - the [`Bundler`] pipeline
//! - [`runner`] - the application build step ([`CommandRunner`], [`ShellRunner`])
//! - [`tool_detection`] - `dpkg-deb` lookup

pub mod checksum;
mod orchestrator;
pub mod runner;
pub mod tool_detection;

pub use orchestrator::Bundler;
pub use runner::{CommandRunner, ShellRunner};

use crate::bundler::PackageMetadata;
use std::path::PathBuf;

/// A package written by [`Bundler::bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledArtifact {
    /// Path of the `.nipkg` file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 of the file.
    pub checksum: String,
    /// Metadata the package was built with.
    pub metadata: PackageMetadata,
}
