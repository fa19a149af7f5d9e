//! Configuration structures for packaging operations.
//!
//! This module provides the package metadata model, the `nipkg.config.json` schema,
//! per-invocation runtime options and the [`Settings`] type that combines them.

mod builder;
mod config;
mod core;
mod options;
mod package;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use config::{CONFIG_FILE_NAME, NipkgConfig};
pub use core::{DEFAULT_OUTPUT_DIR, NIPKG_DIR, Settings};
pub use options::{BuildOptions, PackagerKind};
pub(crate) use package::is_filesystem_safe;
pub use package::{DEFAULT_ARCHITECTURE, DEFAULT_MAINTAINER, DEFAULT_VERSION, PackageMetadata};
