//! Builder for constructing Settings.

use super::{BuildOptions, NipkgConfig, Settings};
use crate::bundler::{
    error::{ErrorExt, Result},
    project::{self, ProjectKind},
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use nipkg_bundler::bundler::{BuildOptions, SettingsBuilder};
///
/// # fn example() -> nipkg_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root(".")
///     .options(BuildOptions {
///         name: Some("my-dashboard".into()),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    config: NipkgConfig,
    options: BuildOptions,
    project_kind: Option<Arc<dyn ProjectKind>>,
    timestamp: Option<u64>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// Default: current working directory
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the loaded configuration.
    ///
    /// Default: empty [`NipkgConfig`]
    pub fn config(mut self, config: NipkgConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets runtime overrides.
    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the project kind instead of detecting it.
    ///
    /// Default: detected from the project root
    pub fn project_kind(mut self, kind: Arc<dyn ProjectKind>) -> Self {
        self.project_kind = Some(kind);
        self
    }

    /// Pins the ar member timestamp.
    ///
    /// If not set, uses `SOURCE_DATE_EPOCH` when it holds a number, otherwise the current time.
    pub fn timestamp(mut self, seconds: u64) -> Self {
        self.timestamp = Some(seconds);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if no project root was given and the current directory
    /// cannot be determined.
    pub fn build(self) -> Result<Settings> {
        let project_root = match self.project_root {
            Some(root) => root,
            None => std::env::current_dir().fs_context("reading current directory", ".")?,
        };

        let project_kind = self
            .project_kind
            .unwrap_or_else(|| Arc::from(project::detect(&project_root)));

        let timestamp = self.timestamp.unwrap_or_else(|| {
            std::env::var("SOURCE_DATE_EPOCH")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or_else(|| chrono::Utc::now().timestamp().max(0) as u64)
        });

        Ok(Settings::new(
            project_root,
            self.config,
            self.options,
            project_kind,
            timestamp,
        ))
    }
}
