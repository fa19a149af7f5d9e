//! Core Settings struct and implementations.

use super::{BuildOptions, NipkgConfig};
use crate::bundler::{error::Result, project::ProjectKind};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Output root used when neither CLI nor config name one.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Subdirectory of the output root that receives packages.
pub const NIPKG_DIR: &str = "nipkg";

/// Main settings for one packaging run.
///
/// Combines the loaded config file, runtime overrides and the detected project kind.
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use nipkg_bundler::bundler::{BuildOptions, NipkgConfig, SettingsBuilder};
///
/// # fn example() -> nipkg_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/work/my-dashboard")
///     .config(NipkgConfig {
///         build_dir: Some("build".into()),
///         ..Default::default()
///     })
///     .options(BuildOptions::default())
///     .build()?;
/// assert!(settings.nipkg_directory().ends_with("dist/nipkg"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory containing package.json / angular.json.
    project_root: PathBuf,

    /// Contents of `nipkg.config.json` (empty if absent).
    config: NipkgConfig,

    /// Runtime overrides.
    options: BuildOptions,

    /// Project kind used for validation and build output discovery.
    project_kind: Arc<dyn ProjectKind>,

    /// ar member modification time, seconds since the epoch.
    timestamp: u64,
}

impl Settings {
    /// Returns the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &NipkgConfig {
        &self.config
    }

    /// Returns the runtime options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Returns the project kind.
    pub fn project_kind(&self) -> &dyn ProjectKind {
        self.project_kind.as_ref()
    }

    /// Returns the ar member timestamp.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the output root.
    ///
    /// CLI `--output-dir`, then config `outputDir`, then `<project>/dist`.
    pub fn output_root(&self) -> PathBuf {
        let configured = self
            .options
            .output_dir
            .clone()
            .or_else(|| non_empty(&self.config.output_dir).map(PathBuf::from));

        match configured {
            Some(dir) => self.project_path(dir),
            None => self.project_root.join(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Returns the directory packages are written to.
    pub fn nipkg_directory(&self) -> PathBuf {
        self.output_root().join(NIPKG_DIR)
    }

    /// Returns the filename build suffix, CLI before config.
    pub fn build_suffix(&self) -> Option<&str> {
        non_empty(&self.options.build_suffix).or_else(|| non_empty(&self.config.build_suffix))
    }

    /// Returns the application build command.
    pub fn build_command(&self) -> String {
        match non_empty(&self.config.build_command) {
            Some(command) => command.to_string(),
            None => self
                .project_kind
                .default_build_command(self.options.configuration.as_deref()),
        }
    }

    /// Returns the application build output directory.
    ///
    /// CLI `--build-dir`, then config `buildDir`, then whatever the project kind can
    /// discover. Relative paths are resolved against the project root. Existence is
    /// checked later, during staging.
    pub fn build_output_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.options.build_dir {
            return Ok(self.project_path(dir.clone()));
        }
        if let Some(dir) = non_empty(&self.config.build_dir) {
            return Ok(self.project_path(PathBuf::from(dir)));
        }
        let dir = self
            .project_kind
            .locate_build_output(&self.project_root, &self.config)?;
        Ok(self.project_path(dir))
    }

    fn project_path(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.project_root.join(path)
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        project_root: PathBuf,
        config: NipkgConfig,
        options: BuildOptions,
        project_kind: Arc<dyn ProjectKind>,
        timestamp: u64,
    ) -> Self {
        Self {
            project_root,
            config,
            options,
            project_kind,
            timestamp,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
