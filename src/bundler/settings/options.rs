//! Per-invocation runtime overrides.

use std::path::PathBuf;

/// Which serializer produces the package container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PackagerKind {
    /// Write the ar/tar.gz container directly.
    #[default]
    Direct,
    /// Delegate to the `dpkg-deb` executable.
    DpkgDeb,
}

/// Runtime options for one `build` invocation.
///
/// Metadata fields override the config file and package.json. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Run the application build command before packaging.
    pub run_build: bool,

    /// Build configuration passed to the project kind (e.g. "production").
    pub configuration: Option<String>,

    /// Stream build output and log at debug level.
    pub verbose: bool,

    /// Keep previous packages and staging files.
    pub skip_cleanup: bool,

    /// Filename suffix, overrides `buildSuffix`.
    pub build_suffix: Option<String>,

    /// Build output directory, overrides `buildDir`.
    pub build_dir: Option<PathBuf>,

    /// Output root, overrides `outputDir`.
    pub output_dir: Option<PathBuf>,

    /// Package name override.
    pub name: Option<String>,

    /// Version override.
    pub version: Option<String>,

    /// Description override.
    pub description: Option<String>,

    /// Maintainer override.
    pub maintainer: Option<String>,

    /// Architecture override.
    pub architecture: Option<String>,

    /// Display name override.
    pub display_name: Option<String>,

    /// Visibility override.
    pub user_visible: Option<bool>,

    /// Dependency list override.
    pub depends: Option<Vec<String>>,

    /// Container serializer.
    pub packager: PackagerKind,
}
