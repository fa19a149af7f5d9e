//! Packaging core.
//!
//! Turns the build output of a Node or Angular project into a `.nipkg` package:
//! settings and metadata resolution, staging, control file generation and ar/tar
//! archive assembly.
//!
//! # Example
//!
//! ```no_run
//! use nipkg_bundler::bundler::{BuildOptions, Bundler, NipkgConfig, SettingsBuilder};
//!
//! # async fn example() -> nipkg_bundler::bundler::Result<()> {
//! let config = NipkgConfig::load("nipkg.config.json".as_ref()).await?;
//! let settings = SettingsBuilder::new()
//!     .config(config)
//!     .options(BuildOptions {
//!         run_build: true,
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let artifact = Bundler::new(settings)?.bundle().await?;
//! println!("{}", artifact.path.display());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod project;
pub mod settings;
pub mod utils;

pub use builder::{BundledArtifact, Bundler, CommandRunner, ShellRunner};
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::nipkg::{PackageRequest, Packager};
pub(crate) use settings::is_filesystem_safe;
pub use settings::{
    BuildOptions, CONFIG_FILE_NAME, DEFAULT_ARCHITECTURE, DEFAULT_MAINTAINER, DEFAULT_OUTPUT_DIR,
    DEFAULT_VERSION, NIPKG_DIR, NipkgConfig, PackageMetadata, PackagerKind, Settings,
    SettingsBuilder,
};
