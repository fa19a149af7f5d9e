//! Command line argument parsing and validation.
//!
//! This module provides the clap argument surface for the `build` and `init`
//! subcommands and the conversion into runtime [`BuildOptions`].

use crate::{
    bundler::{BuildOptions, PackagerKind},
    error::CliError,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// NI package bundler for web applications
#[derive(Parser, Debug)]
#[command(
    name = "nipkg",
    version,
    about = "Packages web application build output as NI packages (.nipkg)",
    long_about = "Packages the build output of a Node.js or Angular project as a .nipkg file.

Metadata is resolved from command line overrides, then nipkg.config.json, then package.json,
then built-in defaults.

Usage:
  nipkg init
  nipkg build --build --configuration production
  nipkg build --build-dir dist/my-app/browser --version 2.0.0

Exit code 0 = package guaranteed to exist under <outputDir>/nipkg/."
)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a .nipkg package from the application's build output
    Build(BuildArgs),

    /// Write a default nipkg.config.json for this project
    Init,
}

/// Archive serializer selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PackagerArg {
    /// Write the ar and tar.gz container in-process
    #[default]
    Direct,
    /// Delegate to the system dpkg-deb tool
    DpkgDeb,
}

impl From<PackagerArg> for PackagerKind {
    fn from(arg: PackagerArg) -> Self {
        match arg {
            PackagerArg::Direct => PackagerKind::Direct,
            PackagerArg::DpkgDeb => PackagerKind::DpkgDeb,
        }
    }
}

/// Arguments of `nipkg build`
#[derive(clap::Args, Debug, Default)]
pub struct BuildArgs {
    /// Build configuration passed to the application build (e.g. production)
    #[arg(short, long, value_name = "NAME")]
    pub configuration: Option<String>,

    /// Run the application build command before packaging
    #[arg(short, long)]
    pub build: bool,

    /// Show build output and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep previous packages and staging files
    #[arg(long)]
    pub skip_cleanup: bool,

    /// Extra segment inserted into the package filename before the architecture
    #[arg(long, value_name = "SUFFIX")]
    pub build_suffix: Option<String>,

    /// Path of the configuration file [default: ./nipkg.config.json]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the application build output
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Package name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Package version
    #[arg(long = "version", value_name = "VERSION")]
    pub package_version: Option<String>,

    /// Package description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Package maintainer, conventionally "Name <email>"
    #[arg(long, value_name = "MAINTAINER")]
    pub maintainer: Option<String>,

    /// Package architecture tag (e.g. all, windows_x64)
    #[arg(long, value_name = "ARCH")]
    pub architecture: Option<String>,

    /// Display name shown by package managers
    #[arg(long, value_name = "NAME")]
    pub display_name: Option<String>,

    /// Comma-separated package dependencies
    #[arg(long, value_name = "PACKAGES", value_delimiter = ',')]
    pub depends: Option<Vec<String>>,

    /// Whether the package is visible to users
    #[arg(long, value_name = "BOOL")]
    pub user_visible: Option<bool>,

    /// Output root; packages are written to <DIR>/nipkg
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Archive serializer
    #[arg(long, value_enum, default_value = "direct")]
    pub packager: PackagerArg,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether debug logging was requested
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Build(build) => build.verbose,
            Command::Init => false,
        }
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        let Command::Build(build) = &self.command else {
            return Ok(());
        };

        for (flag, value) in [
            ("--name", &build.name),
            ("--version", &build.package_version),
            ("--architecture", &build.architecture),
            ("--build-suffix", &build.build_suffix),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(CliError::InvalidArguments {
                    reason: format!("{flag} cannot be empty"),
                });
            }
        }

        Ok(())
    }
}

impl From<&BuildArgs> for BuildOptions {
    fn from(args: &BuildArgs) -> Self {
        Self {
            run_build: args.build,
            configuration: args.configuration.clone(),
            verbose: args.verbose,
            skip_cleanup: args.skip_cleanup,
            build_suffix: args.build_suffix.clone(),
            build_dir: args.build_dir.clone(),
            output_dir: args.output_dir.clone(),
            name: args.name.clone(),
            version: args.package_version.clone(),
            description: args.description.clone(),
            maintainer: args.maintainer.clone(),
            architecture: args.architecture.clone(),
            display_name: args.display_name.clone(),
            user_visible: args.user_visible,
            depends: args.depends.clone(),
            packager: args.packager.into(),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose(), false),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("nipkg").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn build_flags_map_to_options() {
        let args = parse(&[
            "build",
            "-c",
            "production",
            "-b",
            "-v",
            "--skip-cleanup",
            "--build-suffix",
            "beta",
            "--version",
            "2.0.0",
            "--depends",
            "ni-runtime,ni-web",
            "--user-visible",
            "false",
            "--packager",
            "dpkg-deb",
        ]);
        let Command::Build(build) = &args.command else {
            panic!("expected build");
        };

        let options = BuildOptions::from(build);
        assert!(options.run_build);
        assert!(options.verbose);
        assert!(options.skip_cleanup);
        assert_eq!(options.configuration.as_deref(), Some("production"));
        assert_eq!(options.build_suffix.as_deref(), Some("beta"));
        assert_eq!(options.version.as_deref(), Some("2.0.0"));
        assert_eq!(
            options.depends,
            Some(vec!["ni-runtime".to_string(), "ni-web".to_string()])
        );
        assert_eq!(options.user_visible, Some(false));
        assert_eq!(options.packager, PackagerKind::DpkgDeb);
        assert!(args.verbose());
    }

    #[test]
    fn build_defaults() {
        let args = parse(&["build"]);
        let Command::Build(build) = &args.command else {
            panic!("expected build");
        };
        let options = BuildOptions::from(build);
        assert!(!options.run_build);
        assert_eq!(options.packager, PackagerKind::Direct);
        assert!(options.user_visible.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn init_takes_no_flags() {
        assert!(matches!(parse(&["init"]).command, Command::Init));
        assert!(Args::try_parse_from(["nipkg", "init", "--verbose"]).is_err());
    }

    #[test]
    fn empty_name_is_rejected() {
        let args = parse(&["build", "--name", " "]);
        assert!(args.validate().is_err());
    }
}
