//! NI package (`.nipkg`) creation.
//!
//! A `.nipkg` is a Debian-style ar archive. This module renders the control file,
//! lays out the staging tree and turns that tree into a package file through one of
//! two [`Packager`] strategies:
//!
//! - [`DirectPackager`] builds the tarballs and the ar container in-process
//! - [`DpkgDebPackager`] hands the staging tree to the `dpkg-deb` executable
//!
//! Both write a `.deb` file at the requested target path. Renaming it to `.nipkg` is
//! the orchestrator's job.

mod archive;
mod control;
mod delegate;
mod staging;

pub use archive::{
    ArchiveMember, CONTROL_MEMBER, DATA_MEMBER, DEBIAN_BINARY, DEBIAN_BINARY_MEMBER,
    DirectPackager, MEMBER_MODE, package_members, tar_gz_directory, write_ar,
};
pub use control::{PLUGIN, generate_control_file};
pub use delegate::{DEBIAN_DIR, DpkgDebPackager, dpkg_control};
pub use staging::{
    CONTROL_DIR, CONTROL_FILE, DATA_DIR, PAYLOAD_DIR, STAGING_DIR, StagingLayout, prepare_staging,
};

use crate::bundler::{PackageMetadata, Result};
use std::path::Path;

/// Extension of the intermediate archive written by a [`Packager`].
pub const DEB_EXTENSION: &str = "deb";

/// Extension of the final package.
pub const NIPKG_EXTENSION: &str = "nipkg";

/// Everything a [`Packager`] needs to write one package.
#[derive(Debug, Clone, Copy)]
pub struct PackageRequest<'a> {
    /// Resolved package metadata.
    pub metadata: &'a PackageMetadata,
    /// Rendered control file, already written to the staging tree.
    pub control: &'a str,
    /// Verified staging tree.
    pub staging: &'a StagingLayout,
    /// Path of the `.deb` file to create.
    pub target: &'a Path,
    /// Modification time for archive members, seconds since the epoch.
    pub timestamp: u64,
}

/// Turns a staging tree into a Debian-format archive.
///
/// Implementations are synchronous and may block; callers run them on a blocking
/// thread.
pub trait Packager: std::fmt::Debug + Send + Sync {
    /// Short strategy name for log output.
    fn name(&self) -> &'static str;

    /// Writes the archive for `request` to `request.target`.
    fn package(&self, request: &PackageRequest<'_>) -> Result<()>;
}
