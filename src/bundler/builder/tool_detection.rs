//! External tool detection.
//!
//! Only the `dpkg-deb` packaging strategy needs an external tool. Lookup happens once
//! per process.

use crate::bundler::error::{Error, Result};
use std::{path::PathBuf, sync::LazyLock};

/// Location of `dpkg-deb`, if it is on `PATH` and answers `--version`.
pub static DPKG_DEB: LazyLock<Option<PathBuf>> = LazyLock::new(|| match which::which("dpkg-deb") {
    Ok(path) => {
        log::debug!("Found dpkg-deb at: {}", path.display());

        match std::process::Command::new(&path).arg("--version").output() {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                log::debug!(
                    "✓ dpkg-deb available: {}",
                    version.lines().next().unwrap_or_default().trim()
                );
                Some(path)
            }
            Ok(output) => {
                log::warn!(
                    "dpkg-deb found at {} but --version check failed (exit code: {:?}). \
                         Stderr: {}",
                    path.display(),
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr)
                );
                None
            }
            Err(e) => {
                log::warn!(
                    "dpkg-deb found at {} but failed to execute: {}. \
                         Check file permissions.",
                    path.display(),
                    e
                );
                None
            }
        }
    }
    Err(e) => {
        log::debug!("dpkg-deb not found in PATH: {}", e);
        None
    }
});

/// Returns the `dpkg-deb` path or a configuration error explaining the alternative.
pub fn require_dpkg_deb() -> Result<PathBuf> {
    (*DPKG_DEB).clone().ok_or_else(|| {
        Error::config(
            "dpkg-deb was not found on PATH",
            "Install dpkg (for example `apt install dpkg`), or build with the in-process \
             packager:\n  nipkg build --packager direct",
        )
    })
}
