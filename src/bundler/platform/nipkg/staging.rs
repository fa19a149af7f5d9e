//! On-disk staging tree for a package.
//!
//! ```text
//! <nipkg dir>/file-package/
//! ├── control/
//! │   └── control
//! └── data/
//!     └── ApplicationFiles_64/
//!         └── <build output>
//! ```

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Staging directory name inside the nipkg output directory.
pub const STAGING_DIR: &str = "file-package";

/// Control subtree name.
pub const CONTROL_DIR: &str = "control";

/// Data subtree name.
pub const DATA_DIR: &str = "data";

/// Fixed payload directory inside the data subtree.
pub const PAYLOAD_DIR: &str = "ApplicationFiles_64";

/// Control file name inside the control subtree.
pub const CONTROL_FILE: &str = "control";

/// Paths of a staging tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingLayout {
    root: PathBuf,
}

impl StagingLayout {
    /// Layout rooted at `<output_root>/file-package`.
    pub fn new(output_root: &Path) -> Self {
        Self {
            root: output_root.join(STAGING_DIR),
        }
    }

    /// Staging root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory archived as control.tar.gz.
    pub fn control_dir(&self) -> PathBuf {
        self.root.join(CONTROL_DIR)
    }

    /// The control file.
    pub fn control_file(&self) -> PathBuf {
        self.control_dir().join(CONTROL_FILE)
    }

    /// Directory archived as data.tar.gz.
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// Directory receiving the application files.
    pub fn payload_dir(&self) -> PathBuf {
        self.data_dir().join(PAYLOAD_DIR)
    }

    /// Fails unless both archived subtrees exist.
    pub fn verify(&self) -> Result<()> {
        for dir in [self.control_dir(), self.data_dir()] {
            if !dir.is_dir() {
                return Err(Error::GenericError(format!(
                    "Staging directory is incomplete: {} is missing",
                    dir.display()
                )));
            }
        }
        if !self.control_file().is_file() {
            return Err(Error::GenericError(format!(
                "Staging directory is incomplete: {} is missing",
                self.control_file().display()
            )));
        }
        Ok(())
    }

    /// Writes the control file.
    pub async fn write_control_file(&self, contents: &str) -> Result<()> {
        let path = self.control_file();
        tokio::fs::write(&path, contents)
            .await
            .fs_context("writing control file", &path)
    }
}

/// Creates a fresh staging tree under `output_root` and copies `build_output` into it.
///
/// A previous staging tree is removed first unless `preserve_existing` is set. The whole
/// build output is copied every time, overwriting files with the same relative path.
///
/// # Errors
///
/// A missing build output directory is a configuration error that names the
/// `buildDir` key with an example value.
pub async fn prepare_staging(
    output_root: &Path,
    build_output: &Path,
    preserve_existing: bool,
) -> Result<StagingLayout> {
    if !build_output.is_dir() {
        return Err(Error::config(
            format!("Build directory not found: {}", build_output.display()),
            "Run your build command first or use --build flag, and check \"buildDir\" in nipkg.config.json, for example:\n  \"buildDir\": \"dist/my-app/browser\"",
        ));
    }

    fs::create_dir_all(output_root, false).await?;

    let layout = StagingLayout::new(output_root);
    if !preserve_existing {
        fs::remove_dir_all(layout.root()).await?;
    }

    fs::create_dir_all(&layout.payload_dir(), false).await?;
    fs::create_dir_all(&layout.control_dir(), false).await?;

    log::info!("📋 Copying build files from {}", build_output.display());
    let copied = fs::copy_dir(build_output, &layout.payload_dir(), Some(output_root)).await?;
    log::info!("✅ Copied {} build files", copied);

    Ok(layout)
}
