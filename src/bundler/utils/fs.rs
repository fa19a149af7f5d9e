//! File system utilities for packaging.
//!
//! Idempotent directory creation and removal, recursive copies with overwrite
//! semantics, and extension-based cleanup of previous packages.

use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Recursively copies the contents of `from` into `to`, creating `to` as needed.
///
/// Files already present at the same relative path are overwritten; other files in
/// `to` are left alone. Symlinks are followed. Anything under `exclude` is skipped,
/// which keeps the package output directory out of the payload when it lives inside
/// the build output.
///
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path, exclude: Option<&Path>) -> Result<u64> {
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            from.display()
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();
    let exclude = exclude.map(absolute).transpose()?;

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&to).fs_context("creating directory", &to)?;

        let mut copied = 0u64;
        let walker = walkdir::WalkDir::new(&from)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| match (&exclude, absolute(entry.path())) {
                (Some(excluded), Ok(path)) => !path.starts_with(excluded),
                _ => true,
            });

        for entry in walker {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", &dest_path)?;
                copied += 1;
            }
        }

        Ok::<_, Error>(copied)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Removes regular files directly inside `dir` whose extension is one of `extensions`.
///
/// Subdirectories and other files are left untouched. A missing `dir` is not an error.
/// Returns the removed paths in name order.
pub async fn remove_files_with_extensions(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).fs_context("reading directory", dir),
    };

    let mut matches = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading directory", dir)?
    {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .fs_context("reading file type", &path)?
            .is_file();
        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(&e));

        if is_file && matches_extension {
            matches.push(path);
        }
    }
    matches.sort();

    for path in &matches {
        fs::remove_file(path)
            .await
            .fs_context("removing previous package", path)?;
    }

    Ok(matches)
}

/// Makes a path absolute and lexically normalized without touching the filesystem.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving path", path)?
        .into_owned())
}
