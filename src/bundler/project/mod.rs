//! Project kinds.
//!
//! A project kind knows how to recognise its project, how to build it, and where the
//! build output lands. Everything after that (staging and archive assembly) is shared.

mod angular;
mod node;

pub use angular::{ANGULAR_WORKSPACE_FILE, AngularProject};
pub use node::NodeProject;

use crate::{
    bundler::{NipkgConfig, error::Result},
    metadata::ProjectManifest,
};
use std::path::{Path, PathBuf};

/// Per-project-type behaviour plugged into the packaging pipeline.
pub trait ProjectKind: std::fmt::Debug + Send + Sync {
    /// Human-readable kind name.
    fn name(&self) -> &'static str;

    /// Checks that `root` is a project of this kind.
    fn validate(&self, root: &Path) -> Result<()>;

    /// Command used when the config has no `buildCommand`.
    fn default_build_command(&self, configuration: Option<&str>) -> String;

    /// Finds the build output when neither CLI nor config specify it.
    ///
    /// The returned path may be relative to `root`.
    fn locate_build_output(&self, root: &Path, config: &NipkgConfig) -> Result<PathBuf>;

    /// Config written by `init`.
    fn default_config(&self, root: &Path, manifest: Option<&ProjectManifest>) -> NipkgConfig;
}

/// Picks the project kind for a directory.
///
/// `angular.json` selects [`AngularProject`]; anything else is treated as a Node project.
pub fn detect(root: &Path) -> Box<dyn ProjectKind> {
    if root.join(ANGULAR_WORKSPACE_FILE).is_file() {
        log::debug!("Found {} - using Angular project kind", ANGULAR_WORKSPACE_FILE);
        Box::new(AngularProject)
    } else {
        Box::new(NodeProject)
    }
}

/// Project name used for generated configs: package.json name, else directory name.
pub(crate) fn project_name(root: &Path, manifest: Option<&ProjectManifest>) -> String {
    manifest
        .and_then(|m| m.name.clone())
        .or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "app".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_angular_workspace() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(detect(dir.path()).name(), "Node.js");

        std::fs::write(dir.path().join("angular.json"), r#"{ "version": 1 }"#).unwrap();
        assert_eq!(detect(dir.path()).name(), "Angular");
    }
}
