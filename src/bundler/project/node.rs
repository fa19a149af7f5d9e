//! Generic Node.js projects.

use super::{ProjectKind, project_name};
use crate::{
    bundler::{DEFAULT_ARCHITECTURE, DEFAULT_MAINTAINER, DEFAULT_VERSION, Error, NipkgConfig, Result},
    metadata::{MANIFEST_FILE_NAME, ProjectManifest},
};
use std::path::{Path, PathBuf};

/// Any project with a package.json. The build output directory must be configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeProject;

impl ProjectKind for NodeProject {
    fn name(&self) -> &'static str {
        "Node.js"
    }

    fn validate(&self, root: &Path) -> Result<()> {
        if root.join(MANIFEST_FILE_NAME).is_file() {
            Ok(())
        } else {
            Err(Error::config(
                format!(
                    "This is not a Node.js project: no {} in {}.",
                    MANIFEST_FILE_NAME,
                    root.display()
                ),
                "Run this command in a Node.js project directory.",
            ))
        }
    }

    fn default_build_command(&self, _configuration: Option<&str>) -> String {
        "npm run build".to_string()
    }

    fn locate_build_output(&self, _root: &Path, _config: &NipkgConfig) -> Result<PathBuf> {
        Err(Error::config(
            "buildDir is required in nipkg.config.json.",
            "Please add the build output directory path, for example:\n  \"buildDir\": \"dist\"\n  or \"buildDir\": \"build\"\n\nThis should point to your application's build output directory.",
        ))
    }

    fn default_config(&self, root: &Path, manifest: Option<&ProjectManifest>) -> NipkgConfig {
        let name = project_name(root, manifest);
        NipkgConfig {
            version: Some(
                manifest
                    .and_then(|m| m.version.clone())
                    .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            ),
            description: Some(
                manifest
                    .and_then(|m| m.description.clone())
                    .unwrap_or_else(|| format!("{name} application")),
            ),
            maintainer: Some(
                manifest
                    .and_then(|m| m.author.clone())
                    .unwrap_or_else(|| DEFAULT_MAINTAINER.to_string()),
            ),
            architecture: Some(DEFAULT_ARCHITECTURE.to_string()),
            display_name: Some(name.clone()),
            build_dir: Some("dist".to_string()),
            user_visible: Some(true),
            name: Some(name),
            ..Default::default()
        }
    }
}
