//! `nipkg.config.json` handling.

use crate::bundler::error::{ErrorExt, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config filename, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "nipkg.config.json";

/// Tool configuration loaded from `nipkg.config.json`.
///
/// Every key is optional. Metadata keys sit between CLI overrides and package.json in
/// the resolution order; build keys fall back to project-kind defaults.
///
/// # Configuration
///
/// ```json
/// {
///   "name": "my-dashboard",
///   "version": "1.2.0",
///   "maintainer": "Jane Doe <jane@example.com>",
///   "architecture": "all",
///   "displayName": "My Dashboard",
///   "buildDir": "dist/my-dashboard/browser",
///   "depends": ["ni-web-server"],
///   "userVisible": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NipkgConfig {
    /// Package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Package version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Package description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Maintainer, "Name <email>".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,

    /// Architecture tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,

    /// Display name shown in package manager UIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Application build output directory, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<String>,

    /// Command replacing the project kind's default build command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,

    /// Output root; packages are written to `<outputDir>/nipkg`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Package dependencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends: Option<Vec<String>>,

    /// Whether the package is user visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_visible: Option<bool>,

    /// Segment inserted between version and architecture in the filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_suffix: Option<String>,

    /// Angular project to package when the workspace has several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl NipkgConfig {
    /// Reads and parses a config file.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading config file", path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes the config as pretty-printed JSON.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');
        tokio::fs::write(path, contents)
            .await
            .fs_context("writing config file", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_keys() {
        let config: NipkgConfig = serde_json::from_str(
            r#"{
                "name": "file-test-app",
                "version": "2.1.0",
                "maintainer": "File Test <file@test.com>",
                "displayName": "File Test",
                "buildDir": "dist/app/browser",
                "depends": ["dep1", "dep2"],
                "userVisible": true,
                "buildSuffix": "rc1"
            }"#,
        )
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("file-test-app"));
        assert_eq!(config.display_name.as_deref(), Some("File Test"));
        assert_eq!(config.build_dir.as_deref(), Some("dist/app/browser"));
        assert_eq!(config.depends, Some(vec!["dep1".into(), "dep2".into()]));
        assert_eq!(config.user_visible, Some(true));
        assert_eq!(config.build_suffix.as_deref(), Some("rc1"));
        assert_eq!(config.architecture, None);
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = NipkgConfig {
            name: Some("write-test-app".into()),
            version: Some("1.5.2".into()),
            user_visible: Some(false),
            ..Default::default()
        };

        config.save(&path).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("  \"name\": \"write-test-app\""));
        assert!(!text.contains("buildDir"));

        assert_eq!(NipkgConfig::load(&path).await.unwrap(), config);
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(NipkgConfig::load(&path).await.is_err());
    }
}
