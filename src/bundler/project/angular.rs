//! Angular CLI workspaces.

use super::{ProjectKind, project_name};
use crate::{
    bundler::{DEFAULT_MAINTAINER, DEFAULT_VERSION, Error, NipkgConfig, Result},
    metadata::ProjectManifest,
};
use std::path::{Path, PathBuf};

/// Angular workspace descriptor filename.
pub const ANGULAR_WORKSPACE_FILE: &str = "angular.json";

/// Architecture written into configs generated for Angular projects.
const ANGULAR_ARCHITECTURE: &str = "windows_x64";

/// Angular CLI workspace. Build output is discovered from `angular.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularProject;

impl AngularProject {
    /// Reads angular.json. Missing or unparseable descriptors yield `None`.
    fn workspace(root: &Path) -> Option<serde_json::Value> {
        let path = root.join(ANGULAR_WORKSPACE_FILE);
        let contents = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("Ignoring unparseable {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Selects the project: explicit name, then `defaultProject`, then the first entry.
    fn select_project(workspace: &serde_json::Value, requested: Option<&str>) -> Option<String> {
        if let Some(name) = requested.filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }
        if let Some(name) = workspace
            .get("defaultProject")
            .and_then(|v| v.as_str())
            .filter(|n| !n.is_empty())
        {
            return Some(name.to_string());
        }
        workspace
            .get("projects")
            .and_then(|p| p.as_object())
            .and_then(|projects| projects.keys().next().cloned())
    }

    /// Reads `architect.build.options.outputPath` for a project.
    ///
    /// The string form (Angular < 17) points at the bundle directory, or at its parent
    /// when the application builder adds a `browser` subfolder. The object form
    /// (`{ "base": ..., "browser": ... }`) is joined explicitly.
    fn output_path(root: &Path, workspace: &serde_json::Value, project: &str) -> Option<PathBuf> {
        let output = workspace
            .get("projects")?
            .get(project)?
            .get("architect")?
            .get("build")?
            .get("options")?
            .get("outputPath")?;

        match output {
            serde_json::Value::String(path) => {
                let browser = PathBuf::from(path).join("browser");
                if root.join(&browser).is_dir() {
                    Some(browser)
                } else {
                    Some(PathBuf::from(path))
                }
            }
            serde_json::Value::Object(parts) => {
                let base = parts.get("base").and_then(|v| v.as_str())?;
                let browser = parts
                    .get("browser")
                    .and_then(|v| v.as_str())
                    .unwrap_or("browser");
                Some(PathBuf::from(base).join(browser))
            }
            _ => None,
        }
    }
}

impl ProjectKind for AngularProject {
    fn name(&self) -> &'static str {
        "Angular"
    }

    fn validate(&self, root: &Path) -> Result<()> {
        if root.join(ANGULAR_WORKSPACE_FILE).is_file() {
            Ok(())
        } else {
            Err(Error::config(
                format!(
                    "This is not an Angular workspace: no {} in {}.",
                    ANGULAR_WORKSPACE_FILE,
                    root.display()
                ),
                "Run this command in the root of your Angular workspace.",
            ))
        }
    }

    fn default_build_command(&self, configuration: Option<&str>) -> String {
        match configuration.filter(|c| !c.is_empty()) {
            Some(configuration) => format!("ng build --configuration={configuration}"),
            None => "ng build".to_string(),
        }
    }

    fn locate_build_output(&self, root: &Path, config: &NipkgConfig) -> Result<PathBuf> {
        let workspace = Self::workspace(root);
        let project = workspace
            .as_ref()
            .and_then(|w| Self::select_project(w, config.project_name.as_deref()))
            .or_else(|| config.project_name.clone());

        let Some(project) = project else {
            return Err(Error::config(
                format!("Could not determine the Angular project in {ANGULAR_WORKSPACE_FILE}."),
                "Set the build output directory in nipkg.config.json, for example:\n  \"buildDir\": \"dist/my-app/browser\"",
            ));
        };

        let output = workspace
            .as_ref()
            .and_then(|w| Self::output_path(root, w, &project))
            .unwrap_or_else(|| PathBuf::from("dist").join(&project).join("browser"));

        log::info!(
            "Using build output {} for Angular project \"{}\"",
            output.display(),
            project
        );
        Ok(output)
    }

    fn default_config(&self, root: &Path, manifest: Option<&ProjectManifest>) -> NipkgConfig {
        let name = project_name(root, manifest);
        let build_dir = self
            .locate_build_output(root, &NipkgConfig::default())
            .unwrap_or_else(|_| PathBuf::from("dist").join(&name).join("browser"));

        NipkgConfig {
            version: Some(
                manifest
                    .and_then(|m| m.version.clone())
                    .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            ),
            description: Some(
                manifest
                    .and_then(|m| m.description.clone())
                    .unwrap_or_else(|| format!("{name} Angular application")),
            ),
            maintainer: Some(
                manifest
                    .and_then(|m| m.author.clone())
                    .unwrap_or_else(|| DEFAULT_MAINTAINER.to_string()),
            ),
            architecture: Some(ANGULAR_ARCHITECTURE.to_string()),
            display_name: Some(name.clone()),
            build_dir: Some(build_dir.to_string_lossy().replace('\\', "/")),
            user_visible: Some(true),
            name: Some(name),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn workspace(json: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ANGULAR_WORKSPACE_FILE), json).unwrap();
        dir
    }

    #[test]
    fn uses_default_project() {
        let dir = workspace(
            r#"{ "version": 1, "defaultProject": "my-angular-app",
                 "projects": { "other": {}, "my-angular-app": { "projectType": "application" } } }"#,
        );
        let output = AngularProject
            .locate_build_output(dir.path(), &NipkgConfig::default())
            .unwrap();
        assert_eq!(output, PathBuf::from("dist/my-angular-app/browser"));
    }

    #[test]
    fn falls_back_to_first_project() {
        let dir = workspace(
            r#"{ "version": 1, "projects": {
                 "first-project": { "projectType": "application" },
                 "second-project": { "projectType": "library" } } }"#,
        );
        let output = AngularProject
            .locate_build_output(dir.path(), &NipkgConfig::default())
            .unwrap();
        assert_eq!(output, PathBuf::from("dist/first-project/browser"));
    }

    #[test]
    fn configured_project_name_wins() {
        let dir = workspace(r#"{ "defaultProject": "a", "projects": { "a": {}, "b": {} } }"#);
        let config = NipkgConfig {
            project_name: Some("b".into()),
            ..Default::default()
        };
        let output = AngularProject
            .locate_build_output(dir.path(), &config)
            .unwrap();
        assert_eq!(output, PathBuf::from("dist/b/browser"));
    }

    #[test]
    fn reads_output_path_object() {
        let dir = workspace(
            r#"{ "projects": { "shop": { "architect": { "build": { "options": {
                 "outputPath": { "base": "out/shop", "browser": "" } } } } } } }"#,
        );
        let output = AngularProject
            .locate_build_output(dir.path(), &NipkgConfig::default())
            .unwrap();
        assert_eq!(output, PathBuf::from("out/shop"));
    }

    #[test]
    fn reads_output_path_string() {
        let dir = workspace(
            r#"{ "projects": { "shop": { "architect": { "build": { "options": {
                 "outputPath": "dist/shop" } } } } } }"#,
        );
        let output = AngularProject
            .locate_build_output(dir.path(), &NipkgConfig::default())
            .unwrap();
        assert_eq!(output, PathBuf::from("dist/shop"));

        fs::create_dir_all(dir.path().join("dist/shop/browser")).unwrap();
        let output = AngularProject
            .locate_build_output(dir.path(), &NipkgConfig::default())
            .unwrap();
        assert_eq!(output, PathBuf::from("dist/shop/browser"));
    }

    #[test]
    fn unparseable_workspace_uses_configured_project() {
        let dir = workspace("{ broken");
        let config = NipkgConfig {
            project_name: Some("portal".into()),
            ..Default::default()
        };
        let output = AngularProject
            .locate_build_output(dir.path(), &config)
            .unwrap();
        assert_eq!(output, PathBuf::from("dist/portal/browser"));

        assert!(
            AngularProject
                .locate_build_output(dir.path(), &NipkgConfig::default())
                .is_err()
        );
    }

    #[test]
    fn build_command_with_configuration() {
        assert_eq!(AngularProject.default_build_command(None), "ng build");
        assert_eq!(
            AngularProject.default_build_command(Some("production")),
            "ng build --configuration=production"
        );
    }

    #[test]
    fn default_config_targets_windows() {
        let dir = workspace(r#"{ "defaultProject": "portal", "projects": { "portal": {} } }"#);
        let config = AngularProject.default_config(dir.path(), None);
        assert_eq!(config.architecture.as_deref(), Some("windows_x64"));
        assert_eq!(config.build_dir.as_deref(), Some("dist/portal/browser"));
        assert_eq!(config.user_visible, Some(true));
    }
}
