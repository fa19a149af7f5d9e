//! Metadata resolution across CLI overrides, config file, package.json and defaults.

use super::{ProjectManifest, load_manifest};
use crate::bundler::{
    BuildOptions, DEFAULT_ARCHITECTURE, DEFAULT_MAINTAINER, DEFAULT_VERSION, Error, NipkgConfig,
    PackageMetadata, Result, Settings, is_filesystem_safe,
};
use std::path::Path;

/// A control-file field resolved through the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Name,
    Version,
    Description,
    Maintainer,
    Architecture,
}

impl MetadataField {
    fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Version => "version",
            Self::Description => "description",
            Self::Maintainer => "maintainer",
            Self::Architecture => "architecture",
        }
    }
}

/// Tier a value was taken from, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MetadataSource {
    /// CLI / runtime option.
    Override,
    /// `nipkg.config.json`.
    Config,
    /// package.json.
    Manifest,
    /// Built-in default.
    Default,
}

/// Value plus the tier it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub value: String,
    pub source: MetadataSource,
}

/// Resolves package metadata, first non-empty tier wins.
///
/// 1. runtime override
/// 2. config file
/// 3. package.json
/// 4. default (`name` = project directory name, `version` = 1.0.0, `architecture` = all,
///    `maintainer` = placeholder, `description` = empty)
#[derive(Debug)]
pub struct MetadataResolver<'a> {
    options: &'a BuildOptions,
    config: &'a NipkgConfig,
    manifest: Option<ProjectManifest>,
    project_root: &'a Path,
}

impl<'a> MetadataResolver<'a> {
    /// Creates a resolver for the given settings, loading package.json from the project root.
    pub fn new(settings: &'a Settings) -> Self {
        Self::from_parts(settings.options(), settings.config(), settings.project_root())
    }

    /// Creates a resolver from individual inputs.
    pub fn from_parts(
        options: &'a BuildOptions,
        config: &'a NipkgConfig,
        project_root: &'a Path,
    ) -> Self {
        Self {
            options,
            config,
            manifest: load_manifest(project_root),
            project_root,
        }
    }

    /// Resolves a single field.
    ///
    /// Every tier logs the value it supplies: overrides and config values at debug,
    /// package.json values and defaults at info.
    pub fn resolve(&self, field: MetadataField) -> ResolvedField {
        let (override_value, config_value, manifest_value) = match field {
            MetadataField::Name => (
                &self.options.name,
                &self.config.name,
                self.manifest.as_ref().and_then(|m| m.name.as_ref()),
            ),
            MetadataField::Version => (
                &self.options.version,
                &self.config.version,
                self.manifest.as_ref().and_then(|m| m.version.as_ref()),
            ),
            MetadataField::Description => (
                &self.options.description,
                &self.config.description,
                self.manifest.as_ref().and_then(|m| m.description.as_ref()),
            ),
            MetadataField::Maintainer => (
                &self.options.maintainer,
                &self.config.maintainer,
                self.manifest.as_ref().and_then(|m| m.author.as_ref()),
            ),
            MetadataField::Architecture => {
                (&self.options.architecture, &self.config.architecture, None)
            }
        };

        if let Some(value) = non_empty(override_value.as_ref()) {
            log::debug!("Using {} \"{}\" from command line", field.label(), value);
            return ResolvedField {
                value,
                source: MetadataSource::Override,
            };
        }
        if let Some(value) = non_empty(config_value.as_ref()) {
            log::debug!("Using {} \"{}\" from config file", field.label(), value);
            return ResolvedField {
                value,
                source: MetadataSource::Config,
            };
        }
        if let Some(value) = non_empty(manifest_value) {
            log::info!("📦 Using {} \"{}\" from package.json", field.label(), value);
            return ResolvedField {
                value,
                source: MetadataSource::Manifest,
            };
        }

        let value = self.default_value(field);
        if value.is_empty() {
            log::info!("No {} found, leaving it empty", field.label());
        } else {
            log::info!("⚠️  No {} found, defaulting to \"{}\"", field.label(), value);
        }
        ResolvedField {
            value,
            source: MetadataSource::Default,
        }
    }

    fn default_value(&self, field: MetadataField) -> String {
        match field {
            MetadataField::Name => self
                .project_root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "package".to_string()),
            MetadataField::Version => DEFAULT_VERSION.to_string(),
            MetadataField::Description => String::new(),
            MetadataField::Maintainer => DEFAULT_MAINTAINER.to_string(),
            MetadataField::Architecture => DEFAULT_ARCHITECTURE.to_string(),
        }
    }

    /// Resolves every field into [`PackageMetadata`].
    ///
    /// Display name, visibility and dependencies have no package.json or default tier;
    /// they come from the runtime options or the config file only.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when name, version or architecture is not usable
    /// as part of a filename.
    pub fn resolve_metadata(&self) -> Result<PackageMetadata> {
        let metadata = PackageMetadata {
            name: self.resolve(MetadataField::Name).value,
            version: self.resolve(MetadataField::Version).value,
            description: self.resolve(MetadataField::Description).value,
            maintainer: self.resolve(MetadataField::Maintainer).value,
            architecture: self.resolve(MetadataField::Architecture).value,
            display_name: non_empty(self.options.display_name.as_ref())
                .or_else(|| non_empty(self.config.display_name.as_ref())),
            user_visible: self.options.user_visible.or(self.config.user_visible),
            dependencies: self
                .options
                .depends
                .clone()
                .or_else(|| self.config.depends.clone())
                .unwrap_or_default()
                .into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
        };

        for (key, value) in [
            ("name", &metadata.name),
            ("version", &metadata.version),
            ("architecture", &metadata.architecture),
        ] {
            if !is_filesystem_safe(value) {
                return Err(Error::config(
                    format!("Package {key} \"{value}\" cannot be used in a package filename."),
                    format!(
                        "Set a {key} without path separators in nipkg.config.json, for example:\n  \"{key}\": \"{}\"",
                        example_value(key)
                    ),
                ));
            }
        }

        if !metadata.has_numeric_version() {
            log::warn!(
                "Version \"{}\" is not dot-delimited numbers (e.g. 1.2.3); package managers may reject it",
                metadata.version
            );
        }

        Ok(metadata)
    }
}

fn example_value(key: &str) -> &'static str {
    match key {
        "name" => "my-app",
        "version" => "1.0.0",
        _ => DEFAULT_ARCHITECTURE,
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project_with_manifest(json: Option<&str>) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        if let Some(json) = json {
            fs::write(dir.path().join("package.json"), json).unwrap();
        }
        dir
    }

    #[test]
    fn version_from_manifest() {
        let dir = project_with_manifest(Some(r#"{ "version": "2.1.0" }"#));
        let options = BuildOptions::default();
        let config = NipkgConfig::default();
        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());

        let version = resolver.resolve(MetadataField::Version);
        assert_eq!(version.value, "2.1.0");
        assert_eq!(version.source, MetadataSource::Manifest);
    }

    #[test]
    fn version_defaults_without_manifest() {
        let dir = project_with_manifest(None);
        let options = BuildOptions::default();
        let config = NipkgConfig::default();
        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());

        let version = resolver.resolve(MetadataField::Version);
        assert_eq!(version.value, "1.0.0");
        assert_eq!(version.source, MetadataSource::Default);
    }

    #[test]
    fn override_beats_config_beats_manifest() {
        let dir = project_with_manifest(Some(r#"{ "name": "from-manifest" }"#));
        let mut options = BuildOptions::default();
        let config = NipkgConfig {
            name: Some("from-config".into()),
            ..Default::default()
        };

        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());
        assert_eq!(
            resolver.resolve(MetadataField::Name),
            ResolvedField {
                value: "from-config".into(),
                source: MetadataSource::Config
            }
        );

        options.name = Some("from-cli".into());
        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());
        assert_eq!(
            resolver.resolve(MetadataField::Name),
            ResolvedField {
                value: "from-cli".into(),
                source: MetadataSource::Override
            }
        );
    }

    #[test]
    fn empty_values_fall_through() {
        let dir = project_with_manifest(Some(r#"{ "description": "From manifest" }"#));
        let options = BuildOptions {
            description: Some("   ".into()),
            ..Default::default()
        };
        let config = NipkgConfig {
            description: Some(String::new()),
            ..Default::default()
        };
        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());
        assert_eq!(
            resolver.resolve(MetadataField::Description).value,
            "From manifest"
        );
    }

    #[test]
    fn unparseable_manifest_falls_through_to_defaults() {
        let dir = project_with_manifest(Some("{ this is not json"));
        let options = BuildOptions::default();
        let config = NipkgConfig::default();
        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());

        let metadata = resolver.resolve_metadata().unwrap();
        assert_eq!(metadata.version, "1.0.0");
        assert_eq!(metadata.architecture, "all");
        assert_eq!(metadata.maintainer, "user_name <user@example.com>");
        assert_eq!(metadata.description, "");
        let dir_name = dir.path().file_name().unwrap().to_string_lossy();
        assert_eq!(metadata.name, dir_name);
    }

    #[test]
    fn maintainer_from_manifest_author() {
        let dir = project_with_manifest(Some(
            r#"{ "author": { "name": "Pat", "email": "pat@example.com" } }"#,
        ));
        let options = BuildOptions::default();
        let config = NipkgConfig::default();
        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());
        assert_eq!(
            resolver.resolve(MetadataField::Maintainer).value,
            "Pat <pat@example.com>"
        );
    }

    #[test]
    fn optional_fields_come_from_options_or_config() {
        let dir = project_with_manifest(None);
        let options = BuildOptions {
            user_visible: Some(false),
            ..Default::default()
        };
        let config = NipkgConfig {
            display_name: Some("Dashboard".into()),
            user_visible: Some(true),
            depends: Some(vec!["ni-web-server".into(), " ".into(), "ni-auth".into()]),
            ..Default::default()
        };
        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());
        let metadata = resolver.resolve_metadata().unwrap();

        assert_eq!(metadata.display_name.as_deref(), Some("Dashboard"));
        assert_eq!(metadata.user_visible, Some(false));
        assert_eq!(metadata.dependencies, vec!["ni-web-server", "ni-auth"]);
    }

    #[test]
    fn rejects_names_with_path_separators() {
        let dir = project_with_manifest(Some(r#"{ "name": "@scope/app" }"#));
        let options = BuildOptions::default();
        let config = NipkgConfig::default();
        let resolver = MetadataResolver::from_parts(&options, &config, dir.path());

        let err = resolver.resolve_metadata().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("\"name\": \"my-app\""));
    }
}
