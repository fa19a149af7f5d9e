//! Package metadata written into the control file.

/// Architecture used when nothing else is configured.
///
/// Generic web payloads are architecture independent. Angular projects get
/// `windows_x64` written explicitly into their generated config by `init`.
pub const DEFAULT_ARCHITECTURE: &str = "all";

/// Version used when neither the config nor package.json provide one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Maintainer placeholder used when no author is known.
pub const DEFAULT_MAINTAINER: &str = "user_name <user@example.com>";

/// Fully resolved package metadata.
///
/// Produced by [`MetadataResolver`](crate::metadata::MetadataResolver) and rendered by
/// [`generate_control_file`](crate::bundler::platform::nipkg::generate_control_file).
///
/// # Examples
///
/// ```no_run
/// use nipkg_bundler::bundler::PackageMetadata;
///
/// let metadata = PackageMetadata {
///     name: "my-dashboard".into(),
///     version: "1.2.0".into(),
///     description: "Operator dashboard".into(),
///     maintainer: "Jane Doe <jane@example.com>".into(),
///     architecture: "all".into(),
///     ..Default::default()
/// };
/// assert_eq!(metadata.file_stem(None), "my-dashboard_1.2.0_all");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Package identifier. Becomes part of the output filename.
    pub name: String,

    /// Version string, dot-delimited numeric segments ("1.0.0", "2.3.1.4").
    pub version: String,

    /// One-line package description. May be empty.
    pub description: String,

    /// Maintainer, conventionally "Name <email>".
    pub maintainer: String,

    /// Architecture tag ("all", "windows_x64", ...).
    pub architecture: String,

    /// Name shown in package manager UIs.
    ///
    /// Default: None (rendered as a `# DisplayName:` placeholder)
    pub display_name: Option<String>,

    /// Whether the package is listed for end users.
    ///
    /// Default: None (rendered as a `# UserVisible:` placeholder)
    pub user_visible: Option<bool>,

    /// Ordered dependency names.
    pub dependencies: Vec<String>,
}

impl PackageMetadata {
    /// Returns the package filename without extension.
    ///
    /// `{name}_{version}_{arch}`, or `{name}_{version}_{suffix}_{arch}` with a build suffix.
    pub fn file_stem(&self, build_suffix: Option<&str>) -> String {
        match build_suffix.filter(|s| !s.is_empty()) {
            Some(suffix) => format!(
                "{}_{}_{}_{}",
                self.name, self.version, suffix, self.architecture
            ),
            None => format!("{}_{}_{}", self.name, self.version, self.architecture),
        }
    }

    /// Whether the version is made of one to four numeric dot-delimited segments.
    pub fn has_numeric_version(&self) -> bool {
        let segments: Vec<&str> = self.version.split('.').collect();
        (1..=4).contains(&segments.len())
            && segments
                .iter()
                .all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Whether a value can be embedded in a filename.
pub(crate) fn is_filesystem_safe(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '\0') || c.is_control())
}
