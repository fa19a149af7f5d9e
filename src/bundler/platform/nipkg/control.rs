//! Control file rendering.

use crate::bundler::PackageMetadata;

/// Plugin field value for file-payload packages.
pub const PLUGIN: &str = "file";

/// Renders the control file for `metadata`.
///
/// Always nine lines in fixed order: Architecture, Depends, Description, DisplayName,
/// Maintainer, Package, Plugin, UserVisible, Version. Absent optional fields are written
/// as `# Field:` so the line layout never changes.
pub fn generate_control_file(metadata: &PackageMetadata) -> String {
    let depends = metadata.dependencies.join(", ");

    let lines = [
        field("Architecture", Some(&metadata.architecture)),
        field("Depends", Some(&depends).filter(|d| !d.is_empty())),
        field("Description", Some(&metadata.description)),
        field("DisplayName", metadata.display_name.as_ref()),
        field("Maintainer", Some(&metadata.maintainer)),
        field("Package", Some(&metadata.name)),
        field("Plugin", Some(&PLUGIN.to_string())),
        field(
            "UserVisible",
            metadata.user_visible.map(|v| v.to_string()).as_ref(),
        ),
        field("Version", Some(&metadata.version)),
    ];

    let mut control = String::new();
    for line in lines {
        control.push_str(&line);
        control.push('\n');
    }
    control
}

fn field(name: &str, value: Option<&String>) -> String {
    match value {
        // Control fields are single-line; fold any embedded newlines
        Some(value) => format!("{name}: {}", value.replace(['\r', '\n'], " ").trim_end()),
        None => format!("# {name}:"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_metadata() -> PackageMetadata {
        PackageMetadata {
            name: "control-test-app".into(),
            version: "1.2.3".into(),
            description: "Control file test".into(),
            maintainer: "Control Test <control@test.com>".into(),
            architecture: "all".into(),
            display_name: Some("Control Test App".into()),
            user_visible: Some(true),
            dependencies: vec!["runtime-dep-1".into(), "runtime-dep-2".into()],
        }
    }

    #[test]
    fn renders_all_fields() {
        assert_eq!(
            generate_control_file(&full_metadata()),
            "Architecture: all\n\
             Depends: runtime-dep-1, runtime-dep-2\n\
             Description: Control file test\n\
             DisplayName: Control Test App\n\
             Maintainer: Control Test <control@test.com>\n\
             Package: control-test-app\n\
             Plugin: file\n\
             UserVisible: true\n\
             Version: 1.2.3\n"
        );
    }

    #[test]
    fn renders_placeholders_for_missing_optional_fields() {
        let metadata = PackageMetadata {
            name: "minimal-app".into(),
            version: "1.0.0".into(),
            description: "Minimal configuration".into(),
            maintainer: "Minimal <minimal@test.com>".into(),
            architecture: "all".into(),
            ..Default::default()
        };

        assert_eq!(
            generate_control_file(&metadata),
            "Architecture: all\n\
             # Depends:\n\
             Description: Minimal configuration\n\
             # DisplayName:\n\
             Maintainer: Minimal <minimal@test.com>\n\
             Package: minimal-app\n\
             Plugin: file\n\
             # UserVisible:\n\
             Version: 1.0.0\n"
        );
    }

    #[test]
    fn always_nine_lines_in_order() {
        let order = [
            "Architecture",
            "Depends",
            "Description",
            "DisplayName",
            "Maintainer",
            "Package",
            "Plugin",
            "UserVisible",
            "Version",
        ];

        let mut sparse = full_metadata();
        sparse.display_name = None;
        sparse.dependencies.clear();
        sparse.description = String::new();

        for metadata in [full_metadata(), sparse] {
            let control = generate_control_file(&metadata);
            let lines: Vec<&str> = control.lines().collect();
            assert_eq!(lines.len(), 9);
            for (line, name) in lines.iter().zip(order) {
                let key = line.trim_start_matches("# ");
                assert!(key.starts_with(&format!("{name}:")), "{line} != {name}");
            }
        }
    }

    #[test]
    fn user_visible_false_is_rendered() {
        let mut metadata = full_metadata();
        metadata.user_visible = Some(false);
        assert!(generate_control_file(&metadata).contains("\nUserVisible: false\n"));
    }

    #[test]
    fn multiline_description_is_folded() {
        let mut metadata = full_metadata();
        metadata.description = "First line\nsecond line".into();
        let control = generate_control_file(&metadata);
        assert_eq!(control.lines().count(), 9);
        assert!(control.contains("Description: First line second line\n"));
    }
}
