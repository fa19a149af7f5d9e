//! Packaging through the system `dpkg-deb` tool.

use super::{Packager, PackageRequest};
use crate::{
    bail,
    bundler::error::{Error, ErrorExt, Result},
};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// Control directory `dpkg-deb` expects at the root of the tree it builds.
pub const DEBIAN_DIR: &str = "DEBIAN";

/// Reduces a rendered control file to what `dpkg-deb` parses.
///
/// `# Field:` placeholder lines and fields with empty values are dropped; every other
/// line is kept in order.
pub fn dpkg_control(control: &str) -> String {
    let mut reduced = String::new();
    for line in control.lines() {
        if line.starts_with('#') {
            continue;
        }
        if line
            .split_once(':')
            .is_some_and(|(_, value)| value.trim().is_empty())
        {
            continue;
        }
        reduced.push_str(line);
        reduced.push('\n');
    }
    reduced
}

/// Delegates archive assembly to `dpkg-deb`.
///
/// The control file, reduced by [`dpkg_control`], is placed at `data/DEBIAN/control` and
/// the data subtree is built with `dpkg-deb --root-owner-group -Zgzip --build`. The
/// `DEBIAN` directory is removed again afterwards so the staging tree keeps its usual
/// shape.
#[derive(Debug, Clone)]
pub struct DpkgDebPackager {
    program: PathBuf,
}

impl DpkgDebPackager {
    /// Uses the `dpkg-deb` executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn write_debian_dir(&self, debian_dir: &Path, control: &str) -> Result<()> {
        std::fs::create_dir_all(debian_dir).fs_context("creating directory", debian_dir)?;
        let control_path = debian_dir.join("control");
        std::fs::write(&control_path, control).fs_context("writing control file", &control_path)?;

        // dpkg-deb rejects a control directory with group/other write bits
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(debian_dir, std::fs::Permissions::from_mode(0o755))
                .fs_context("setting permissions on", debian_dir)?;
            std::fs::set_permissions(&control_path, std::fs::Permissions::from_mode(0o644))
                .fs_context("setting permissions on", &control_path)?;
        }

        Ok(())
    }
}

impl Packager for DpkgDebPackager {
    fn name(&self) -> &'static str {
        "dpkg-deb"
    }

    fn package(&self, request: &PackageRequest<'_>) -> Result<()> {
        request.staging.verify()?;

        let data_dir = request.staging.data_dir();
        let debian_dir = data_dir.join(DEBIAN_DIR);
        self.write_debian_dir(&debian_dir, &dpkg_control(request.control))?;

        let mut command = Command::new(&self.program);
        command
            .args(["--root-owner-group", "-Zgzip", "--build"])
            .arg(&data_dir)
            .arg(request.target);
        let command_line = format!(
            "{} --root-owner-group -Zgzip --build {} {}",
            self.program.display(),
            data_dir.display(),
            request.target.display()
        );
        log::debug!("Running {}", command_line);

        let output = command.output();

        if let Err(e) = std::fs::remove_dir_all(&debian_dir) {
            log::warn!("Failed to remove {}: {}", debian_dir.display(), e);
        }

        let output = output.map_err(|error| Error::CommandFailed {
            command: command_line.clone(),
            error,
        })?;

        if !output.status.success() {
            return Err(Error::CommandExit {
                command: command_line,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        if !request.target.is_file() {
            bail!(
                "dpkg-deb reported success but {} was not created",
                request.target.display()
            );
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bundler::{
        PackageMetadata,
        builder::tool_detection::DPKG_DEB,
        platform::nipkg::{StagingLayout, generate_control_file},
    };
    use std::{fs, os::unix::fs::PermissionsExt};

    fn fake_tool(dir: &Path, script: &str) -> PathBuf {
        let path = dir.join("fake-dpkg-deb");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn staging(dir: &Path) -> StagingLayout {
        let layout = StagingLayout::new(&dir.join("nipkg"));
        fs::create_dir_all(layout.payload_dir()).unwrap();
        fs::create_dir_all(layout.control_dir()).unwrap();
        fs::write(layout.control_file(), "Package: app\n").unwrap();
        fs::write(layout.payload_dir().join("index.html"), "<html>").unwrap();
        layout
    }

    #[test]
    fn runs_tool_with_control_in_debian_dir() {
        let dir = tempfile::tempdir().unwrap();
        let layout = staging(dir.path());
        // Records the control file it was given and its arguments as the package
        let tool = fake_tool(
            dir.path(),
            "#!/bin/sh\ncat \"$4/DEBIAN/control\" > \"$5\"\necho \"$1 $2 $3\" >> \"$5\"\n",
        );
        let target = dir.path().join("nipkg/app_1.0.0_all.deb");
        let metadata = PackageMetadata::default();

        DpkgDebPackager::new(&tool)
            .package(&PackageRequest {
                metadata: &metadata,
                control: "Package: app\n",
                staging: &layout,
                target: &target,
                timestamp: 0,
            })
            .unwrap();

        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "Package: app\n--root-owner-group -Zgzip --build\n"
        );
        assert!(!layout.data_dir().join(DEBIAN_DIR).exists());
        assert!(layout.payload_dir().join("index.html").is_file());
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let layout = staging(dir.path());
        let tool = fake_tool(dir.path(), "#!/bin/sh\necho 'bad control' >&2\nexit 2\n");
        let target = dir.path().join("nipkg/app_1.0.0_all.deb");
        let metadata = PackageMetadata::default();

        let err = DpkgDebPackager::new(&tool)
            .package(&PackageRequest {
                metadata: &metadata,
                control: "Package: app\n",
                staging: &layout,
                target: &target,
                timestamp: 0,
            })
            .unwrap_err();

        match err {
            Error::CommandExit { code, stderr, .. } => {
                assert_eq!(code, Some(2));
                assert!(stderr.contains("bad control"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!layout.data_dir().join(DEBIAN_DIR).exists());
    }

    #[test]
    fn missing_tool_is_a_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let layout = staging(dir.path());
        let metadata = PackageMetadata::default();

        let err = DpkgDebPackager::new(dir.path().join("does-not-exist"))
            .package(&PackageRequest {
                metadata: &metadata,
                control: "Package: app\n",
                staging: &layout,
                target: &dir.path().join("out.deb"),
                timestamp: 0,
            })
            .unwrap_err();

        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[test]
    fn placeholder_and_empty_fields_are_dropped_for_dpkg() {
        let metadata = PackageMetadata {
            name: "app".into(),
            version: "1.2.3".into(),
            maintainer: "Jo <jo@example.com>".into(),
            architecture: "all".into(),
            ..Default::default()
        };

        assert_eq!(
            dpkg_control(&generate_control_file(&metadata)),
            "Architecture: all\n\
             Maintainer: Jo <jo@example.com>\n\
             Package: app\n\
             Plugin: file\n\
             Version: 1.2.3\n"
        );
    }

    #[test]
    fn placeholders_never_reach_the_tool() {
        let dir = tempfile::tempdir().unwrap();
        let layout = staging(dir.path());
        let tool = fake_tool(dir.path(), "#!/bin/sh\ncat \"$4/DEBIAN/control\" > \"$5\"\n");
        let target = dir.path().join("nipkg/app_1.0.0_all.deb");
        let metadata = PackageMetadata::default();

        DpkgDebPackager::new(&tool)
            .package(&PackageRequest {
                metadata: &metadata,
                control: "Architecture: all\n# Depends:\nPackage: app\n# UserVisible:\n",
                staging: &layout,
                target: &target,
                timestamp: 0,
            })
            .unwrap();

        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "Architecture: all\nPackage: app\n"
        );
    }

    #[test]
    fn real_dpkg_deb_accepts_control_without_optional_fields() {
        let Some(program) = DPKG_DEB.clone() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let layout = staging(dir.path());
        let metadata = PackageMetadata {
            name: "app".into(),
            version: "1.2.3".into(),
            maintainer: "Jo <jo@example.com>".into(),
            architecture: "all".into(),
            ..Default::default()
        };
        let control = generate_control_file(&metadata);
        fs::write(layout.control_file(), &control).unwrap();
        let target = dir.path().join("nipkg/app_1.2.3_all.deb");

        DpkgDebPackager::new(&program)
            .package(&PackageRequest {
                metadata: &metadata,
                control: &control,
                staging: &layout,
                target: &target,
                timestamp: 0,
            })
            .unwrap();

        let field = std::process::Command::new(&program)
            .arg("--field")
            .arg(&target)
            .arg("Package")
            .output()
            .unwrap();
        assert!(field.status.success());
        assert_eq!(String::from_utf8_lossy(&field.stdout).trim(), "app");

        let contents = std::process::Command::new(&program)
            .arg("--contents")
            .arg(&target)
            .output()
            .unwrap();
        assert!(
            String::from_utf8_lossy(&contents.stdout).contains("ApplicationFiles_64/index.html")
        );
    }
}
