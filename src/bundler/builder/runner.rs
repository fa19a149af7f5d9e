//! Application build command execution.

use crate::bundler::error::{Error, Result};
use std::{
    path::Path,
    process::{Command, Stdio},
};

/// Runs the application build command.
///
/// The pipeline talks to this trait instead of spawning processes directly so tests can
/// substitute a recording runner.
pub trait CommandRunner: std::fmt::Debug + Send + Sync {
    /// Runs `command` in `cwd`.
    ///
    /// With `verbose` the command's output goes straight to the terminal; otherwise it
    /// is captured and stderr is attached to the error on failure.
    fn run(&self, command: &str, cwd: &Path, verbose: bool) -> Result<()>;
}

/// Runs commands through the platform shell (`sh -c` or `cmd /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    fn shell_command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path, verbose: bool) -> Result<()> {
        let mut cmd = Self::shell_command(command);
        cmd.current_dir(cwd);

        let spawn_error = |error| Error::CommandFailed {
            command: command.to_string(),
            error,
        };

        let (status, stderr) = if verbose {
            let status = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(spawn_error)?;
            (status, String::new())
        } else {
            let output = cmd.stdin(Stdio::null()).output().map_err(spawn_error)?;
            log::debug!("{}", String::from_utf8_lossy(&output.stdout).trim_end());
            (
                output.status,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            )
        };

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandExit {
                command: command.to_string(),
                code: status.code(),
                stderr,
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        ShellRunner
            .run("echo built > marker.txt", dir.path(), false)
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("marker.txt")).unwrap(),
            "built\n"
        );
    }

    #[test]
    fn failure_reports_code_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellRunner
            .run("echo 'Build failed' >&2; exit 3", dir.path(), false)
            .unwrap_err();

        match err {
            Error::CommandExit {
                command,
                code,
                stderr,
            } => {
                assert!(command.contains("exit 3"));
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "Build failed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
