//! Colored terminal output.

use colored::Colorize;
use std::io::{self, Write};

/// Writes user-facing progress, success and warning lines.
///
/// Logging goes through the `log` facade; this is only for the lines a user is
/// expected to read on every run.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            writeln!(io::stdout(), "{}", message.dimmed())?;
        }
        Ok(())
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout(), "{} {}", "→".cyan(), message)?;
        }
        Ok(())
    }

    /// Print success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout(), "{} {}", "✅".green(), message.green())?;
        }
        Ok(())
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stderr(), "{} {}", "⚠️ ".yellow(), message.yellow())?;
        }
        Ok(())
    }

    /// Print error message; never suppressed
    pub fn error(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr(), "{} {}", "❌ Error:".red().bold(), message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout(), "\n{}", title.bold())?;
        }
        Ok(())
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout(), "   {}", message)?;
        }
        Ok(())
    }
}
