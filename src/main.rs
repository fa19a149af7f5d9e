//! nipkg - packages web application build output as NI packages.
//!
//! Exit code 0 means the package (or config file, for `init`) exists on disk; any fatal
//! error prints a red marker on stderr and exits with 1.

use nipkg_bundler::cli::{self, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let _ = OutputManager::new(false, false).error(&e.to_string());
            1
        }
    };

    process::exit(exit_code);
}
