//! `nipkg build`.

use crate::{
    bundler::{
        BuildOptions, Bundler, CONFIG_FILE_NAME, Context, NipkgConfig, SettingsBuilder,
        error::ErrorExt, utils::fs,
    },
    cli::{BuildArgs, RuntimeConfig},
    error::Result,
};
use std::path::Path;

/// Packages the project in the current directory.
pub async fn execute(args: &BuildArgs, runtime: &RuntimeConfig) -> Result<i32> {
    let output = runtime.output();
    let project_root =
        std::env::current_dir().fs_context("reading current directory", ".")?;

    let config_path = match &args.config {
        Some(path) => fs::absolute(path)?,
        None => project_root.join(CONFIG_FILE_NAME),
    };
    let config = load_config(&config_path, runtime).await?;

    let settings = SettingsBuilder::new()
        .project_root(&project_root)
        .config(config)
        .options(BuildOptions::from(args))
        .build()?;

    output.section(&format!(
        "📦 Building NI package ({} project)",
        settings.project_kind().name()
    ))?;
    output.verbose(&format!("Project root: {}", project_root.display()))?;
    output.verbose(&format!("Output directory: {}", settings.nipkg_directory().display()))?;

    if settings.options().run_build {
        output.progress(&format!("Running `{}`", settings.build_command()))?;
    }
    output.progress("Packaging build output")?;

    let artifact = Bundler::new(settings)?.bundle().await?;

    output.success(&format!("Package created: {}", artifact.path.display()))?;
    output.indent(&format!(
        "{} {} ({})",
        artifact.metadata.name, artifact.metadata.version, artifact.metadata.architecture
    ))?;
    output.indent(&format!("Size: {} bytes", artifact.size))?;
    output.indent(&format!("SHA256: {}", artifact.checksum))?;

    Ok(0)
}

/// Loads the config file, falling back to an empty config when it does not exist.
async fn load_config(path: &Path, runtime: &RuntimeConfig) -> Result<NipkgConfig> {
    if !path.is_file() {
        runtime.output().warn(&format!(
            "No config file found at {}; using defaults. Run `nipkg init` to create one.",
            path.display()
        ))?;
        return Ok(NipkgConfig::default());
    }

    let config = NipkgConfig::load(path)
        .await
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    runtime
        .output()
        .verbose(&format!("Loaded config from {}", path.display()))?;
    Ok(config)
}
