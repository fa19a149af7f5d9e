//! `nipkg init`.

use crate::{
    bundler::{CONFIG_FILE_NAME, error::ErrorExt, project},
    cli::RuntimeConfig,
    error::Result,
    metadata::load_manifest,
};

/// Writes a default `nipkg.config.json` into the current directory.
///
/// An existing file is left untouched.
pub async fn execute(runtime: &RuntimeConfig) -> Result<i32> {
    let output = runtime.output();
    let project_root =
        std::env::current_dir().fs_context("reading current directory", ".")?;
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        output.warn(&format!(
            "{} already exists; leaving it unchanged",
            config_path.display()
        ))?;
        return Ok(0);
    }

    let kind = project::detect(&project_root);
    let manifest = load_manifest(&project_root);
    let config = kind.default_config(&project_root, manifest.as_ref());
    config.save(&config_path).await?;

    output.success(&format!(
        "Created {} for {} project",
        config_path.display(),
        kind.name()
    ))?;
    output.indent("Edit the file to set package metadata, then run `nipkg build`.")?;
    if let Some(build_dir) = &config.build_dir {
        output.indent(&format!("Build output is expected in {}", build_dir))?;
    }

    Ok(0)
}
