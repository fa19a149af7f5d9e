//! Main packaging pipeline.
//!
//! This module provides the [`Bundler`] orchestrator that turns an application's build
//! output into a `.nipkg` package.

use super::{
    BundledArtifact,
    checksum::calculate_sha256,
    runner::{CommandRunner, ShellRunner},
    tool_detection::require_dpkg_deb,
};
use crate::{
    bundler::{
        Error, PackageMetadata, PackagerKind, Result, Settings,
        error::ErrorExt,
        is_filesystem_safe,
        platform::nipkg::{
            DEB_EXTENSION, DirectPackager, DpkgDebPackager, NIPKG_EXTENSION, PackageRequest,
            Packager, StagingLayout, generate_control_file, prepare_staging,
        },
        utils::fs,
    },
    metadata::MetadataResolver,
};
use std::{path::PathBuf, sync::Arc};

/// Main packaging orchestrator.
///
/// Runs the pipeline for one invocation, strictly in sequence:
///
/// 1. validate the project and optionally run its build command
/// 2. resolve package metadata
/// 3. remove previous packages from the output directory (unless `skip_cleanup`)
/// 4. stage the build output and write the control file
/// 5. assemble the `.deb` archive through the configured [`Packager`]
/// 6. remove the staging tree (unless `skip_cleanup`) and rename to `.nipkg`
///
/// Any failure aborts the run. Staging is rebuilt from scratch on the next invocation,
/// so nothing is rolled back.
///
/// # Examples
///
/// ```no_run
/// use nipkg_bundler::bundler::{BuildOptions, Bundler, SettingsBuilder};
///
/// # async fn example() -> nipkg_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root(".")
///     .options(BuildOptions {
///         build_dir: Some("build".into()),
///         ..Default::default()
///     })
///     .build()?;
///
/// let artifact = Bundler::new(settings)?.bundle().await?;
/// println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    runner: Arc<dyn CommandRunner>,
    packager: Arc<dyn Packager>,
}

impl Bundler {
    /// Creates a bundler using the shell for builds and the packager selected in the
    /// runtime options.
    ///
    /// # Errors
    ///
    /// Selecting the `dpkg-deb` packager fails when the tool is not installed.
    pub fn new(settings: Settings) -> Result<Self> {
        let packager: Arc<dyn Packager> = match settings.options().packager {
            PackagerKind::Direct => Arc::new(DirectPackager),
            PackagerKind::DpkgDeb => Arc::new(DpkgDebPackager::new(require_dpkg_deb()?)),
        };

        Ok(Self {
            settings,
            runner: Arc::new(ShellRunner),
            packager,
        })
    }

    /// Replaces the build command runner.
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    /// Replaces the archive packager.
    pub fn with_packager(mut self, packager: impl Packager + 'static) -> Self {
        self.packager = Arc::new(packager);
        self
    }

    /// Runs the full pipeline and returns the created package.
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        let settings = &self.settings;
        let options = settings.options();

        settings
            .project_kind()
            .validate(settings.project_root())?;
        log::debug!(
            "{} project at {}",
            settings.project_kind().name(),
            settings.project_root().display()
        );

        if options.run_build {
            self.run_build().await?;
        }

        let metadata = MetadataResolver::new(settings).resolve_metadata()?;
        log::info!(
            "📦 Packaging {} {} ({})",
            metadata.name,
            metadata.version,
            metadata.architecture
        );

        // Must run before cleanup touches previous packages
        let suffix = settings.build_suffix();
        if let Some(suffix) = suffix.filter(|s| !is_filesystem_safe(s)) {
            return Err(Error::config(
                format!("Build suffix \"{suffix}\" cannot be used in a package filename."),
                "Set a buildSuffix without path separators in nipkg.config.json, for example:\n  \"buildSuffix\": \"beta\"",
            ));
        }

        let build_output = settings.build_output_dir()?;
        let nipkg_dir = settings.nipkg_directory();
        fs::create_dir_all(&nipkg_dir, false).await?;

        if !options.skip_cleanup {
            let removed =
                fs::remove_files_with_extensions(&nipkg_dir, &[NIPKG_EXTENSION, DEB_EXTENSION])
                    .await?;
            for path in removed {
                log::info!("🧹 Removed previous package {}", path.display());
            }
        }

        let staging = prepare_staging(&nipkg_dir, &build_output, options.skip_cleanup).await?;

        let control = generate_control_file(&metadata);
        staging.write_control_file(&control).await?;
        staging.verify()?;

        let stem = metadata.file_stem(suffix);
        let deb_path = nipkg_dir.join(format!("{stem}.{DEB_EXTENSION}"));
        let package_path = nipkg_dir.join(format!("{stem}.{NIPKG_EXTENSION}"));

        self.assemble(&metadata, control, &staging, &deb_path)
            .await?;

        if options.skip_cleanup {
            log::debug!("Keeping staging directory {}", staging.root().display());
        } else {
            fs::remove_dir_all(staging.root()).await?;
        }

        tokio::fs::rename(&deb_path, &package_path)
            .await
            .fs_context("renaming package", &deb_path)?;

        let size = tokio::fs::metadata(&package_path)
            .await
            .fs_context("reading package metadata", &package_path)?
            .len();
        let checksum = calculate_sha256(&package_path).await?;

        log::info!("✅ Created {}", package_path.display());

        Ok(BundledArtifact {
            path: package_path,
            size,
            checksum,
            metadata,
        })
    }

    async fn run_build(&self) -> Result<()> {
        let command = self.settings.build_command();
        let cwd = self.settings.project_root().to_path_buf();
        let verbose = self.settings.options().verbose;
        let runner = Arc::clone(&self.runner);

        log::info!("🔨 Building application: {}", command);
        tokio::task::spawn_blocking(move || runner.run(&command, &cwd, verbose))
            .await
            .map_err(|e| Error::GenericError(format!("Build task panicked: {}", e)))?
    }

    async fn assemble(
        &self,
        metadata: &PackageMetadata,
        control: String,
        staging: &StagingLayout,
        target: &std::path::Path,
    ) -> Result<()> {
        let packager = Arc::clone(&self.packager);
        let metadata = metadata.clone();
        let staging = staging.clone();
        let target: PathBuf = target.to_path_buf();
        let timestamp = self.settings.timestamp();

        log::info!("🗜️  Assembling archive with {} packager", packager.name());
        tokio::task::spawn_blocking(move || {
            packager.package(&PackageRequest {
                metadata: &metadata,
                control: &control,
                staging: &staging,
                target: &target,
                timestamp,
            })
        })
        .await
        .map_err(|e| Error::GenericError(format!("Packaging task panicked: {}", e)))?
    }
}
