//! Direct construction of the ar container.
//!
//! A package is an ar archive holding, in this order:
//!
//! 1. `debian-binary` - the format version marker `2.0\n`
//! 2. `control.tar.gz` - the control subtree
//! 3. `data.tar.gz` - the data subtree
//!
//! Readers depend on that order. Tarballs are built in deterministic mode so identical
//! staging trees produce identical bytes.

use super::{Packager, PackageRequest};
use crate::bundler::error::{ErrorExt, Result};
use flate2::{Compression, GzBuilder};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tar::{Builder, HeaderMode};

/// Content of the `debian-binary` member.
pub const DEBIAN_BINARY: &[u8] = b"2.0\n";

/// Member names, in archive order.
pub const DEBIAN_BINARY_MEMBER: &str = "debian-binary";
pub const CONTROL_MEMBER: &str = "control.tar.gz";
pub const DATA_MEMBER: &str = "data.tar.gz";

/// File mode recorded in every ar member header (regular file, rw-r--r--).
pub const MEMBER_MODE: u32 = 0o100644;

/// One named member of the ar container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    pub name: &'static str,
    pub data: Vec<u8>,
}

/// Builds a gzip-compressed tarball of the contents of `dir`.
///
/// Entries are relative to `dir`, sorted by name, and written with
/// [`HeaderMode::Deterministic`] (zero owner ids, fixed mtime, normalized permissions).
/// The gzip header carries no timestamp.
pub fn tar_gz_directory(dir: &Path) -> Result<Vec<u8>> {
    let encoder = GzBuilder::new()
        .mtime(0)
        .operating_system(255)
        .write(Vec::new(), Compression::default());

    let mut tar = Builder::new(encoder);
    tar.mode(HeaderMode::Deterministic);
    tar.follow_symlinks(true);

    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(dir)?;

        if entry.file_type().is_dir() {
            tar.append_dir(rel_path, entry.path())
                .fs_context("adding directory to tarball", entry.path())?;
        } else {
            let mut file =
                File::open(entry.path()).fs_context("opening file for tarball", entry.path())?;
            tar.append_file(rel_path, &mut file)
                .fs_context("adding file to tarball", entry.path())?;
        }
    }

    let encoder = tar
        .into_inner()
        .fs_context("finishing tarball", dir)?;
    encoder.finish().fs_context("compressing tarball", dir)
}

/// Writes `members` as an ar archive.
///
/// Emits the `!<arch>\n` magic, then for each member a 60-byte header (name, mtime,
/// uid 0, gid 0, mode 100644, size, `` `\n ``), the member bytes, and a `\n` pad byte
/// when the member length is odd.
pub fn write_ar<W: Write>(writer: W, members: &[ArchiveMember], mtime: u64) -> std::io::Result<()> {
    let mut builder = ar::Builder::new(writer);
    for member in members {
        let mut header = ar::Header::new(member.name.as_bytes().to_vec(), member.data.len() as u64);
        header.set_mtime(mtime);
        header.set_uid(0);
        header.set_gid(0);
        header.set_mode(MEMBER_MODE);
        builder.append(&header, member.data.as_slice())?;
    }
    Ok(())
}

/// Builds the three package members from a control and a data directory.
pub fn package_members(control_dir: &Path, data_dir: &Path) -> Result<Vec<ArchiveMember>> {
    Ok(vec![
        ArchiveMember {
            name: DEBIAN_BINARY_MEMBER,
            data: DEBIAN_BINARY.to_vec(),
        },
        ArchiveMember {
            name: CONTROL_MEMBER,
            data: tar_gz_directory(control_dir)?,
        },
        ArchiveMember {
            name: DATA_MEMBER,
            data: tar_gz_directory(data_dir)?,
        },
    ])
}

/// Builds the package container in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPackager;

impl Packager for DirectPackager {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn package(&self, request: &PackageRequest<'_>) -> Result<()> {
        request.staging.verify()?;

        let members = package_members(&request.staging.control_dir(), &request.staging.data_dir())?;
        for member in &members {
            log::debug!("  {} ({} bytes)", member.name, member.data.len());
        }

        let file = File::create(request.target).fs_context("creating package", request.target)?;
        let mut writer = BufWriter::new(file);
        write_ar(&mut writer, &members, request.timestamp)
            .fs_context("writing package", request.target)?;
        writer.flush().fs_context("writing package", request.target)?;

        Ok(())
    }
}
