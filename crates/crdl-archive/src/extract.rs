use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::sanitize::{sanitize_path, sanitize_symlink_target};

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    pub entry_count: usize,
    pub total_bytes: u64,
}

/// Extract every entry of a zip archive under `destination`.
///
/// Entry names are sanitized against `destination`. Unix permission bits
/// stored in the archive are restored. Symlink entries become symlinks on
/// unix and plain files holding the target text elsewhere.
pub fn extract_from_reader<R: Read + Seek>(reader: R, destination: &Path) -> Result<ArchiveReport> {
    let mut archive = zip::ZipArchive::new(reader).map_err(Error::Corrupted)?;
    let mut report = ArchiveReport::default();

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(Error::Corrupted)?;
        let raw_path = file.enclosed_name().ok_or(Error::InvalidPath { index })?;
        let target = sanitize_path(&raw_path, destination)?;
        let mode = file.unix_mode();

        if file.is_dir() {
            create_dir(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }

            if mode.is_some_and(|m| m & S_IFMT == S_IFLNK) {
                let mut link = String::new();
                file.read_to_string(&mut link)
                    .map_err(|source| Error::ExtractionFailed { path: target.clone(), source })?;
                sanitize_symlink_target(&link, &target, destination)?;
                write_symlink(&link, &target)?;
            } else {
                let mut out = File::create(&target)
                    .map_err(|source| Error::ExtractionFailed { path: target.clone(), source })?;
                io::copy(&mut file, &mut out)
                    .map_err(|source| Error::ExtractionFailed { path: target.clone(), source })?;
                if let Some(mode) = mode {
                    restore_mode(&target, mode)?;
                }
            }
            report.total_bytes += file.size();
        }

        report.entry_count += 1;
    }

    debug!(
        "extracted {} entries ({} bytes) into {}",
        report.entry_count,
        report.total_bytes,
        destination.display()
    );
    Ok(report)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn write_symlink(link: &str, target: &Path) -> Result<()> {
    std::os::unix::fs::symlink(link, target).map_err(|source| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source,
    })
}

#[cfg(not(unix))]
fn write_symlink(link: &str, target: &Path) -> Result<()> {
    fs::write(target, link).map_err(|source| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn restore_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let bits = mode & 0o7777;
    if bits == 0 {
        return Ok(());
    }
    fs::set_permissions(path, fs::Permissions::from_mode(bits)).map_err(|source| {
        Error::ExtractionFailed {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restore_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
