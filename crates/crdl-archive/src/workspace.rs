use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crdl_fs::Workspace;

use crate::error::Result;
use crate::extract::{ArchiveReport, extract_from_reader};

/// Extract into `staging`, then rename it to `destination`.
///
/// `destination` only ever appears fully populated. On any failure the
/// staging directory is removed and `destination` is left untouched.
pub fn extract_to_workspace<R: Read + Seek>(
    reader: R,
    staging: &Path,
    destination: &Path,
) -> Result<(PathBuf, ArchiveReport)> {
    let workspace = Workspace::new(staging, destination)?;
    let report = extract_from_reader(reader, workspace.path())?;
    let path = workspace.commit()?;
    Ok((path, report))
}
