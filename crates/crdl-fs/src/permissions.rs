use std::path::Path;

use crate::{Error, Result};

/// Walk `root` and set the unix `mode` on every regular file whose name
/// satisfies `select`. Symlinks are neither followed nor modified.
///
/// On platforms without unix modes the walk still runs but nothing changes.
/// Returns the number of files selected.
pub fn grant_recursive<F>(root: &Path, mode: u32, select: &F) -> Result<usize>
where
    F: Fn(&str) -> bool,
{
    let entries = std::fs::read_dir(root).map_err(|e| Error::Read {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut granted = 0;
    for entry in entries {
        let entry = entry.map_err(|e| Error::Read {
            path: root.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::Read {
            path: path.clone(),
            source: e,
        })?;

        if file_type.is_dir() {
            granted += grant_recursive(&path, mode, select)?;
        } else if file_type.is_file() && select(&entry.file_name().to_string_lossy()) {
            set_mode(&path, mode)?;
            granted += 1;
        }
    }

    Ok(granted)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
