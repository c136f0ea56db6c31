use std::path::{Path, PathBuf};

use crate::primitives::replace_dir;
use crate::{Error, Result};

/// A staging directory that becomes `destination` on [`commit`](Workspace::commit)
/// and is removed if dropped uncommitted.
///
/// Staging and destination should share a filesystem so the commit is a
/// single rename and `destination` never exists half-populated.
pub struct Workspace {
    staging_path: PathBuf,
    destination_path: PathBuf,
    committed: bool,
}

impl Workspace {
    /// Create a fresh, empty staging directory.
    ///
    /// Leftovers from an interrupted earlier run at the same staging path are
    /// removed first.
    pub fn new(staging_dir: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<Self> {
        let staging_path = staging_dir.as_ref().to_path_buf();
        let destination_path = destination.as_ref().to_path_buf();

        if staging_path.exists() {
            tracing::warn!("removing stale staging directory {}", staging_path.display());
            std::fs::remove_dir_all(&staging_path).map_err(|e| Error::Write {
                path: staging_path.clone(),
                source: e,
            })?;
        }

        std::fs::create_dir_all(&staging_path).map_err(|e| Error::Write {
            path: staging_path.clone(),
            source: e,
        })?;

        Ok(Self {
            staging_path,
            destination_path,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.staging_path
    }

    pub fn commit(mut self) -> Result<PathBuf> {
        replace_dir(&self.staging_path, &self.destination_path)?;
        self.committed = true;
        Ok(self.destination_path.clone())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_dir_all(&self.staging_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workspace() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join(".dest.partial");
        let dest = dir.path().join("dest");
        let workspace = Workspace::new(&staging, &dest).unwrap();
        std::fs::write(staging.join("file.txt"), "data").unwrap();
        assert_eq!(workspace.commit().unwrap(), dest);
        assert!(dest.join("file.txt").exists());
        assert!(!staging.exists());
    }

    #[test]
    fn test_workspace_cleanup_on_drop() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("staging");
        let dest = dir.path().join("dest");
        {
            let _workspace = Workspace::new(&staging, &dest).unwrap();
            std::fs::write(staging.join("file.txt"), "data").unwrap();
            assert!(staging.exists());
        }
        assert!(!staging.exists());
        assert!(!dest.exists());
    }

    #[test]
    fn test_workspace_clears_stale_staging() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("staging");
        std::fs::create_dir_all(&staging).unwrap();
        std::fs::write(staging.join("leftover"), "old").unwrap();

        let workspace = Workspace::new(&staging, dir.path().join("dest")).unwrap();
        assert!(workspace.path().exists());
        assert!(!workspace.path().join("leftover").exists());
    }
}
