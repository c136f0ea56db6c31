use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

/// Create `path` for writing, failing if anything already exists there.
pub fn create_new(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => Error::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => Error::Write {
                path: path.to_path_buf(),
                source: e,
            },
        })
}

const RENAME_ATTEMPTS: u32 = 5;
const RENAME_BACKOFF: Duration = Duration::from_millis(100);

/// Move the directory `src` to `dest`. `dest` must not exist.
///
/// Windows may briefly hold handles on freshly written files (indexers,
/// antivirus), so the rename is retried there.
pub fn replace_dir(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if dest.exists() {
        return Err(Error::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }

    let mut attempts = 0;
    loop {
        match std::fs::rename(src, dest) {
            Ok(()) => return Ok(()),
            Err(e) if cfg!(windows) && attempts + 1 < RENAME_ATTEMPTS => {
                attempts += 1;
                tracing::debug!("rename into {} failed ({e}), retrying", dest.display());
                std::thread::sleep(RENAME_BACKOFF * attempts);
            }
            Err(e) => {
                return Err(Error::ReplaceDir {
                    path: dest.to_path_buf(),
                    source: e,
                });
            }
        }
    }
}
