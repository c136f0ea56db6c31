//! Cache of unpacked builds.
//!
//! One directory per (release, platform) under a root, named
//! `chromium_{release}_{prefix}`. The directory's existence is the only
//! state: a present entry is trusted as complete without any check. Entries
//! only ever appear through a rename of a fully extracted staging directory,
//! so a crashed run cannot leave a half-populated entry behind.

use std::path::{Path, PathBuf};

use crdl_platform::PlatformKey;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create cache root {path}: {source}")]
    CreateRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Name of the entry directory for a release on a platform.
pub fn entry_name(release: &str, prefix: &str) -> String {
    format!("chromium_{release}_{prefix}")
}

#[derive(Clone, Debug)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it is missing.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|source| Error::CreateRoot {
            path: self.root.clone(),
            source,
        })
    }

    pub fn entry(&self, release: &str, key: &PlatformKey) -> CacheEntry {
        CacheEntry::new(&self.root, entry_name(release, key.prefix))
    }

    pub fn exists(&self, release: &str, key: &PlatformKey) -> bool {
        let entry = self.entry(release, key);
        let hit = entry.exists();
        debug!("cache {} for {}", if hit { "hit" } else { "miss" }, entry.name());
        hit
    }
}

/// Paths belonging to one cache entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    name: String,
    path: PathBuf,
    archive: PathBuf,
    staging: PathBuf,
}

impl CacheEntry {
    fn new(root: &Path, name: String) -> Self {
        Self {
            path: root.join(&name),
            archive: root.join(format!("{name}.zip")),
            staging: root.join(format!(".{name}.partial")),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Final location of the unpacked build.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temporary download target.
    pub fn archive_path(&self) -> &Path {
        &self.archive
    }

    /// Extraction happens here before the rename into [`path`](Self::path).
    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    /// Anything at the entry path counts, whatever its type.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
