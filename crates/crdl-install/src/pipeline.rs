//! Install pipeline.
//!
//! ensure root → cache check → resolve milestone → locate artifact → acquire.
//! Every step is awaited in order and any failure ends the run.

use std::path::PathBuf;

use crdl_fetch::{ArtifactLocator, FetchOptions, HttpClient, MilestoneResolver};
use crdl_platform::PlatformKey;
use crdl_store::{CacheEntry, CacheStore};
use tracing::{debug, warn};

use crate::acquire::Acquirer;
use crate::error::Result;
use crate::progress::ProgressCallback;

/// How the entry came to be on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cached,
    Downloaded { position: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub path: PathBuf,
    pub origin: Origin,
}

/// Installs one release for one platform into a cache root.
pub struct Installer<C: HttpClient> {
    client: C,
    options: FetchOptions,
    store: CacheStore,
    key: PlatformKey,
    acquirer: Acquirer,
}

impl<C: HttpClient> Installer<C> {
    pub fn new(client: C, options: FetchOptions, store: CacheStore, key: PlatformKey) -> Self {
        Self {
            client,
            options,
            store,
            key,
            acquirer: Acquirer::new(),
        }
    }

    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.acquirer = self.acquirer.on_progress(on_progress);
        self
    }

    /// Make `identifier` available locally and return its entry directory.
    ///
    /// A present entry is returned as-is without touching the network.
    pub async fn install(&self, identifier: &str) -> Result<Installed> {
        self.store.ensure_root()?;

        let entry = self.store.entry(identifier, &self.key);
        if self.store.exists(identifier, &self.key) {
            warn!("{}", cache_hit_message(&entry));
            return Ok(Installed {
                path: entry.path().to_path_buf(),
                origin: Origin::Cached,
            });
        }

        let anchor = MilestoneResolver::new(&self.client, &self.options.metadata_url)
            .resolve(identifier)
            .await?;
        debug!("milestone {identifier} branched at position {anchor}");

        let handle = ArtifactLocator::new(&self.client, &self.options.archive_url, self.options.search_radius)
            .locate(self.key.prefix, anchor, self.key.artifact)
            .await?;
        let position = handle.coordinate.position;

        let path = self.acquirer.acquire(handle, &entry).await?;
        Ok(Installed {
            path,
            origin: Origin::Downloaded { position },
        })
    }
}

fn cache_hit_message(entry: &CacheEntry) -> String {
    format!("{} already exists, launching without download", entry.name())
}
