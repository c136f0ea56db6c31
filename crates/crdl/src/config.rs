//! Runtime settings, from defaults and `CRDL_*` environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use crdl_fetch::FetchOptions;
use crdl_platform::dir;

pub const HOME_VAR: &str = "CRDL_HOME";
pub const METADATA_URL_VAR: &str = "CRDL_METADATA_URL";
pub const ARCHIVE_URL_VAR: &str = "CRDL_ARCHIVE_URL";
pub const SEARCH_RADIUS_VAR: &str = "CRDL_SEARCH_RADIUS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub cache_root: PathBuf,
    pub fetch: FetchOptions,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let cache_root = match get(HOME_VAR) {
            Some(root) => PathBuf::from(root),
            None => dir::default_cache_root()?,
        };

        let mut fetch = FetchOptions::default();
        if let Some(url) = get(METADATA_URL_VAR) {
            fetch = fetch.metadata_url(url);
        }
        if let Some(url) = get(ARCHIVE_URL_VAR) {
            fetch = fetch.archive_url(url);
        }
        if let Some(radius) = get(SEARCH_RADIUS_VAR) {
            let radius = radius
                .trim()
                .parse()
                .with_context(|| format!("{SEARCH_RADIUS_VAR} must be a non-negative integer, got {radius:?}"))?;
            fetch = fetch.search_radius(radius);
        }

        Ok(Self { cache_root, fetch })
    }
}
