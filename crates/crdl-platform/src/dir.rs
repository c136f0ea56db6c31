use std::path::PathBuf;

use crate::error::{Error, Result};

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

/// Default cache root, `~/.crdl`.
pub fn default_cache_root() -> Result<PathBuf> {
    user_home()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.join(".crdl"))
        .ok_or(Error::NoHomeDir)
}
