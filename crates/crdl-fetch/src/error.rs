//! Error types for crdl-fetch.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch milestones from {url}: {reason}")]
    MetadataFetch { url: String, reason: String },

    #[error("milestone {0} not found")]
    MilestoneNotFound(String),

    #[error("milestone {0} has no branch position")]
    MissingBranchPosition(String),

    #[error("failed to download {url}: HTTP {status}")]
    ArchiveStatus { url: String, status: u16 },

    #[error("failed to download {url}: {reason}")]
    ArchiveTransport { url: String, reason: String },

    #[error("no {prefix} build found within {radius} positions of {anchor}")]
    ArtifactNotFound {
        prefix: String,
        anchor: u64,
        radius: u64,
    },

    #[cfg(feature = "reqwest")]
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl Error {
    /// Unexpected status or transport failure while talking to the archive.
    pub fn is_archive_fetch(&self) -> bool {
        matches!(self, Self::ArchiveStatus { .. } | Self::ArchiveTransport { .. })
    }

    pub fn is_metadata_fetch(&self) -> bool {
        matches!(self, Self::MetadataFetch { .. })
    }
}
