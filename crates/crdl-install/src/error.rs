use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("temporary archive {path} already exists")]
    TemporaryFileCollision { path: PathBuf },

    #[error(transparent)]
    Fetch(#[from] crdl_fetch::Error),

    #[error("failed to unpack archive: {0}")]
    Archive(#[from] crdl_archive::Error),

    #[error(transparent)]
    Store(#[from] crdl_store::Error),

    #[error(transparent)]
    Fs(#[from] crdl_fs::Error),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Map an exclusive-create failure, singling out the collision case.
    pub(crate) fn from_create(err: crdl_fs::Error) -> Self {
        match err {
            crdl_fs::Error::AlreadyExists { path } => Self::TemporaryFileCollision { path },
            other => Self::Fs(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
