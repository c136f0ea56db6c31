use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    #[error("unknown operating system: {0}")]
    UnknownOS(String),

    #[error("unsupported platform: {os}:{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("home directory could not be determined")]
    NoHomeDir,

    #[error("failed to start {cmd}: {source}")]
    CommandFailed {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
}
