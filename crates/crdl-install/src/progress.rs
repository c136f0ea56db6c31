use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Downloading,
    Extracting,
    Completed,
}

/// Snapshot of an acquisition in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub phase: InstallPhase,

    /// Bytes written to the temporary archive so far.
    pub bytes_downloaded: u64,

    /// From Content-Length, when the server sent one.
    pub total_bytes: Option<u64>,
}

pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;
