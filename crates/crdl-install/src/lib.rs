//! Install workflow: cache check, milestone resolution, archive search,
//! download and unpack.
//!
//! - `acquire.rs` - Stream a located artifact to disk and unpack it
//! - `pipeline.rs` - The end-to-end [`Installer`]
//! - `progress.rs` - Progress reporting for the acquisition phases

pub use acquire::Acquirer;
pub use error::{Error, Result};
pub use pipeline::{Installed, Installer, Origin};
pub use progress::{InstallPhase, Progress, ProgressCallback};

mod acquire;
mod error;
mod pipeline;
mod progress;
