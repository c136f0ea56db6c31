//! Zip extraction with path sanitization and staged commit.
//!
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `extract.rs` - Entry-by-entry extraction
//! - `workspace.rs` - Extract into staging, rename into place

pub use error::{Error, Result};
pub use extract::{ArchiveReport, extract_from_reader};
pub use sanitize::{sanitize_path, sanitize_symlink_target};
pub use workspace::extract_to_workspace;

mod error;
mod extract;
mod sanitize;
mod workspace;
