//! Filesystem primitives.
//!
//! - [`Workspace`] - staging directory committed by a single rename
//! - [`create_new`] - exclusive file creation
//! - [`permissions`] - recursive permission grants

mod error;
pub mod permissions;
mod primitives;
mod workspace;

pub use error::{Error, Result};
pub use permissions::grant_recursive;
pub use primitives::{create_new, replace_dir};
pub use workspace::Workspace;
