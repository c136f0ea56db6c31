//! Platform detection and archive naming.
//!
//! - [`os`] - Operating system detection and parsing
//! - [`arch`] - CPU architecture detection and parsing
//! - [`platform`] - The fixed (os, arch) to archive coordinate table
//! - [`dir`] - User directories
//! - [`command`] - Detached process launch

pub use command::Command;
pub use error::{Error, Result};
pub use platform::{Platform, PlatformKey};

pub mod arch;
pub mod command;
pub mod dir;
mod error;
pub mod os;
pub mod platform;
