//! Immutable data types for milestone resolution and archive probing.

pub mod coordinate;
pub mod milestone;
pub mod options;

pub use coordinate::{ArchiveCoordinate, RetrievalHandle};
pub use milestone::{MilestoneId, MilestoneRecord};
pub use options::FetchOptions;
