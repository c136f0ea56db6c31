//! Milestone resolution and artifact location in the snapshot archive.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure transformations (probe order, status classification)
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! The archive is sparse: most build positions have no uploaded artifact for
//! a given platform. [`ArtifactLocator`] therefore searches outward from the
//! milestone's branch position until it finds one.

pub mod core;
pub mod data;
mod effects;
mod error;

pub use data::{ArchiveCoordinate, FetchOptions, MilestoneRecord, RetrievalHandle};
pub use effects::{ArtifactLocator, BoxStream, HttpClient, HttpResponse, MilestoneResolver, mock};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{Error, Result};
