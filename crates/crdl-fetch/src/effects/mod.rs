//! I/O against the metadata endpoint and the snapshot archive.

mod http;
mod locator;
mod milestone;
pub mod mock;

pub use http::{BoxStream, HttpClient, HttpResponse, read_to_end};
pub use locator::ArtifactLocator;
pub use milestone::MilestoneResolver;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
