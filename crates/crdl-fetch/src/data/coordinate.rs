use std::fmt;

use bytes::Bytes;
use futures_util::TryStreamExt;

use crate::effects::{BoxStream, HttpResponse};
use crate::error::{Error, Result};

/// Address of one candidate artifact in the archive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArchiveCoordinate {
    pub prefix: String,
    pub position: u64,
    pub artifact: String,
}

impl ArchiveCoordinate {
    pub fn new(prefix: impl Into<String>, position: u64, artifact: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            position,
            artifact: artifact.into(),
        }
    }

    /// Object URL under `base`. The object name's `/` separators are
    /// percent-encoded as the storage API requires.
    pub fn url(&self, base: &str) -> String {
        format!(
            "{base}{}%2F{}%2F{}?alt=media",
            self.prefix, self.position, self.artifact
        )
    }
}

impl fmt::Display for ArchiveCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.prefix, self.position, self.artifact)
    }
}

/// A located artifact whose response body has not been consumed yet.
pub struct RetrievalHandle {
    pub coordinate: ArchiveCoordinate,
    pub url: String,
    pub content_length: Option<u64>,
    body: BoxStream<'static, Result<Bytes>>,
}

impl RetrievalHandle {
    pub fn new(
        coordinate: ArchiveCoordinate,
        url: impl Into<String>,
        content_length: Option<u64>,
        body: BoxStream<'static, Result<Bytes>>,
    ) -> Self {
        Self {
            coordinate,
            url: url.into(),
            content_length,
            body,
        }
    }

    /// Bind the body of a successful probe, mapping transport errors while
    /// streaming to [`Error::ArchiveTransport`].
    pub fn from_response<E>(coordinate: ArchiveCoordinate, url: String, response: HttpResponse<E>) -> Self
    where
        E: std::error::Error + Send + 'static,
    {
        let body_url = url.clone();
        let body = response.body.map_err(move |e| Error::ArchiveTransport {
            url: body_url.clone(),
            reason: e.to_string(),
        });
        Self::new(coordinate, url, response.content_length, Box::pin(body))
    }

    pub fn into_body(self) -> BoxStream<'static, Result<Bytes>> {
        self.body
    }
}

impl fmt::Debug for RetrievalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrievalHandle")
            .field("coordinate", &self.coordinate)
            .field("url", &self.url)
            .field("content_length", &self.content_length)
            .field("body", &"{ ... }")
            .finish()
    }
}
