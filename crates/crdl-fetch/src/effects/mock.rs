//! In-memory [`HttpClient`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;
use futures_util::stream;

use crate::effects::http::{HttpClient, HttpResponse};

#[derive(Debug, thiserror::Error)]
#[error("mock transport failure: {0}")]
pub struct MockError(pub String);

#[derive(Clone)]
enum Route {
    Respond { status: u16, body: Bytes },
    Refuse,
}

/// Serves canned responses by exact URL and records every request.
///
/// Unrouted URLs answer 404.
/// Bodies are delivered in two chunks so consumers exercise streaming.
pub struct MockHttpClient {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn route(mut self, url: impl Into<String>, status: u16, body: impl Into<Bytes>) -> Self {
        self.routes.insert(
            url.into(),
            Route::Respond {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Fail requests to `url` at the transport level.
    pub fn refuse(mut self, url: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Route::Refuse);
        self
    }

    /// Every requested URL, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for MockHttpClient {
    type Error = MockError;

    async fn get(&self, url: &str) -> Result<HttpResponse<Self::Error>, Self::Error> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let (status, body) = match self.routes.get(url).cloned() {
            Some(Route::Respond { status, body }) => (status, body),
            Some(Route::Refuse) => return Err(MockError(format!("connection refused: {url}"))),
            None => (404, Bytes::new()),
        };

        let split = body.len() / 2;
        let chunks = vec![Ok(body.slice(..split)), Ok(body.slice(split..))];

        Ok(HttpResponse {
            status,
            content_length: Some(body.len() as u64),
            body: Box::pin(stream::iter(chunks)),
        })
    }
}
