use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status line and unread body of an HTTP response.
pub struct HttpResponse<E> {
    pub status: u16,
    pub content_length: Option<u64>,
    pub body: BoxStream<'static, Result<Bytes, E>>,
}

/// Asynchronous HTTP client abstraction.
///
/// Implementations follow redirects themselves and report the final status
/// without turning error statuses into `Err`; callers decide what a 404
/// means. `Err` is reserved for transport failures.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - [`MockHttpClient`](crate::mock::MockHttpClient): canned responses for tests
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET request and return once the status line is known.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse<Self::Error>, Self::Error>> + Send;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    type Error = T::Error;

    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse<Self::Error>, Self::Error>> + Send {
        (**self).get(url)
    }
}

/// Drain a response body into memory.
pub async fn read_to_end<E>(body: BoxStream<'static, Result<Bytes, E>>) -> Result<Vec<u8>, E> {
    body.try_fold(Vec::new(), |mut buf, chunk| async move {
        buf.extend_from_slice(&chunk);
        Ok(buf)
    })
    .await
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;

    /// Production HTTP client implementation using reqwest.
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new() -> crate::Result<Self> {
            let client = reqwest::Client::builder()
                .user_agent(concat!("crdl/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(crate::Error::ClientBuild)?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(&self, url: &str) -> Result<HttpResponse<Self::Error>, Self::Error> {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let content_length = response.content_length();

            Ok(HttpResponse {
                status,
                content_length,
                body: Box::pin(response.bytes_stream()),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
