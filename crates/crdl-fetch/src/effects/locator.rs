use tracing::{debug, info};

use crate::core::{Probe, classify, probe_positions};
use crate::data::{ArchiveCoordinate, RetrievalHandle};
use crate::effects::http::HttpClient;
use crate::error::{Error, Result};

/// Finds an uploaded build near a branch position.
///
/// Probes the anchor first, then alternates `anchor - k`, `anchor + k` for
/// growing `k` up to the search radius. Probes are strictly sequential: a 200
/// ends the search, a 404 moves on, anything else aborts.
pub struct ArtifactLocator<'a, C: HttpClient> {
    client: &'a C,
    archive_url: &'a str,
    radius: u64,
}

impl<'a, C: HttpClient> ArtifactLocator<'a, C> {
    pub fn new(client: &'a C, archive_url: &'a str, radius: u64) -> Self {
        Self {
            client,
            archive_url,
            radius,
        }
    }

    pub async fn locate(&self, prefix: &str, anchor: u64, artifact: &str) -> Result<RetrievalHandle> {
        for position in probe_positions(anchor, self.radius) {
            let coordinate = ArchiveCoordinate::new(prefix, position, artifact);
            let url = coordinate.url(self.archive_url);
            info!("Downloading {url} ...");

            let response = self.client.get(&url).await.map_err(|e| Error::ArchiveTransport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

            match classify(response.status) {
                Probe::Hit => {
                    if position != anchor {
                        debug!("using position {position} instead of {anchor}");
                    }
                    return Ok(RetrievalHandle::from_response(coordinate, url, response));
                }
                Probe::Miss => continue,
                Probe::Unexpected(status) => return Err(Error::ArchiveStatus { url, status }),
            }
        }

        Err(Error::ArtifactNotFound {
            prefix: prefix.to_string(),
            anchor,
            radius: self.radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::http::read_to_end;
    use crate::mock::MockHttpClient;

    const ARCHIVE: &str = "http://archive.test/o/";
    const PREFIX: &str = "Linux_x64";
    const ARTIFACT: &str = "chrome-linux.zip";

    fn url_at(position: u64) -> String {
        ArchiveCoordinate::new(PREFIX, position, ARTIFACT).url(ARCHIVE)
    }

    fn positions(client: &MockHttpClient) -> Vec<u64> {
        client
            .requests()
            .iter()
            .map(|url| {
                let rest = url.strip_prefix(&format!("{ARCHIVE}{PREFIX}%2F")).unwrap();
                rest.split("%2F").next().unwrap().parse().unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn hit_at_anchor_is_one_probe() {
        let client = MockHttpClient::new().route(url_at(1000), 200, b"zip".to_vec());
        let locator = ArtifactLocator::new(&client, ARCHIVE, 100);

        let handle = locator.locate(PREFIX, 1000, ARTIFACT).await.unwrap();
        assert_eq!(handle.coordinate.position, 1000);
        assert_eq!(handle.url, url_at(1000));
        assert_eq!(client.request_count(), 1);
        assert_eq!(read_to_end(handle.into_body()).await.unwrap(), b"zip");
    }

    #[tokio::test]
    async fn lower_side_found_before_upper() {
        let client = MockHttpClient::new()
            .route(url_at(995), 200, b"low".to_vec())
            .route(url_at(1005), 200, b"high".to_vec());
        let locator = ArtifactLocator::new(&client, ARCHIVE, 100);

        let handle = locator.locate(PREFIX, 1000, ARTIFACT).await.unwrap();
        assert_eq!(handle.coordinate.position, 995);
        assert_eq!(
            positions(&client),
            vec![1000, 999, 1001, 998, 1002, 997, 1003, 996, 1004, 995]
        );
    }

    #[tokio::test]
    async fn upper_side_found_after_lower_miss() {
        let client = MockHttpClient::new().route(url_at(1002), 200, Vec::new());
        let locator = ArtifactLocator::new(&client, ARCHIVE, 100);

        let handle = locator.locate(PREFIX, 1000, ARTIFACT).await.unwrap();
        assert_eq!(handle.coordinate.position, 1002);
        assert_eq!(client.request_count(), 5);
    }

    #[tokio::test]
    async fn exhausted_radius() {
        let client = MockHttpClient::new();
        let locator = ArtifactLocator::new(&client, ARCHIVE, 100);

        let err = locator.locate(PREFIX, 1000, ARTIFACT).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ArtifactNotFound {
                anchor: 1000,
                radius: 100,
                ..
            }
        ));
        assert_eq!(client.request_count(), 201);
        let probed = positions(&client);
        assert_eq!(probed.iter().min(), Some(&900));
        assert_eq!(probed.iter().max(), Some(&1100));
    }

    #[tokio::test]
    async fn unexpected_status_aborts() {
        let client = MockHttpClient::new()
            .route(url_at(999), 500, Vec::new())
            .route(url_at(1001), 200, Vec::new());
        let locator = ArtifactLocator::new(&client, ARCHIVE, 100);

        let err = locator.locate(PREFIX, 1000, ARTIFACT).await.unwrap_err();
        assert!(matches!(err, Error::ArchiveStatus { status: 500, .. }));
        assert_eq!(client.request_count(), 2);
    }

    #[tokio::test]
    async fn transport_error_aborts() {
        let client = MockHttpClient::new().refuse(url_at(1000));
        let locator = ArtifactLocator::new(&client, ARCHIVE, 100);

        let err = locator.locate(PREFIX, 1000, ARTIFACT).await.unwrap_err();
        assert!(err.is_archive_fetch());
        assert_eq!(client.request_count(), 1);
    }
}
