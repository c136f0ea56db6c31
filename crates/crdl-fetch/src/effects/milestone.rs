use tracing::debug;

use crate::core::find_milestone;
use crate::data::MilestoneRecord;
use crate::effects::http::{HttpClient, read_to_end};
use crate::error::{Error, Result};

/// Maps a milestone number to its branch position on the main line.
pub struct MilestoneResolver<'a, C: HttpClient> {
    client: &'a C,
    metadata_url: &'a str,
}

impl<'a, C: HttpClient> MilestoneResolver<'a, C> {
    pub fn new(client: &'a C, metadata_url: &'a str) -> Self {
        Self { client, metadata_url }
    }

    /// Fetch the metadata document once and return the branch position of
    /// `identifier`. Nothing is retried.
    pub async fn resolve(&self, identifier: &str) -> Result<u64> {
        let records = self.fetch_records().await?;
        debug!("{} milestone records fetched", records.len());

        let record =
            find_milestone(&records, identifier).ok_or_else(|| Error::MilestoneNotFound(identifier.to_string()))?;

        record
            .chromium_main_branch_position
            .ok_or_else(|| Error::MissingBranchPosition(identifier.to_string()))
    }

    async fn fetch_records(&self) -> Result<Vec<MilestoneRecord>> {
        let url = self.metadata_url;
        let failed = |reason: String| Error::MetadataFetch {
            url: url.to_string(),
            reason,
        };

        let response = self.client.get(url).await.map_err(|e| failed(e.to_string()))?;
        if !(200..300).contains(&response.status) {
            return Err(failed(format!("HTTP {}", response.status)));
        }

        let body = read_to_end(response.body).await.map_err(|e| failed(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHttpClient;

    const META: &str = "http://meta.test/milestones";

    fn client_with(body: &str) -> MockHttpClient {
        MockHttpClient::new().route(META, 200, body.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn resolves_branch_position() {
        let client = client_with(
            r#"[{"milestone":120,"chromium_main_branch_position":2000},
                {"milestone":119,"chromium_main_branch_position":1000}]"#,
        );
        let position = MilestoneResolver::new(&client, META).resolve("119").await.unwrap();
        assert_eq!(position, 1000);
        assert_eq!(client.requests(), vec![META.to_string()]);
    }

    #[tokio::test]
    async fn unknown_milestone() {
        let client = client_with(r#"[{"milestone":120,"chromium_main_branch_position":2000}]"#);
        let err = MilestoneResolver::new(&client, META).resolve("119").await.unwrap_err();
        assert!(matches!(err, Error::MilestoneNotFound(ref id) if id == "119"));
    }

    #[tokio::test]
    async fn record_without_position() {
        let client = client_with(r#"[{"milestone":119}]"#);
        let err = MilestoneResolver::new(&client, META).resolve("119").await.unwrap_err();
        assert!(matches!(err, Error::MissingBranchPosition(_)));
    }

    #[tokio::test]
    async fn non_success_status() {
        let client = MockHttpClient::new().route(META, 503, Vec::new());
        let err = MilestoneResolver::new(&client, META).resolve("119").await.unwrap_err();
        assert!(err.is_metadata_fetch());
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn transport_failure() {
        let client = MockHttpClient::new().refuse(META);
        let err = MilestoneResolver::new(&client, META).resolve("119").await.unwrap_err();
        assert!(err.is_metadata_fetch());
    }

    #[tokio::test]
    async fn malformed_document() {
        let client = client_with("<html>");
        let err = MilestoneResolver::new(&client, META).resolve("119").await.unwrap_err();
        assert!(err.is_metadata_fetch());
    }
}
