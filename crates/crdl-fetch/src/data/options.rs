/// Milestone metadata for branched releases.
pub const DEFAULT_METADATA_URL: &str =
    "https://chromiumdash.appspot.com/fetch_milestones?only_branched=true";

/// Object listing of the public Chromium snapshot bucket.
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://www.googleapis.com/download/storage/v1/b/chromium-browser-snapshots/o/";

/// How far from the branch position the locator searches in each direction.
pub const DEFAULT_SEARCH_RADIUS: u64 = 100;

/// Endpoints and search bounds.
///
/// # Examples
///
/// ```
/// use crdl_fetch::FetchOptions;
///
/// let options = FetchOptions::default()
///     .archive_url("http://127.0.0.1:8080/o/")
///     .search_radius(10);
/// assert_eq!(options.search_radius, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// URL returning the JSON array of milestone records.
    pub metadata_url: String,

    /// Prefix every archive coordinate is appended to.
    pub archive_url: String,

    /// Maximum offset probed on each side of the anchor.
    ///
    /// Default: 100, i.e. at most 201 probes.
    pub search_radius: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            metadata_url: DEFAULT_METADATA_URL.to_string(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            search_radius: DEFAULT_SEARCH_RADIUS,
        }
    }
}

impl FetchOptions {
    pub fn metadata_url(mut self, url: impl Into<String>) -> Self {
        self.metadata_url = url.into();
        self
    }

    pub fn archive_url(mut self, url: impl Into<String>) -> Self {
        self.archive_url = url.into();
        self
    }

    pub fn search_radius(mut self, radius: u64) -> Self {
        self.search_radius = radius;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.metadata_url, DEFAULT_METADATA_URL);
        assert_eq!(options.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(options.search_radius, 100);
    }

    #[test]
    fn fetch_options_builder_pattern() {
        let options = FetchOptions::default()
            .metadata_url("http://meta")
            .archive_url("http://archive/")
            .search_radius(3);

        assert_eq!(options.metadata_url, "http://meta");
        assert_eq!(options.archive_url, "http://archive/");
        assert_eq!(options.search_radius, 3);
    }
}
