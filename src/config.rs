use std::time::Duration;

/// Configuration for the feed cache.
///
/// The defaults are the production endpoints and cadence; tests and hosts
/// may point the cache elsewhere. There is intentionally no env/file
/// loading here.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Posts feed (source A), fetched with a cache-busting query parameter.
    pub posts_url: String,

    /// Digest feed (source B), fetched as-is.
    pub digest_url: String,

    /// Period between scheduled refresh cycles (default: 15 minutes).
    pub refresh_interval: Duration,

    /// Item count of the limited posts view (default: 3).
    pub limited_count: usize,

    /// Item cap of the digest view, before the trailer (default: 8).
    pub digest_cap: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            posts_url: "https://asoaadm.substack.com/feed".to_string(),
            digest_url: "https://admin-dev.esdmadrid.es/rss".to_string(),
            refresh_interval: Duration::from_secs(15 * 60),
            limited_count: 3,
            digest_cap: 8,
        }
    }
}
