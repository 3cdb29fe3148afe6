//! The in-memory feed cache and its read accessors.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use tracing::debug;

use crate::config::FeedConfig;
use crate::refresh;
use crate::refresh::fetch::{FeedTransport, HttpTransport};
use crate::refresh::types::{DigestItem, PostItem};

pub mod state;

use state::CacheState;

/// Owns the cached feed views for one process.
///
/// Readers only ever take the lock briefly to clone a fully-formed string;
/// all fetch/parse/render work happens outside it. Accessors are
/// infallible: a refresh that fails leaves the previous (possibly
/// placeholder) content in place.
pub struct FeedCache {
    config: FeedConfig,
    transport: Arc<dyn FeedTransport>,
    state: RwLock<CacheState>,
}

impl FeedCache {
    /// Cache backed by a plain HTTP transport.
    pub fn new(config: FeedConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Cache backed by a caller-supplied transport.
    pub fn with_transport(config: FeedConfig, transport: Arc<dyn FeedTransport>) -> Self {
        Self {
            config,
            transport,
            state: RwLock::new(CacheState::new()),
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Rendered posts feed, all items.
    pub async fn full_feed_html(&self) -> String {
        self.ensure_primed().await;
        self.read().posts_html.clone()
    }

    /// Rendered posts feed, first items only (front-page variant).
    pub async fn limited_feed_html(&self) -> String {
        self.ensure_primed().await;
        self.read().posts_limited_html.clone()
    }

    /// Rendered digest feed, capped, with the trailing "Ver más" block.
    pub async fn digest_feed_html(&self) -> String {
        self.ensure_primed().await;
        self.read().digest_html.clone()
    }

    /// Run one refresh cycle for both sources, returning once both attempts
    /// have completed, successfully or not.
    pub async fn force_refresh(&self) {
        refresh::run_cycle(self.transport.as_ref(), &self.config, &self.state).await;
    }

    /// Latest normalized posts items (full list, not the limited prefix).
    pub fn post_items(&self) -> Vec<PostItem> {
        self.read().posts.clone()
    }

    /// Latest normalized digest items (full list; views apply the cap).
    pub fn digest_items(&self) -> Vec<DigestItem> {
        self.read().digest.clone()
    }

    /// Epoch milliseconds of the last completed cycle, 0 before the first.
    pub fn last_updated_ms(&self) -> i64 {
        self.read().last_updated_ms
    }

    // First read ever pays for a full synchronous refresh so callers never
    // see the placeholders once any request has gone through.
    async fn ensure_primed(&self) {
        if self.read().never_updated() {
            debug!("cache never refreshed, priming before first read");
            self.force_refresh().await;
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().expect("cache lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;

    use async_trait::async_trait;
    use bytes::Bytes;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn test_config() -> FeedConfig {
        FeedConfig {
            posts_url: "https://posts.test/feed".to_string(),
            digest_url: "https://digest.test/rss".to_string(),
            refresh_interval: Duration::from_secs(900),
            limited_count: 3,
            digest_cap: 8,
        }
    }

    fn rss_doc(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>t</title><link>l</link><description>d</description>{items}</channel></rss>"#
        )
    }

    fn posts_xml(titles: &[&str]) -> String {
        let items: String = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                format!(
                    "<item><title>{title}</title><link>https://example.com/p/{i}</link><description>Cuerpo {i}</description><pubDate>Mon, 01 Jan 2024 10:00:00 GMT</pubDate></item>"
                )
            })
            .collect();
        rss_doc(&items)
    }

    fn digest_xml(n: usize) -> String {
        let items: String = (0..n)
            .map(|i| {
                format!(
                    "<item><title>Noticia {i}</title><link>https://admin-dev.esdmadrid.es/noticia-{i}</link></item>"
                )
            })
            .collect();
        rss_doc(&items)
    }

    fn fail() -> Result<String, FeedError> {
        Err(FeedError::Parse(rss::Error::Eof))
    }

    /// Serves queued responses per source; exhausted queues keep failing.
    struct StubTransport {
        posts: Mutex<VecDeque<Result<String, FeedError>>>,
        digest: Mutex<VecDeque<Result<String, FeedError>>>,
        calls: AtomicUsize,
    }

    impl StubTransport {
        fn new(
            posts: Vec<Result<String, FeedError>>,
            digest: Vec<Result<String, FeedError>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                posts: Mutex::new(posts.into()),
                digest: Mutex::new(digest.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FeedTransport for StubTransport {
        async fn get(&self, url: &str) -> Result<Bytes, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let queue = if url.starts_with("https://posts.test/") {
                &self.posts
            } else {
                &self.digest
            };
            let next = queue.lock().unwrap().pop_front().unwrap_or_else(fail);
            next.map(Bytes::from)
        }
    }

    #[tokio::test]
    async fn first_read_primes_the_cache_lazily() {
        let transport = StubTransport::new(
            vec![Ok(posts_xml(&["Hola"]))],
            vec![Ok(digest_xml(2))],
        );
        let cache = FeedCache::with_transport(test_config(), transport.clone());

        let html = cache.full_feed_html().await;
        assert!(html.contains("Hola"));
        assert_eq!(transport.calls(), 2);

        // later reads come straight from memory
        let _ = cache.digest_feed_html().await;
        let _ = cache.limited_feed_html().await;
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn placeholders_survive_a_fully_failed_first_refresh() {
        let transport = StubTransport::new(vec![fail()], vec![fail()]);
        let cache = FeedCache::with_transport(test_config(), transport.clone());

        assert_eq!(cache.full_feed_html().await, state::POSTS_PLACEHOLDER);
        assert_eq!(cache.limited_feed_html().await, state::POSTS_PLACEHOLDER);
        assert_eq!(cache.digest_feed_html().await, state::DIGEST_PLACEHOLDER);

        // the failed cycle still stamped the cache, so priming ran only once
        assert!(cache.last_updated_ms() > 0);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn limited_view_is_the_first_three_of_the_full_view() {
        let transport = StubTransport::new(
            vec![Ok(posts_xml(&["P0", "P1", "P2", "P3", "P4"]))],
            vec![Ok(digest_xml(1))],
        );
        let cache = FeedCache::with_transport(test_config(), transport);
        cache.force_refresh().await;

        let full = cache.full_feed_html().await;
        let limited = cache.limited_feed_html().await;
        assert!(full.starts_with(&limited));
        assert!(limited.contains("P2"));
        assert!(!limited.contains("P3"));
        assert_eq!(cache.post_items().len(), 5);
    }

    #[tokio::test]
    async fn failed_source_keeps_previous_content_without_disturbing_the_other() {
        let transport = StubTransport::new(
            vec![Ok(posts_xml(&["Antes"])), fail()],
            vec![Ok(digest_xml(2)), Ok(digest_xml(3))],
        );
        let cache = FeedCache::with_transport(test_config(), transport);

        cache.force_refresh().await;
        let posts_before = cache.full_feed_html().await;
        let items_before = cache.post_items();

        cache.force_refresh().await;
        assert_eq!(cache.full_feed_html().await, posts_before);
        assert_eq!(cache.post_items(), items_before);
        // the digest side moved on regardless
        assert!(cache.digest_feed_html().await.contains("Noticia 2"));
    }

    #[tokio::test]
    async fn a_second_refresh_with_new_content_wins() {
        let transport = StubTransport::new(
            vec![Ok(posts_xml(&["Primera"])), Ok(posts_xml(&["Segunda"]))],
            vec![Ok(digest_xml(1)), Ok(digest_xml(1))],
        );
        let cache = FeedCache::with_transport(test_config(), transport);

        cache.force_refresh().await;
        cache.force_refresh().await;

        let full = cache.full_feed_html().await;
        assert!(full.contains("Segunda"));
        assert!(!full.contains("Primera"));
    }

    #[tokio::test]
    async fn digest_view_rewrites_links_and_caps_at_eight() {
        let transport = StubTransport::new(
            vec![Ok(posts_xml(&["Hola"]))],
            vec![Ok(digest_xml(10))],
        );
        let cache = FeedCache::with_transport(test_config(), transport);
        cache.force_refresh().await;

        let html = cache.digest_feed_html().await;
        assert!(!html.contains("admin-dev"));
        assert!(html.contains("https://esdmadrid.es/posts/noticia-0"));
        assert!(html.contains("Noticia 7"));
        assert!(!html.contains("Noticia 8"));
        assert_eq!(html.matches("Ver más").count(), 1);

        // the raw list keeps every item; only the views apply the cap
        assert_eq!(cache.digest_items().len(), 10);
    }
}
