use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use url::Url;

use crate::error::FeedError;

/// How the refresh flow obtains raw feed bytes.
///
/// Production uses [`HttpTransport`]; tests substitute canned responses.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Bytes, FeedError>;
}

/// Plain reqwest-backed transport.
///
/// No request timeout is configured: a hung fetch stalls that source's
/// update for the cycle and nothing else, which is the documented contract.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Bytes, FeedError> {
        let bytes = self.client.get(url).send().await?.bytes().await?;
        Ok(bytes)
    }
}

/// Append the volatile `cb` parameter that defeats intermediary caching of
/// the posts feed.
pub fn with_cache_bust(url: &str, now_ms: i64) -> Result<String, FeedError> {
    let mut url = Url::parse(url)?;
    url.query_pairs_mut().append_pair("cb", &now_ms.to_string());
    Ok(url.to_string())
}
