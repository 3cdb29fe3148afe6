use serde::Serialize;

/// One entry of the posts feed (source A).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostItem {
    pub title: String,
    /// Unique within a feed snapshot.
    pub link: String,
    /// HTML-safe text straight from the feed; rendered verbatim.
    pub description: String,
    /// Raw feed string; RFC 3339 "now" when the feed omits it.
    pub pub_date: String,
}

/// One entry of the digest feed (source B). No description in this feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestItem {
    pub title: String,
    /// Already rewritten from the admin host to the public site.
    pub link: String,
    pub pub_date: String,
}
