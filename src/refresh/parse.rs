use bytes::Bytes;
use chrono::Utc;
use rss::{Channel, Item};

use crate::error::FeedError;
use crate::refresh::types::{DigestItem, PostItem};

// Fixed rewrite applied to every digest link: the feed is served from the
// admin backend but readers must land on the public site.
const DIGEST_ADMIN_PREFIX: &str = "https://admin-dev.esdmadrid.es/";
const DIGEST_PUBLIC_PREFIX: &str = "https://esdmadrid.es/posts/";

pub fn parse_channel(xml: &Bytes) -> Result<Channel, FeedError> {
    let channel = Channel::read_from(&xml[..])?;
    // a channel with no <item> elements is malformed for our purposes;
    // both widgets would otherwise render as empty blocks
    if channel.items().is_empty() {
        return Err(FeedError::MissingField("item"));
    }
    Ok(channel)
}

/// Normalize the posts feed. Title, link and description are all required;
/// native feed order is kept.
pub fn post_items(channel: &Channel) -> Result<Vec<PostItem>, FeedError> {
    channel
        .items()
        .iter()
        .map(|item| {
            Ok(PostItem {
                title: required(item.title(), "title")?,
                link: required(item.link(), "link")?,
                description: required(item.description(), "description")?,
                pub_date: pub_date_or_now(item),
            })
        })
        .collect()
}

/// Normalize the digest feed: no description, and every link is moved from
/// the admin host to the public one.
pub fn digest_items(channel: &Channel) -> Result<Vec<DigestItem>, FeedError> {
    channel
        .items()
        .iter()
        .map(|item| {
            Ok(DigestItem {
                title: required(item.title(), "title")?,
                link: rewrite_digest_link(&required(item.link(), "link")?),
                pub_date: pub_date_or_now(item),
            })
        })
        .collect()
}

pub fn rewrite_digest_link(link: &str) -> String {
    link.replace(DIGEST_ADMIN_PREFIX, DIGEST_PUBLIC_PREFIX)
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, FeedError> {
    value.map(str::to_string).ok_or(FeedError::MissingField(field))
}

fn pub_date_or_now(item: &Item) -> String {
    item.pub_date()
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().to_rfc3339())
}
