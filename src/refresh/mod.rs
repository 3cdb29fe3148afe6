//! One refresh cycle: fetch, parse, normalize and render both feed sources,
//! then install the results in the shared cache state.

use std::sync::RwLock;

use chrono::Utc;
use tracing::{Instrument, error, info, info_span};

use crate::cache::state::CacheState;
use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::render;

pub mod fetch;
pub mod parse;
pub mod types;

use fetch::FeedTransport;

/// Run one full cycle across both sources.
///
/// The two flows run concurrently and fail independently: an error on one
/// side is logged and swallowed, leaving that side's cached output exactly
/// as it was. The shared timestamp advances either way, so lazy
/// initialization fires at most once per process.
pub async fn run_cycle(
    transport: &dyn FeedTransport,
    config: &FeedConfig,
    state: &RwLock<CacheState>,
) {
    info!("🔄 refreshing rss feed cache");
    let (posts, digest) = tokio::join!(
        refresh_posts(transport, config, state).instrument(info_span!("posts")),
        refresh_digest(transport, config, state).instrument(info_span!("digest")),
    );
    if let Err(err) = posts {
        error!(error = %err, "posts feed refresh failed, keeping previous content");
    }
    if let Err(err) = digest {
        error!(error = %err, "digest feed refresh failed, keeping previous content");
    }
    state
        .write()
        .expect("cache lock poisoned")
        .mark_updated(Utc::now().timestamp_millis());
}

async fn refresh_posts(
    transport: &dyn FeedTransport,
    config: &FeedConfig,
    state: &RwLock<CacheState>,
) -> Result<(), FeedError> {
    // volatile cb param so intermediaries never serve us a stale document
    let url = fetch::with_cache_bust(&config.posts_url, Utc::now().timestamp_millis())?;
    let xml = transport.get(&url).instrument(info_span!("fetch_rss")).await?;
    let channel = parse::parse_channel(&xml)?;
    let items = parse::post_items(&channel)?;

    let full = render::posts_html(&items);
    let limited = render::limited_posts_html(&items, config.limited_count);
    let total = items.len();

    state
        .write()
        .expect("cache lock poisoned")
        .apply_posts(items, full, limited);
    info!(
        items = total,
        limited = total.min(config.limited_count),
        "✅ posts feed updated"
    );
    Ok(())
}

async fn refresh_digest(
    transport: &dyn FeedTransport,
    config: &FeedConfig,
    state: &RwLock<CacheState>,
) -> Result<(), FeedError> {
    let xml = transport
        .get(&config.digest_url)
        .instrument(info_span!("fetch_rss"))
        .await?;
    let channel = parse::parse_channel(&xml)?;
    let items = parse::digest_items(&channel)?;

    let html = render::digest_html(&items, config.digest_cap);
    let total = items.len();

    state
        .write()
        .expect("cache lock poisoned")
        .apply_digest(items, html);
    info!(
        shown = total.min(config.digest_cap),
        total, "✅ digest feed updated"
    );
    Ok(())
}
