use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::info;

use crate::cache::FeedCache;

/// Start the periodic refresh task for `cache`.
///
/// The first tick fires immediately (startup refresh); later ticks follow
/// the configured interval. Each tick spawns its cycle instead of awaiting
/// it, so a slow cycle never delays or suppresses the next tick —
/// overlapping cycles are an accepted property, not a bug: each cache
/// region has a single writer per cycle and the last completed write wins.
pub fn spawn(cache: Arc<FeedCache>) -> JoinHandle<()> {
    let period = cache.config().refresh_interval;
    info!(period_secs = period.as_secs(), "⏱️ feed cache refresh scheduled");
    tokio::spawn(async move {
        let mut ticker = time::interval(period);
        loop {
            ticker.tick().await;
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.force_refresh().await });
        }
    })
}
