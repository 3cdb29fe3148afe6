//! In-memory cache for two remote RSS feeds, pre-rendered as HTML fragments.
//!
//! A [`cache::FeedCache`] holds the latest rendered views of a "posts" feed
//! (full + first-3 limited variants) and a "digest" feed (first-8 capped
//! variant with a trailing "see more" block). [`scheduler::spawn`] keeps the
//! cache fresh on a fixed interval; read accessors never touch the network
//! once the cache has been primed and never return an error — stale content
//! is always preferred to a failure.

pub mod cache;
pub mod config;
pub mod error;
pub mod refresh;
pub mod render;
pub mod scheduler;
pub mod telemetry;

pub use cache::FeedCache;
pub use config::FeedConfig;
pub use error::FeedError;
pub use refresh::fetch::{FeedTransport, HttpTransport};
pub use refresh::types::{DigestItem, PostItem};
