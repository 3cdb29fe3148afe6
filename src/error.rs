/// Errors raised inside one source's refresh flow.
///
/// These never cross the public accessor boundary: the refresh cycle logs
/// them and leaves that source's cached output untouched.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Fetch failed before a response body was available.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not a well-formed RSS document.
    #[error("parse error: {0}")]
    Parse(#[from] rss::Error),

    /// The channel or an item lacked a field the renderer requires.
    #[error("feed item missing `{0}`")]
    MissingField(&'static str),

    /// A configured feed URL could not be parsed.
    #[error("invalid feed url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
