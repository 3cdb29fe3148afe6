//! Pure HTML rendering of normalized feed items.
//!
//! Titles, descriptions and links are interpolated verbatim, without HTML
//! escaping: the feeds are operated by the same organization and their
//! content is trusted as-is. This is a documented accepted risk.

use crate::refresh::types::{DigestItem, PostItem};

// Trailing block appended after the capped digest items.
const DIGEST_TRAILER: &str = r#"<div><a href="https://esdmadrid.es/blog" target="_blank" style="text-decoration: none;"><button class="squarePost" style="color: #36e452; background-color: black; font-size: 1.4em">Ver más <span class="material-symbols-outlined">arrow_forward</span></button></a></div>"#;

/// Render every post as a big button block, in feed order.
pub fn posts_html(items: &[PostItem]) -> String {
    let mut html = String::new();
    for item in items {
        html.push_str(&format!(
            "<div><a href=\"{}\" target=\"_blank\" style=\"text-decoration: none;\"><button class=\"bigPost\"><h4>{}</h4>\n<p>{}</p></button></a></div>",
            item.link, item.title, item.description
        ));
    }
    html
}

/// Render the first `count` posts with the same template as [`posts_html`].
/// Always a strict prefix of the full render.
pub fn limited_posts_html(items: &[PostItem], count: usize) -> String {
    posts_html(&items[..items.len().min(count)])
}

/// Render at most `cap` digest entries as square buttons, then the fixed
/// "Ver más" trailer.
pub fn digest_html(items: &[DigestItem], cap: usize) -> String {
    let mut html = String::new();
    for item in items.iter().take(cap) {
        html.push_str(&format!(
            "<div><a href=\"{}\" target=\"_blank\" style=\"text-decoration: none;\"><button class=\"squarePost\"></img>{}</button></a></div>",
            item.link, item.title
        ));
    }
    html.push_str(DIGEST_TRAILER);
    html
}
