//! Output encoding for bookmarks sent to clients
//!
//! Stored text is kept as submitted. Every string leaving the server goes
//! through an HTML whitelist filter so embedded markup or script cannot run in
//! a browser that renders it.

use bookmarks_types::Bookmark;
use serde::{Deserialize, Serialize};

/// Bookmark as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i64,
}

/// Strip script/style elements and any tags or attributes outside the whitelist.
///
/// A bare `&` cannot open a tag, so it is returned as submitted rather than
/// as `&amp;`. `<` and `>` in text stay encoded.
pub fn clean(text: &str) -> String {
    ammonia::clean(text).replace("&amp;", "&")
}

pub fn serialize_bookmark(bookmark: &Bookmark) -> BookmarkResponse {
    BookmarkResponse {
        id: bookmark.id,
        title: clean(&bookmark.title),
        url: clean(&bookmark.url),
        description: clean(&bookmark.description),
        // Integer column; nothing to filter
        rating: bookmark.rating,
    }
}
