//! Normalizes raw posts into the shape the rest of the pipeline consumes.

use chrono::{DateTime, Local};
use gummy_core::{FormattedPost, RawPost, CREATED_DATE_FORMAT};

pub const MAX_BODY_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";
pub const REDDIT_WEB_BASE: &str = "https://www.reddit.com";

/// Formats every post, preserving order and count.
pub fn format_posts(posts: &[RawPost]) -> Vec<FormattedPost> {
    posts.iter().map(format_post).collect()
}

pub fn format_post(raw: &RawPost) -> FormattedPost {
    FormattedPost {
        id: raw.id.clone(),
        title: raw.title.clone(),
        selftext: truncate_body(&raw.selftext),
        author: raw.author.clone(),
        subreddit: raw.subreddit.clone(),
        score: raw.score,
        num_comments: raw.num_comments,
        created_date: render_timestamp(raw.created_utc),
        url: absolute_url(&raw.permalink, &raw.id),
        is_self: raw.is_self,
    }
}

/// Cuts the body at [`MAX_BODY_CHARS`] characters (not bytes) and marks the cut.
pub fn truncate_body(text: &str) -> String {
    match text.char_indices().nth(MAX_BODY_CHARS) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Renders Unix seconds as local time; out-of-range values render empty.
pub fn render_timestamp(created_utc: i64) -> String {
    DateTime::from_timestamp(created_utc, 0)
        .map(|utc| utc.with_timezone(&Local).format(CREATED_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Rewrites community-relative permalinks against the Reddit web origin and
/// passes absolute links through untouched.
pub fn absolute_url(permalink: &str, id: &str) -> String {
    let permalink = permalink.trim();
    if permalink.starts_with("https://") || permalink.starts_with("http://") {
        permalink.to_string()
    } else if permalink.is_empty() {
        format!("{}/comments/{}/", REDDIT_WEB_BASE, id)
    } else if permalink.starts_with('/') {
        format!("{}{}", REDDIT_WEB_BASE, permalink)
    } else {
        format!("{}/{}", REDDIT_WEB_BASE, permalink)
    }
}
