//! Admin form - builds a new post record for the operator to copy into the data file
//!
//! Nothing here writes anywhere: the result is shown as JSON text.

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::{generate_slug, Post};

/// Problems with a submitted draft
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("a post needs a title")]
    MissingTitle,
}

/// Raw admin form fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    /// Comma-separated tag list as typed
    pub tags: String,
}

/// Split a comma-separated tag field, trimming and dropping empties
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// One more than the largest existing id, or 1 for an empty collection
pub fn next_id(posts: &[Post]) -> u64 {
    posts.iter().map(|post| post.id).max().unwrap_or(0) + 1
}

/// Build the post record a draft describes, dated `today`
pub fn build_post(draft: &PostDraft, posts: &[Post], today: NaiveDate) -> Result<Post, DraftError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(DraftError::MissingTitle);
    }

    let post = Post {
        id: next_id(posts),
        title: title.to_string(),
        slug: generate_slug(title),
        date: today.format("%Y-%m-%d").to_string(),
        excerpt: draft.excerpt.clone(),
        content: draft.content.replace("\r\n", "\n"),
        tags: parse_tags(&draft.tags),
    };

    tracing::debug!("Built post {} ({})", post.id, post.slug);
    Ok(post)
}

/// Pretty JSON (two-space indent) for display
pub fn to_json(post: &Post) -> Result<String> {
    Ok(serde_json::to_string_pretty(post)?)
}
