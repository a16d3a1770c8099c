//! Search/tag filtering and page slicing

use indexmap::IndexSet;

use crate::content::Post;

/// Current search text and selected tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    /// Selected tags, kept in selection order
    pub selected_tags: IndexSet<String>,
}

impl FilterState {
    /// Filter with a query and tag selection
    pub fn new<I, S>(query: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: query.to_string(),
            selected_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether nothing narrows the list
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.selected_tags.is_empty()
    }

    /// Whether a post passes both the search and the tag filter
    pub fn matches(&self, post: &Post) -> bool {
        matches_query(post, &self.query.to_lowercase()) && matches_tags(post, &self.selected_tags)
    }
}

/// `needle` must already be lowercased
fn matches_query(post: &Post, needle: &str) -> bool {
    needle.is_empty()
        || post.title.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
}

fn matches_tags(post: &Post, tags: &IndexSet<String>) -> bool {
    tags.is_empty() || tags.iter().any(|tag| post.has_tag(tag))
}

/// Posts matching `query` (case-insensitive) and any of `tags` (exact), in input order
pub fn filter_posts<'a>(posts: &'a [Post], query: &str, tags: &IndexSet<String>) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| matches_query(post, &needle) && matches_tags(post, tags))
        .collect()
}

/// Number of pages needed for `len` items
pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// The 1-based `page` of `items`, clamped to the slice bounds.
///
/// Page 0 and pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page).min(items.len());
    let end = page.saturating_mul(per_page).min(items.len());
    &items[start..end]
}
