//! Listing state: posts, filters and the current page

use indexmap::IndexSet;
use std::sync::Arc;

use super::filter::{paginate, total_pages, FilterState};
use crate::content::Post;

/// The list view's whole state as one value.
///
/// The post collection is shared and never mutated. Every filter change
/// recomputes the filtered indices right away and moves back to page 1.
#[derive(Debug, Clone)]
pub struct BlogState {
    posts: Arc<[Post]>,
    filter: FilterState,
    filtered: Vec<usize>,
    current_page: usize,
    per_page: usize,
}

impl BlogState {
    /// Start on page 1 with no filters
    pub fn new(posts: impl Into<Arc<[Post]>>, per_page: usize) -> Self {
        let posts = posts.into();
        let filtered = (0..posts.len()).collect();
        Self {
            posts,
            filter: FilterState::default(),
            filtered,
            current_page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Replace the search text
    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.to_string();
        self.refilter();
    }

    /// Select the tag if unselected, unselect it otherwise
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.filter.selected_tags.shift_remove(tag) {
            self.filter.selected_tags.insert(tag.to_string());
        }
        self.refilter();
    }

    /// Replace the whole tag selection
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.selected_tags = tags.into_iter().map(Into::into).collect();
        self.refilter();
    }

    /// Apply a complete filter state at once
    pub fn apply_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.refilter();
    }

    /// Drop the query and every selected tag
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = self
            .posts
            .iter()
            .enumerate()
            .filter(|(_, post)| self.filter.matches(post))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;
        tracing::debug!(
            "Filter {:?} matched {} of {} posts",
            self.filter,
            self.filtered.len(),
            self.posts.len()
        );
    }

    /// Posts passing the current filters, in load order
    pub fn filtered(&self) -> impl Iterator<Item = &Post> + '_ {
        self.filtered.iter().map(move |&i| &self.posts[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.per_page)
    }

    /// Move to `page`; pages outside `1..=total_pages` leave the state unchanged
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            tracing::debug!("Ignoring request for page {}", page);
            return false;
        }
        self.current_page = page;
        true
    }

    /// Posts on the current page
    pub fn page_posts(&self) -> Vec<&Post> {
        paginate(&self.filtered, self.current_page, self.per_page)
            .iter()
            .map(|&i| &self.posts[i])
            .collect()
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages()
    }

    /// Every distinct tag across the loaded posts, in first-appearance order
    pub fn all_tags(&self) -> Vec<&str> {
        let tags: IndexSet<&str> = self
            .posts
            .iter()
            .flat_map(|post| post.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().collect()
    }

    /// Look up a post by id
    pub fn find(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }
}
