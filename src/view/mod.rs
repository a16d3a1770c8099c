//! View models - what the templates render
//!
//! Views are plain data built from the listing state; they hold no state of
//! their own.

mod links;

pub use links::{Links, ServerLinks, StaticLinks};

use chrono::NaiveDate;
use serde::Serialize;

use crate::admin::{self, PostDraft};
use crate::content::{render_markdown, Post};
use crate::helpers::summarize;
use crate::listing::BlogState;

/// Heading and hint shown when nothing matches
pub const EMPTY_TITLE: &str = "No posts found";
pub const EMPTY_HINT: &str = "Try adjusting your search or filters";

/// Site-wide navigation shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct NavView {
    pub home_url: String,
    pub admin_url: String,
    pub admin_action: Option<String>,
    pub contact_url: Option<String>,
}

impl NavView {
    pub fn new(links: &dyn Links) -> Self {
        Self {
            home_url: links.home(),
            admin_url: links.admin(),
            admin_action: links.admin_action(),
            contact_url: links.contact(),
        }
    }
}

/// A post as shown in the list
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub url: String,
}

impl PostCard {
    pub fn new(post: &Post, links: &dyn Links) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            date: post.date.clone(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
            url: links.post(post),
        }
    }
}

/// A tag in the filter bar
#[derive(Debug, Clone, Serialize)]
pub struct TagChip {
    pub name: String,
    pub active: bool,
    pub url: String,
}

/// A numbered page button
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub number: usize,
    pub active: bool,
    pub url: String,
}

/// Pagination controls; `prev_url`/`next_url` are `None` when disabled
#[derive(Debug, Clone, Serialize)]
pub struct PaginationView {
    pub current: usize,
    pub total: usize,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub pages: Vec<PageLink>,
}

impl PaginationView {
    /// Controls for the current state, `None` when everything fits on one page
    pub fn build(state: &BlogState, links: &dyn Links) -> Option<Self> {
        let total = state.total_pages();
        if total <= 1 {
            return None;
        }

        let current = state.current_page();
        let filter = state.filter();
        let pages = (1..=total)
            .map(|number| PageLink {
                number,
                active: number == current,
                url: links.list_page(filter, number),
            })
            .collect();

        Some(Self {
            current,
            total,
            prev_url: (!state.is_first_page()).then(|| links.list_page(filter, current - 1)),
            next_url: (!state.is_last_page()).then(|| links.list_page(filter, current + 1)),
            pages,
        })
    }
}

/// What occupies the posts grid
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListView {
    Posts {
        cards: Vec<PostCard>,
        pagination: Option<PaginationView>,
    },
    Empty {
        title: String,
        hint: String,
    },
    Error {
        message: String,
    },
}

/// The home (list) view
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub query: String,
    /// Selected tags joined with commas, carried by the search form
    pub selected_tags: String,
    pub tags: Vec<TagChip>,
    pub list: ListView,
    pub search_action: Option<String>,
    pub filtered: bool,
    pub clear_url: String,
}

impl HomeView {
    /// Project the listing state
    pub fn build(state: &BlogState, links: &dyn Links) -> Self {
        let filter = state.filter();

        let tags = state
            .all_tags()
            .into_iter()
            .map(|tag| TagChip {
                name: tag.to_string(),
                active: filter.selected_tags.contains(tag),
                url: links.toggle_tag(filter, tag),
            })
            .collect();

        let list = if state.filtered_len() == 0 {
            ListView::Empty {
                title: EMPTY_TITLE.to_string(),
                hint: EMPTY_HINT.to_string(),
            }
        } else {
            ListView::Posts {
                cards: state
                    .page_posts()
                    .into_iter()
                    .map(|post| PostCard::new(post, links))
                    .collect(),
                pagination: PaginationView::build(state, links),
            }
        };

        Self {
            query: filter.query.clone(),
            selected_tags: filter
                .selected_tags
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
            tags,
            list,
            search_action: links.search_action(),
            filtered: !filter.is_empty(),
            clear_url: links.home(),
        }
    }

    /// A list view replaced by a single error message
    pub fn error(message: impl Into<String>, links: &dyn Links) -> Self {
        Self {
            query: String::new(),
            selected_tags: String::new(),
            tags: Vec::new(),
            list: ListView::Error {
                message: message.into(),
            },
            search_action: None,
            filtered: false,
            clear_url: links.home(),
        }
    }
}

/// The single-post view
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub tags_display: String,
    pub content_html: String,
    pub description: String,
    pub back_url: String,
}

impl PostDetail {
    pub fn build(post: &Post, links: &dyn Links) -> Self {
        let content_html = render_markdown(&post.content);
        let description = if post.excerpt.trim().is_empty() {
            summarize(&content_html, 160)
        } else {
            post.excerpt.clone()
        };

        Self {
            id: post.id,
            title: post.title.clone(),
            date: post.date.clone(),
            tags: post.tags.clone(),
            tags_display: post.tags.join(", "),
            content_html,
            description,
            back_url: links.home(),
        }
    }
}

/// The admin form and, after a submission, its JSON output or error
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminView {
    pub draft: PostDraft,
    pub json: Option<String>,
    pub error: Option<String>,
}

impl AdminView {
    /// Process a submitted draft against the loaded posts
    pub fn submit(draft: PostDraft, posts: &[Post], today: NaiveDate) -> Self {
        let result = admin::build_post(&draft, posts, today)
            .map_err(anyhow::Error::from)
            .and_then(|post| admin::to_json(&post));

        match result {
            Ok(json) => Self {
                draft,
                json: Some(json),
                error: None,
            },
            Err(e) => Self {
                draft,
                json: None,
                error: Some(e.to_string()),
            },
        }
    }
}
