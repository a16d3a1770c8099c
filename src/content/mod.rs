//! Content module - post records, loading, slugs and markdown

pub mod loader;
mod markdown;
mod post;
mod samples;
mod slug;

pub use loader::{DataSource, LoadError, LoadOutcome, PostBundle, PostLoader, PostOrigin};
pub use markdown::render_markdown;
pub use post::{parse_post_date, sort_by_date_desc, Post};
pub use samples::sample_posts;
pub use slug::{generate_slug, tag_slug};
