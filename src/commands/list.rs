//! List posts through the same filter and pagination as the site

use anyhow::Result;

use crate::listing::{BlogState, FilterState};
use crate::Blog;

/// Print one page of the filtered post list
pub async fn run(blog: &Blog, query: &str, tags: &[String], page: usize) -> Result<()> {
    let outcome = blog.load_posts().await?;
    let mut state = BlogState::new(outcome.posts, blog.config.per_page);
    state.apply_filter(FilterState::new(query, tags.iter().cloned()));

    if page != 1 && !state.go_to_page(page) {
        anyhow::bail!(
            "Page {} is out of range (1-{})",
            page,
            state.total_pages().max(1)
        );
    }

    print!("{}", format_page(&state));
    Ok(())
}

/// Text listing of the current page
pub fn format_page(state: &BlogState) -> String {
    if state.filtered_len() == 0 {
        return "No posts found\n".to_string();
    }

    let mut out = format!(
        "Posts ({}), page {}/{}:\n",
        state.filtered_len(),
        state.current_page(),
        state.total_pages()
    );
    for post in state.page_posts() {
        out.push_str(&format!("  {} - {} [#{}]", post.date, post.title, post.id));
        if !post.tags.is_empty() {
            out.push_str(&format!(" ({})", post.tags.join(", ")));
        }
        out.push('\n');
    }
    out
}
