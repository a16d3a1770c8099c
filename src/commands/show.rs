//! Show a single post

use anyhow::Result;

use crate::content::{render_markdown, Post};
use crate::helpers::display_date;
use crate::listing::BlogState;
use crate::Blog;

/// Print a post's metadata and rendered content
pub async fn run(blog: &Blog, id: u64) -> Result<()> {
    let outcome = blog.load_posts().await?;
    let state = BlogState::new(outcome.posts, blog.config.per_page);
    let Some(post) = state.find(id) else {
        anyhow::bail!("No post with id {}", id);
    };

    print!("{}", format_post(post, &blog.config.date_format));
    Ok(())
}

pub fn format_post(post: &Post, date_format: &str) -> String {
    format!(
        "{}\n{}\nTags: {}\n\n{}\n",
        post.title,
        display_date(&post.date, date_format),
        post.tags.join(", "),
        render_markdown(&post.content)
    )
}
