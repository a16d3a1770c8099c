//! Build a new post record from the command line

use anyhow::Result;

use crate::admin::{build_post, to_json, PostDraft};
use crate::helpers::today;
use crate::Blog;

/// Print the JSON record for a new post; nothing is written to disk
pub async fn run(blog: &Blog, draft: PostDraft) -> Result<()> {
    let outcome = blog.load_posts().await?;
    let post = build_post(&draft, &outcome.posts, today(&blog.config.timezone))?;

    tracing::info!("New post {} will get id {}", post.title, post.id);
    println!("{}", to_json(&post)?);
    Ok(())
}
