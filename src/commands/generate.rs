//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Load posts from the configured source and write the static site
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let outcome = blog.load_posts().await?;
    if outcome.is_fallback() {
        tracing::info!("No post data found, generating with the sample posts");
    }

    let generator = Generator::new(blog)?;
    generator.generate(&outcome.posts)?;

    tracing::info!(
        "Generated {} posts in {:.2}s",
        outcome.posts.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
