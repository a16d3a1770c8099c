//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{sample_posts, PostBundle};

const CONFIG: &str = r#"# blog-rs configuration

# Site
title: My Blog
subtitle: ''
description: ''
author: John Doe
language: en
# IANA zone used for new post dates, empty for UTC
timezone: ''

# URL
url: http://example.com
root: /

# Directory
public_dir: public
static_dir: static

# Post data
# location: a directory relative to this file, or an http(s) base URL
# mode: bundle (one data/posts.json) or indexed (posts/index.json + one file per post)
source:
  location: .
  mode: bundle
  bundle_path: data/posts.json
  index_path: posts/index.json
  posts_dir: posts

# Listing
per_page: 5

# Date format (moment.js style)
date_format: LL
"#;

const STYLESHEET: &str = r#"body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
.site-header, .site-footer, .container { max-width: 960px; margin: 0 auto; padding: 1rem; }
.site-nav a { margin-right: 1rem; }
.posts-grid { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); }
.post-card { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; }
.post-meta { color: #666; font-size: 0.9rem; }
.post-tag, .tag { display: inline-block; margin: 0 0.3rem 0.3rem 0; padding: 0.1rem 0.5rem; border-radius: 999px; background: #eee; }
.tag.active { background: #333; color: #fff; }
.pagination { margin: 1.5rem 0; }
.page-btn { margin-right: 0.3rem; }
.page-btn.active { font-weight: bold; }
.page-btn.disabled { color: #aaa; }
.empty-state { text-align: center; color: #666; }
#admin-form label, #contact-form label { display: block; margin-top: 0.8rem; }
#admin-form input, #admin-form textarea, #contact-form input, #contact-form textarea { width: 100%; }
#json-output { background: #f6f6f6; padding: 1rem; overflow-x: auto; }
"#;

/// Initialize a new blog in the given directory.
///
/// Writes the configuration, the sample posts in both source layouts and a
/// stylesheet. Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("data"))?;
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("static/css"))?;

    write_new(&target_dir.join("_config.yml"), CONFIG)?;

    let posts = sample_posts();
    let bundle = PostBundle {
        posts: posts.clone(),
    };
    write_new(
        &target_dir.join("data/posts.json"),
        &serde_json::to_string_pretty(&bundle)?,
    )?;

    let mut index = Vec::with_capacity(posts.len());
    for post in &posts {
        let name = format!("{}.json", post.slug);
        write_new(
            &target_dir.join("posts").join(&name),
            &serde_json::to_string_pretty(post)?,
        )?;
        index.push(name);
    }
    write_new(
        &target_dir.join("posts/index.json"),
        &serde_json::to_string_pretty(&index)?,
    )?;

    write_new(&target_dir.join("static/css/style.css"), STYLESHEET)?;

    Ok(())
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("Skipping existing file: {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfig, SourceMode};
    use crate::content::{DataSource, PostLoader};
    use tempfile::TempDir;

    #[test]
    fn test_config_template_matches_defaults() {
        let parsed: SiteConfig = serde_yaml::from_str(CONFIG).unwrap();
        let defaults = SiteConfig::default();

        assert_eq!(parsed.title, defaults.title);
        assert_eq!(parsed.per_page, defaults.per_page);
        assert_eq!(parsed.source.mode, SourceMode::Bundle);
        assert_eq!(parsed.source.index_path, defaults.source.index_path);
        parsed.validate().unwrap();
    }

    #[tokio::test]
    async fn test_init_site_loads_in_both_modes() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let mut settings = SiteConfig::load(dir.path().join("_config.yml")).unwrap().source;
        let loader = PostLoader::new(DataSource::directory(dir.path()), settings.clone());
        let outcome = loader.load().await.unwrap();
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.posts.len(), 3);

        settings.mode = SourceMode::Indexed;
        let loader = PostLoader::new(DataSource::directory(dir.path()), settings);
        let indexed = loader.load().await.unwrap();
        assert_eq!(indexed.posts, outcome.posts);
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let config = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
