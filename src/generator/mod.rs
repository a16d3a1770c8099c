//! Generator module - writes the blog as a static site using the built-in templates

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::content::{Post, PostBundle};
use crate::listing::BlogState;
use crate::templates::{SiteData, TemplateRenderer};
use crate::view::{AdminView, HomeView, NavView, PostDetail, StaticLinks};
use crate::Blog;

/// Static site generator using Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site from already-sorted posts
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        let public_dir = &self.blog.public_dir;
        fs::create_dir_all(public_dir)?;

        self.copy_static_assets()?;

        let posts: Arc<[Post]> = posts.into();
        let state = BlogState::new(posts.clone(), self.blog.config.per_page);
        let links = StaticLinks::new(&self.blog.config.root, state.all_tags());
        let site = SiteData::from_config(&self.blog.config);
        let nav = NavView::new(&links);

        let pages = self.generate_list_pages(state.clone(), None, &site, &nav, &links)?;
        tracing::info!("Generated {} index pages", pages);

        let mut tag_pages = 0;
        for tag in state.all_tags() {
            let mut tagged = state.clone();
            tagged.set_tags([tag]);
            tag_pages += self.generate_list_pages(tagged, Some(tag), &site, &nav, &links)?;
        }
        tracing::info!("Generated {} tag pages", tag_pages);

        self.generate_post_pages(&posts, &site, &nav, &links)?;
        self.generate_admin_page(&site, &nav)?;
        self.generate_data_bundle(&posts)?;

        Ok(())
    }

    /// Every page of one listing (all posts, or one tag); returns the page count
    fn generate_list_pages(
        &self,
        mut state: BlogState,
        tag: Option<&str>,
        site: &SiteData,
        nav: &NavView,
        links: &StaticLinks,
    ) -> Result<usize> {
        let total = state.total_pages().max(1);

        for page in 1..=total {
            state.go_to_page(page);
            let html = self
                .renderer
                .render_home(site, nav, &HomeView::build(&state, links))?;
            self.write_page(&links.list_dir(tag, page), &html)?;
        }

        Ok(total)
    }

    fn generate_post_pages(
        &self,
        posts: &[Post],
        site: &SiteData,
        nav: &NavView,
        links: &StaticLinks,
    ) -> Result<()> {
        for post in posts {
            let html = self
                .renderer
                .render_post(site, nav, &PostDetail::build(post, links))?;
            self.write_page(&links.post_dir(post), &html)?;
        }

        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    fn generate_admin_page(&self, site: &SiteData, nav: &NavView) -> Result<()> {
        let html = self.renderer.render_admin(site, nav, &AdminView::default())?;
        self.write_page("admin", &html)
    }

    /// The sorted bundle, so the generated site can itself serve as a bundle source
    fn generate_data_bundle(&self, posts: &[Post]) -> Result<()> {
        let bundle = PostBundle {
            posts: posts.to_vec(),
        };
        let output_path = self.blog.public_dir.join("data").join("posts.json");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, serde_json::to_string_pretty(&bundle)?)?;
        tracing::info!("Generated data/posts.json");

        Ok(())
    }

    /// Write `index.html` under a directory relative to the public dir
    fn write_page(&self, dir: &str, html: &str) -> Result<()> {
        let output_path = page_path(&self.blog.public_dir, dir);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Copy everything under the static dir into the public dir
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.is_dir() {
            tracing::debug!("No static directory at {:?}", static_dir);
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }
}

fn page_path(public_dir: &Path, dir: &str) -> PathBuf {
    if dir.is_empty() {
        public_dir.join("index.html")
    } else {
        public_dir.join(dir).join("index.html")
    }
}
