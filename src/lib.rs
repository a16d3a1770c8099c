//! blog-rs: a small blog engine with a live server and a static generator
//!
//! Posts come from a JSON bundle or an index of per-post JSON files, local or
//! over HTTP. They are filtered, paginated and rendered with embedded Tera
//! templates.

pub mod admin;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
            static_dir,
        })
    }

    /// A loader for the configured post source
    pub fn loader(&self) -> Result<content::PostLoader> {
        let source = content::DataSource::from_location(&self.base_dir, &self.config.source.location)?;
        Ok(content::PostLoader::new(source, self.config.source.clone()))
    }

    /// Load posts from the configured source
    pub async fn load_posts(&self) -> Result<content::LoadOutcome> {
        Ok(self.loader()?.load().await?)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
