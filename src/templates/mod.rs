//! Built-in blog templates using the Tera template engine
//!
//! All templates are embedded in the binary, so the server and the generator
//! need nothing on disk to render pages.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::{display_date, meta_generator, url_for};
use crate::view::{AdminView, HomeView, NavView, PostDetail};

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all blog templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("home.html", include_str!("blog/home.html")),
            ("post.html", include_str!("blog/post.html")),
            ("admin.html", include_str!("blog/admin.html")),
            ("contact.html", include_str!("blog/contact.html")),
            // Partials
            (
                "partials/tag_filters.html",
                include_str!("blog/partials/tag_filters.html"),
            ),
            (
                "partials/pagination.html",
                include_str!("blog/partials/pagination.html"),
            ),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// The list view
    pub fn render_home(&self, site: &SiteData, nav: &NavView, home: &HomeView) -> Result<String> {
        let mut context = page_context(site, nav);
        context.insert("home", home);
        self.render("home.html", &context)
    }

    /// A single post
    pub fn render_post(&self, site: &SiteData, nav: &NavView, post: &PostDetail) -> Result<String> {
        let mut context = page_context(site, nav);
        context.insert("post", post);
        self.render("post.html", &context)
    }

    /// The admin form, with its output when a draft was submitted
    pub fn render_admin(&self, site: &SiteData, nav: &NavView, admin: &AdminView) -> Result<String> {
        let mut context = page_context(site, nav);
        context.insert("admin", admin);
        self.render("admin.html", &context)
    }

    /// The contact form; `message` acknowledges a submission
    pub fn render_contact(
        &self,
        site: &SiteData,
        nav: &NavView,
        message: Option<&str>,
    ) -> Result<String> {
        let mut context = page_context(site, nav);
        context.insert("message", &message);
        self.render("contact.html", &context)
    }
}

fn page_context(site: &SiteData, nav: &NavView) -> Context {
    let mut context = Context::new();
    context.insert("site", site);
    context.insert("nav", nav);
    context
}

/// Tera filter: format a post date with a moment-style format
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "LL".to_string(),
    };

    Ok(tera::Value::String(display_date(&s, &format)))
}

/// Site settings exposed to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub stylesheet: String,
    pub date_format: String,
    pub generator: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            stylesheet: url_for(config, "css/style.css"),
            date_format: config.date_format.clone(),
            generator: meta_generator(),
        }
    }
}
