//! Slug generation for post titles

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

/// Derive a URL-safe slug from a post title.
///
/// Lowercases, drops everything but ASCII letters, digits, whitespace and
/// hyphens, turns whitespace runs into single hyphens and trims hyphens from
/// both ends.
///
/// # Examples
/// ```
/// use blog_rs::content::generate_slug;
/// assert_eq!(generate_slug("Hello, World!  Foo"), "hello-world-foo");
/// ```
pub fn generate_slug(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Slug used for tag page paths
pub fn tag_slug(tag: &str) -> String {
    let slug = ::slug::slugify(tag);
    if slug.is_empty() {
        "tag".to_string()
    } else {
        slug
    }
}
