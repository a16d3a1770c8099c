//! Link builders for the two ways views are served

use indexmap::IndexMap;

use crate::content::{tag_slug, Post};
use crate::helpers::{query_string, url_for_root};
use crate::listing::FilterState;

/// URLs a view needs: every interaction in the list view is a link
pub trait Links {
    /// Unfiltered first page
    fn home(&self) -> String;

    /// `page` of the list under `filter`
    fn list_page(&self, filter: &FilterState, page: usize) -> String;

    /// The list with `tag` toggled in `filter` (back on page 1)
    fn toggle_tag(&self, filter: &FilterState, tag: &str) -> String;

    /// Detail view of a post
    fn post(&self, post: &Post) -> String;

    fn admin(&self) -> String;

    /// Where the admin form posts, `None` when there is nothing to post to
    fn admin_action(&self) -> Option<String>;

    fn contact(&self) -> Option<String>;

    /// Where the search form submits, `None` when search is unavailable
    fn search_action(&self) -> Option<String>;
}

/// Query-string links for the live server: `/?q=..&tags=a,b&page=N`
#[derive(Debug, Clone)]
pub struct ServerLinks {
    root: String,
}

impl ServerLinks {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
        }
    }

    fn list_url(&self, query: &str, tags: Vec<&str>, page: usize) -> String {
        let page = if page > 1 { page.to_string() } else { String::new() };
        let qs = query_string(&[
            ("q", query.to_string()),
            ("tags", tags.join(",")),
            ("page", page),
        ]);
        format!("{}{}", url_for_root(&self.root, ""), qs)
    }
}

impl Links for ServerLinks {
    fn home(&self) -> String {
        url_for_root(&self.root, "")
    }

    fn list_page(&self, filter: &FilterState, page: usize) -> String {
        let tags = filter.selected_tags.iter().map(String::as_str).collect();
        self.list_url(&filter.query, tags, page)
    }

    fn toggle_tag(&self, filter: &FilterState, tag: &str) -> String {
        let mut tags: Vec<&str> = filter
            .selected_tags
            .iter()
            .map(String::as_str)
            .filter(|t| *t != tag)
            .collect();
        if !filter.selected_tags.contains(tag) {
            tags.push(tag);
        }
        self.list_url(&filter.query, tags, 1)
    }

    fn post(&self, post: &Post) -> String {
        url_for_root(&self.root, &format!("post/{}", post.id))
    }

    fn admin(&self) -> String {
        url_for_root(&self.root, "admin")
    }

    fn admin_action(&self) -> Option<String> {
        Some(self.admin())
    }

    fn contact(&self) -> Option<String> {
        Some(url_for_root(&self.root, "contact"))
    }

    fn search_action(&self) -> Option<String> {
        Some(self.home())
    }
}

/// Path-based links for generated sites: `/page/N/`, `/tags/<slug>/`, `/posts/<id>/`.
///
/// A static site only has pages for "no filter" and "one tag", so toggling a
/// tag jumps to that tag's page, or home when it was the selected one.
#[derive(Debug, Clone)]
pub struct StaticLinks {
    root: String,
    tag_dirs: IndexMap<String, String>,
}

impl StaticLinks {
    /// Links for a site containing `tags`; colliding tag slugs get a numeric suffix
    pub fn new<'a, I>(root: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tag_dirs: IndexMap<String, String> = IndexMap::new();
        for tag in tags {
            if tag_dirs.contains_key(tag) {
                continue;
            }
            let base = tag_slug(tag);
            let mut dir = base.clone();
            let mut n = 2;
            while tag_dirs.values().any(|d| *d == dir) {
                dir = format!("{}-{}", base, n);
                n += 1;
            }
            tag_dirs.insert(tag.to_string(), dir);
        }

        Self {
            root: root.to_string(),
            tag_dirs,
        }
    }

    /// Directory (relative to the site root) holding a tag's pages
    pub fn tag_dir(&self, tag: &str) -> String {
        let dir = self
            .tag_dirs
            .get(tag)
            .cloned()
            .unwrap_or_else(|| tag_slug(tag));
        format!("tags/{}", dir)
    }

    /// Relative directory of a list page: `""`, `page/N`, `tags/x` or `tags/x/page/N`
    pub fn list_dir(&self, tag: Option<&str>, page: usize) -> String {
        let base = tag.map(|t| self.tag_dir(t)).unwrap_or_default();
        match (base.is_empty(), page > 1) {
            (_, false) => base,
            (true, true) => format!("page/{}", page),
            (false, true) => format!("{}/page/{}", base, page),
        }
    }

    /// Relative directory of a post page
    pub fn post_dir(&self, post: &Post) -> String {
        format!("posts/{}", post.id)
    }

    fn dir_url(&self, dir: &str) -> String {
        if dir.is_empty() {
            url_for_root(&self.root, "")
        } else {
            url_for_root(&self.root, &format!("{}/", dir))
        }
    }
}

impl Links for StaticLinks {
    fn home(&self) -> String {
        url_for_root(&self.root, "")
    }

    fn list_page(&self, filter: &FilterState, page: usize) -> String {
        let tag = filter.selected_tags.first().map(String::as_str);
        self.dir_url(&self.list_dir(tag, page))
    }

    fn toggle_tag(&self, filter: &FilterState, tag: &str) -> String {
        if filter.selected_tags.contains(tag) {
            self.home()
        } else {
            self.dir_url(&self.tag_dir(tag))
        }
    }

    fn post(&self, post: &Post) -> String {
        self.dir_url(&self.post_dir(post))
    }

    fn admin(&self) -> String {
        url_for_root(&self.root, "admin/")
    }

    fn admin_action(&self) -> Option<String> {
        None
    }

    fn contact(&self) -> Option<String> {
        None
    }

    fn search_action(&self) -> Option<String> {
        None
    }
}
