//! Post model

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::slug::generate_slug;

/// Accept either a single string or a list of strings for `tags`
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// A blog post, exactly as stored in the JSON data files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique positive id
    pub id: u64,

    /// Post title
    pub title: String,

    /// URL-friendly name, derived from the title when missing
    #[serde(default)]
    pub slug: String,

    /// Publication date as written in the source (`YYYY-MM-DD`)
    pub date: String,

    /// Short summary shown on the list view
    #[serde(default)]
    pub excerpt: String,

    /// Raw markdown content
    #[serde(default)]
    pub content: String,

    /// Post tags, in source order
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: u64, title: impl Into<String>, date: impl Into<String>) -> Self {
        let title = title.into();
        let slug = generate_slug(&title);
        Self {
            id,
            title,
            slug,
            date: date.into(),
            excerpt: String::new(),
            content: String::new(),
            tags: Vec::new(),
        }
    }

    /// Builder-style excerpt setter
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Builder-style content setter
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Builder-style tags setter
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Fill in the slug from the title if the source left it empty
    pub fn ensure_slug(&mut self) {
        if self.slug.trim().is_empty() {
            self.slug = generate_slug(&self.title);
        }
    }

    /// Calendar date used for ordering, `None` when the date can't be parsed
    pub fn date_key(&self) -> Option<NaiveDate> {
        parse_post_date(&self.date)
    }

    /// Whether the post carries the given tag (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Parse the date formats found in post data
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map(|dt| dt.date())
        .ok()
}

/// Sort posts newest first.
///
/// The sort is stable: posts sharing a date keep their source order, and posts
/// whose date can't be parsed go after every dated post.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date_key().cmp(&a.date_key()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r##"{
            "id": 7,
            "title": "Hello",
            "slug": "hello",
            "date": "2024-02-01",
            "excerpt": "short",
            "content": "# Hello",
            "tags": ["a", "b"]
        }"##;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.tags, vec!["a", "b"]);
        assert_eq!(post.date_key(), NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_deserialize_lenient_fields() {
        let json = r#"{"id": 1, "title": "Solo Tag", "date": "2024-01-01", "tags": "rust"}"#;
        let mut post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.tags, vec!["rust"]);
        assert!(post.excerpt.is_empty());
        assert!(post.slug.is_empty());

        post.ensure_slug();
        assert_eq!(post.slug, "solo-tag");

        let json = r#"{"id": 2, "title": "Null Tags", "date": "2024-01-01", "tags": null}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_serialize_field_order() {
        let post = Post::new(3, "Order", "2024-01-01");
        let json = serde_json::to_string(&post).unwrap();
        let id = json.find("\"id\"").unwrap();
        let title = json.find("\"title\"").unwrap();
        let slug = json.find("\"slug\"").unwrap();
        let date = json.find("\"date\"").unwrap();
        let tags = json.find("\"tags\"").unwrap();
        assert!(id < title && title < slug && slug < date && date < tags);
    }

    #[test]
    fn test_parse_post_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_post_date("2024-01-15"), expected);
        assert_eq!(parse_post_date("2024-01-15T08:30:00Z"), expected);
        assert_eq!(parse_post_date("2024-01-15T08:30:00"), expected);
        assert_eq!(parse_post_date("2024-01-15 08:30:00"), expected);
        assert_eq!(parse_post_date("someday"), None);
        assert_eq!(parse_post_date("2024-13-40"), None);
    }

    #[test]
    fn test_sort_is_stable_and_undated_last() {
        let mut posts = vec![
            Post::new(1, "old", "2024-01-01"),
            Post::new(2, "broken", "not a date"),
            Post::new(3, "tie-a", "2024-03-01"),
            Post::new(4, "tie-b", "2024-03-01"),
            Post::new(5, "also broken", ""),
            Post::new(6, "new", "2024-05-01"),
        ];
        sort_by_date_desc(&mut posts);
        let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![6, 3, 4, 1, 2, 5]);
    }
}
