//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Configuration problems found after parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("per_page must be at least 1")]
    ZeroPerPage,

    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    #[error("source.{0} must not be empty")]
    EmptyPath(&'static str),
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Post data
    pub source: SourceConfig,

    // Listing
    pub per_page: usize,

    // Date / Time
    pub date_format: String,
    /// IANA timezone used for "today" in the admin form; empty means UTC
    pub timezone: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            source: SourceConfig::default(),

            per_page: 5,

            date_format: "LL".to_string(),
            timezone: String::new(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde can't express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 {
            return Err(ConfigError::ZeroPerPage);
        }
        if !self.timezone.is_empty() && self.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigError::UnknownTimezone(self.timezone.clone()));
        }
        if self.source.bundle_path.trim().is_empty() {
            return Err(ConfigError::EmptyPath("bundle_path"));
        }
        if self.source.index_path.trim().is_empty() {
            return Err(ConfigError::EmptyPath("index_path"));
        }
        Ok(())
    }
}

/// How post data is laid out at the source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// One `{ "posts": [...] }` file, samples substituted on failure
    #[default]
    Bundle,
    /// An index of file names plus one JSON file per post
    Indexed,
}

/// Post data source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory (relative to the site) or `http(s)://` base URL
    pub location: String,
    pub mode: SourceMode,
    pub bundle_path: String,
    pub index_path: String,
    pub posts_dir: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: ".".to_string(),
            mode: SourceMode::Bundle,
            bundle_path: "data/posts.json".to_string(),
            index_path: "posts/index.json".to_string(),
            posts_dir: "posts".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.source.mode, SourceMode::Bundle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Field Notes
author: Test User
per_page: 3
timezone: America/New_York
source:
  location: https://example.com/blog
  mode: indexed
github_username: someone
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Field Notes");
        assert_eq!(config.per_page, 3);
        assert_eq!(config.source.mode, SourceMode::Indexed);
        assert_eq!(config.source.index_path, "posts/index.json");
        assert!(config.extra.contains_key("github_username"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let yaml = "source:\n  mode: sqlite\n";
        assert!(serde_yaml::from_str::<SiteConfig>(yaml).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = SiteConfig::default();
        config.per_page = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPerPage)));

        let mut config = SiteConfig::default();
        config.timezone = "Mars/Olympus".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownTimezone(_))
        ));
    }
}
