//! Post loader - fetches post records from a directory or an HTTP base URL

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use super::post::sort_by_date_desc;
use super::{sample_posts, Post};
use crate::config::{SourceConfig, SourceMode};

/// Errors raised while fetching or decoding post data
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0} was not found")]
    NotFound(String),

    #[error("request for {path} failed with HTTP status {status}")]
    Status { path: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid data source: {0}")]
    InvalidSource(String),

    #[error("refusing to load post file {0:?}: it points outside the posts directory")]
    InvalidEntry(String),

    #[error("post loading task failed: {0}")]
    Task(String),
}

/// Shape of `data/posts.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostBundle {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Where post data comes from
#[derive(Debug, Clone)]
pub enum DataSource {
    /// A local directory, paths are resolved relative to it
    Directory(PathBuf),
    /// An HTTP(S) base URL, paths are appended to it
    Remote {
        client: reqwest::Client,
        base_url: String,
    },
}

impl DataSource {
    /// Source reading from a local directory
    pub fn directory<P: AsRef<Path>>(dir: P) -> Self {
        DataSource::Directory(dir.as_ref().to_path_buf())
    }

    /// Source fetching over HTTP
    pub fn remote(base_url: &str) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("blog-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LoadError::Http {
                path: base_url.to_string(),
                source,
            })?;

        Ok(DataSource::Remote {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Pick a source from a configured location.
    ///
    /// `http://` and `https://` locations are remote, anything else is a
    /// directory resolved against `base_dir`.
    pub fn from_location(base_dir: &Path, location: &str) -> Result<Self, LoadError> {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::remote(location);
        }
        if location.contains("://") {
            return Err(LoadError::InvalidSource(location.to_string()));
        }

        let dir = if location.is_empty() {
            base_dir.to_path_buf()
        } else {
            base_dir.join(location)
        };
        Ok(Self::directory(dir))
    }

    /// Human-readable location of a resource, for messages
    pub fn describe(&self, path: &str) -> String {
        match self {
            DataSource::Directory(dir) => dir.join(path).display().to_string(),
            DataSource::Remote { base_url, .. } => {
                format!("{}/{}", base_url, path.trim_start_matches('/'))
            }
        }
    }

    /// Fetch a resource as text
    pub async fn fetch(&self, path: &str) -> Result<String, LoadError> {
        let location = self.describe(path);
        tracing::debug!("Fetching {}", location);

        match self {
            DataSource::Directory(dir) => {
                let file = dir.join(path);
                match tokio::fs::read_to_string(&file).await {
                    Ok(text) => Ok(text),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        Err(LoadError::NotFound(location))
                    }
                    Err(source) => Err(LoadError::Io {
                        path: location,
                        source,
                    }),
                }
            }
            DataSource::Remote { client, .. } => {
                let response = client
                    .get(&location)
                    .send()
                    .await
                    .map_err(|source| LoadError::Http {
                        path: location.clone(),
                        source,
                    })?;

                let status = response.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(LoadError::NotFound(location));
                }
                if !status.is_success() {
                    return Err(LoadError::Status {
                        path: location,
                        status: status.as_u16(),
                    });
                }

                response.text().await.map_err(|source| LoadError::Http {
                    path: location,
                    source,
                })
            }
        }
    }
}

/// Where a loaded collection came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOrigin {
    /// The configured data source
    Source,
    /// The built-in samples, because the source could not be used
    Fallback { reason: String },
}

/// Result of a load: the sorted posts and their origin
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub posts: Vec<Post>,
    pub origin: PostOrigin,
}

impl LoadOutcome {
    fn from_source(posts: Vec<Post>) -> Self {
        Self {
            posts,
            origin: PostOrigin::Source,
        }
    }

    /// Whether the built-in samples were substituted
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, PostOrigin::Fallback { .. })
    }
}

/// Loads and orders post records
#[derive(Debug, Clone)]
pub struct PostLoader {
    source: DataSource,
    settings: SourceConfig,
}

impl PostLoader {
    /// Create a loader for a source with the given layout settings
    pub fn new(source: DataSource, settings: SourceConfig) -> Self {
        Self { source, settings }
    }

    /// Load posts using the configured mode.
    ///
    /// Bundle mode never fails (it falls back to the samples); indexed mode
    /// reports any failure as a single error.
    pub async fn load(&self) -> Result<LoadOutcome, LoadError> {
        match self.settings.mode {
            SourceMode::Bundle => Ok(self.load_bundle().await),
            SourceMode::Indexed => self.load_indexed().await.map(LoadOutcome::from_source),
        }
    }

    /// Load the single bundle file, substituting samples on any failure
    pub async fn load_bundle(&self) -> LoadOutcome {
        match self.try_load_bundle().await {
            Ok(posts) => {
                tracing::info!(
                    "Loaded {} posts from {}",
                    posts.len(),
                    self.source.describe(&self.settings.bundle_path)
                );
                LoadOutcome::from_source(finalize(posts))
            }
            Err(e) => {
                tracing::warn!("Using built-in sample posts: {}", e);
                LoadOutcome {
                    posts: finalize(sample_posts()),
                    origin: PostOrigin::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    async fn try_load_bundle(&self) -> Result<Vec<Post>, LoadError> {
        let path = &self.settings.bundle_path;
        let text = self.source.fetch(path).await?;
        let bundle: PostBundle =
            serde_json::from_str(&text).map_err(|source| LoadError::Parse {
                path: self.source.describe(path),
                source,
            })?;
        Ok(bundle.posts)
    }

    /// Load the index file, then every listed post file concurrently.
    ///
    /// Any failure discards whatever was already fetched.
    pub async fn load_indexed(&self) -> Result<Vec<Post>, LoadError> {
        let index_path = &self.settings.index_path;
        let text = self.source.fetch(index_path).await?;
        let names: Vec<String> =
            serde_json::from_str(&text).map_err(|source| LoadError::Parse {
                path: self.source.describe(index_path),
                source,
            })?;

        let paths = names
            .iter()
            .map(|name| entry_path(&self.settings.posts_dir, name))
            .collect::<Result<Vec<_>, _>>()?;

        let handles: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let source = self.source.clone();
                tokio::spawn(async move { fetch_post(&source, &path).await })
            })
            .collect();

        let mut posts = Vec::with_capacity(handles.len());
        let mut pending = handles.into_iter();
        while let Some(handle) = pending.next() {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(LoadError::Task(e.to_string())),
            };
            match result {
                Ok(post) => posts.push(post),
                Err(e) => {
                    for rest in pending {
                        rest.abort();
                    }
                    tracing::error!("Failed to load posts: {}", e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Loaded {} posts listed in {}",
            posts.len(),
            self.source.describe(index_path)
        );
        Ok(finalize(posts))
    }
}

async fn fetch_post(source: &DataSource, path: &str) -> Result<Post, LoadError> {
    let text = source.fetch(path).await?;
    serde_json::from_str(&text).map_err(|source_err| LoadError::Parse {
        path: source.describe(path),
        source: source_err,
    })
}

/// Join an index entry onto the posts directory, rejecting escapes
fn entry_path(posts_dir: &str, name: &str) -> Result<String, LoadError> {
    let candidate = Path::new(name);
    let escapes = name.trim().is_empty()
        || candidate
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(LoadError::InvalidEntry(name.to_string()));
    }

    let dir = posts_dir.trim_matches('/');
    if dir.is_empty() {
        Ok(name.to_string())
    } else {
        Ok(format!("{}/{}", dir, name))
    }
}

/// Derive missing slugs, flag duplicate ids and sort newest first
fn finalize(mut posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    for post in posts.iter_mut() {
        post.ensure_slug();
        if !seen.insert(post.id) {
            tracing::warn!("Duplicate post id {} ({:?})", post.id, post.title);
        }
        if post.date_key().is_none() {
            tracing::warn!(
                "Post {} has an unreadable date {:?}, ordering it last",
                post.id,
                post.date
            );
        }
    }

    sort_by_date_desc(&mut posts);
    posts
}
