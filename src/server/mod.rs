//! Live server: every request derives a fresh listing state from the loaded posts

use anyhow::Result;
use axum::{
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::admin::{parse_tags, PostDraft};
use crate::config::SiteConfig;
use crate::content::{Post, PostBundle, PostOrigin};
use crate::helpers::today;
use crate::listing::{BlogState, FilterState};
use crate::templates::{SiteData, TemplateRenderer};
use crate::view::{AdminView, HomeView, Links, NavView, PostDetail, ServerLinks};
use crate::Blog;

/// Shown after a contact form submission
pub const CONTACT_ACK: &str = "Thank you for reaching out! (This demo does not send real emails.)";

/// Server state, shared by all requests
pub struct ServerState {
    posts: Arc<[Post]>,
    config: SiteConfig,
    site: SiteData,
    renderer: TemplateRenderer,
    load_error: Option<String>,
}

impl ServerState {
    pub fn new(config: SiteConfig, posts: Arc<[Post]>, load_error: Option<String>) -> Result<Self> {
        Ok(Self {
            posts,
            site: SiteData::from_config(&config),
            config,
            renderer: TemplateRenderer::new()?,
            load_error,
        })
    }

    /// Load posts once; a failed load is kept as the message the list shows
    pub async fn load(blog: &Blog) -> Result<Self> {
        let (posts, load_error) = match blog.load_posts().await {
            Ok(outcome) => {
                if let PostOrigin::Fallback { reason } = &outcome.origin {
                    println!("Serving sample posts ({})", reason);
                }
                (Arc::from(outcome.posts), None)
            }
            Err(e) => {
                tracing::error!("Failed to load posts: {:#}", e);
                (
                    Arc::from(Vec::new()),
                    Some(format!("Failed to load blog posts: {}", e)),
                )
            }
        };

        Self::new(blog.config.clone(), posts, load_error)
    }

    fn links(&self) -> ServerLinks {
        ServerLinks::new(&self.config.root)
    }
}

/// Build the application router, mounted under the configured `root`
pub fn router(state: Arc<ServerState>, static_dir: &Path) -> Router {
    let routes = Router::new()
        .route("/", get(home_handler))
        .route("/post/:id", get(post_handler))
        .route("/admin", get(admin_form_handler).post(admin_submit_handler))
        .route("/contact", get(contact_form_handler).post(contact_submit_handler))
        .route("/api/posts", get(posts_api_handler))
        .fallback_service(ServeDir::new(static_dir));

    let mount = mount_path(&state.config.root);
    let app = if mount == "/" {
        routes
    } else {
        // `/blog` without the slash goes to the home page
        let home = mount.clone();
        Router::new()
            .nest(&mount, routes)
            .route(
                mount.trim_end_matches('/'),
                get(move || async move { Redirect::permanent(&home) }),
            )
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// `root` as a nest path: `/` or `/<segments>/`
fn mount_path(root: &str) -> String {
    let trimmed = root.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState::load(blog).await?);
    let app = router(state, &blog.static_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `/?q=..&tags=a,b&page=N`; `tags` may also repeat
#[derive(Debug, Default, PartialEq)]
struct ListQuery {
    q: String,
    tags: Vec<String>,
    /// Kept as text so a malformed page falls back to page 1
    page: Option<String>,
}

impl ListQuery {
    /// The last `q` and `page` win; every `tags` value is split on commas
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" => query.q = value,
                "tags" => query.tags.extend(parse_tags(&value)),
                "page" => query.page = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Name and email are accepted by the form but never read
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactForm {
    message: String,
}

async fn home_handler(
    State(state): State<Arc<ServerState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = ListQuery::from_pairs(pairs);
    let links = state.links();

    let view = match &state.load_error {
        Some(message) => HomeView::error(message.clone(), &links),
        None => {
            let mut blog = BlogState::new(Arc::clone(&state.posts), state.config.per_page);
            blog.apply_filter(FilterState::new(&query.q, query.tags));
            if let Some(page) = query.page.and_then(|p| p.trim().parse().ok()) {
                blog.go_to_page(page);
            }
            HomeView::build(&blog, &links)
        }
    };

    html_response(
        state
            .renderer
            .render_home(&state.site, &NavView::new(&links), &view),
    )
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    UrlPath(id): UrlPath<String>,
) -> Response {
    let links = state.links();
    let blog = BlogState::new(Arc::clone(&state.posts), state.config.per_page);
    let post = id.parse::<u64>().ok().and_then(|id| blog.find(id));

    match post {
        Some(post) => html_response(state.renderer.render_post(
            &state.site,
            &NavView::new(&links),
            &PostDetail::build(post, &links),
        )),
        None => {
            tracing::debug!("No post with id {:?}", id);
            Redirect::to(&links.home()).into_response()
        }
    }
}

async fn admin_form_handler(State(state): State<Arc<ServerState>>) -> Response {
    let links = state.links();
    html_response(
        state
            .renderer
            .render_admin(&state.site, &NavView::new(&links), &AdminView::default()),
    )
}

async fn admin_submit_handler(
    State(state): State<Arc<ServerState>>,
    Form(draft): Form<PostDraft>,
) -> Response {
    let links = state.links();
    let admin = AdminView::submit(draft, &state.posts, today(&state.config.timezone));
    html_response(
        state
            .renderer
            .render_admin(&state.site, &NavView::new(&links), &admin),
    )
}

async fn contact_form_handler(State(state): State<Arc<ServerState>>) -> Response {
    let links = state.links();
    html_response(
        state
            .renderer
            .render_contact(&state.site, &NavView::new(&links), None),
    )
}

async fn contact_submit_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<ContactForm>,
) -> Response {
    tracing::debug!("Contact form submitted ({} chars)", form.message.chars().count());

    let links = state.links();
    html_response(state.renderer.render_contact(
        &state.site,
        &NavView::new(&links),
        Some(CONTACT_ACK),
    ))
}

async fn posts_api_handler(State(state): State<Arc<ServerState>>) -> Response {
    if let Some(message) = &state.load_error {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response();
    }

    Json(PostBundle {
        posts: state.posts.to_vec(),
    })
    .into_response()
}

fn html_response(rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn posts() -> Arc<[Post]> {
        (1..=6u64)
            .rev()
            .map(|id| {
                Post::new(id, format!("Entry {}", id), format!("2024-01-{:02}", id))
                    .with_excerpt(format!("Excerpt {}", id))
                    .with_content(format!("Body of entry {}", id))
                    .with_tags(if id % 2 == 0 { vec!["even"] } else { vec!["odd"] })
            })
            .collect::<Vec<_>>()
            .into()
    }

    async fn spawn(state: ServerState, static_dir: &Path) -> String {
        let app = router(Arc::new(state), static_dir);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_default() -> (String, TempDir) {
        let dir = TempDir::new().unwrap();
        let state = ServerState::new(SiteConfig::default(), posts(), None).unwrap();
        let base = spawn(state, dir.path()).await;
        (base, dir)
    }

    async fn get_text(url: &str) -> String {
        reqwest::get(url).await.unwrap().text().await.unwrap()
    }

    #[tokio::test]
    async fn test_home_pages() {
        let (base, _dir) = spawn_default().await;

        let first = get_text(&format!("{}/", base)).await;
        assert!(first.contains("Entry 6"));
        assert!(first.contains("Entry 2"));
        assert!(!first.contains("Entry 1<"));

        let second = get_text(&format!("{}/?page=2", base)).await;
        assert!(second.contains("Entry 1"));
        assert!(!second.contains("Entry 6"));

        // out of range and malformed pages stay on page 1
        let past = get_text(&format!("{}/?page=9", base)).await;
        assert!(past.contains("Entry 6"));
        let bad = get_text(&format!("{}/?page=abc", base)).await;
        assert!(bad.contains("Entry 6"));
    }

    #[tokio::test]
    async fn test_home_filters() {
        let (base, _dir) = spawn_default().await;

        let odd = get_text(&format!("{}/?tags=odd", base)).await;
        assert!(odd.contains("Entry 5"));
        assert!(!odd.contains("Entry 6"));

        let query = get_text(&format!("{}/?q=ENTRY%203", base)).await;
        assert!(query.contains("Entry 3"));
        assert!(!query.contains("Entry 4"));

        let none = get_text(&format!("{}/?q=nothing", base)).await;
        assert!(none.contains("No posts found"));

        let repeated = reqwest::get(format!("{}/?tags=odd&tags=even", base)).await.unwrap();
        assert_eq!(repeated.status(), reqwest::StatusCode::OK);
        let html = repeated.text().await.unwrap();
        assert!(html.contains("Entry 5"));
        assert!(html.contains("Entry 6"));
    }

    #[test]
    fn test_list_query_from_pairs() {
        let pair = |k: &str, v: &str| (k.to_string(), v.to_string());
        let query = ListQuery::from_pairs(vec![
            pair("tags", "a, b"),
            pair("q", "first"),
            pair("tags", "c"),
            pair("q", "rust"),
            pair("page", "2"),
            pair("other", "x"),
        ]);
        assert_eq!(
            query,
            ListQuery {
                q: "rust".to_string(),
                tags: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                page: Some("2".to_string()),
            }
        );
        assert_eq!(ListQuery::from_pairs(Vec::new()), ListQuery::default());
    }

    #[test]
    fn test_mount_path() {
        assert_eq!(mount_path("/"), "/");
        assert_eq!(mount_path(""), "/");
        assert_eq!(mount_path("/blog/"), "/blog/");
        assert_eq!(mount_path("/blog"), "/blog/");
        assert_eq!(mount_path("notes/2024"), "/notes/2024/");
    }

    #[tokio::test]
    async fn test_routes_under_root() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css").join("style.css"), "body {}").unwrap();
        let config = SiteConfig {
            root: "/blog/".to_string(),
            ..SiteConfig::default()
        };
        let state = ServerState::new(config, posts(), None).unwrap();
        let base = spawn(state, dir.path()).await;

        let home = reqwest::get(format!("{}/blog/", base)).await.unwrap();
        assert_eq!(home.status(), reqwest::StatusCode::OK);
        let html = home.text().await.unwrap();
        assert!(html.contains("href=\"/blog/post/6\""));
        assert!(html.contains("/blog/css/style.css"));

        let filtered = get_text(&format!("{}/blog/?tags=odd", base)).await;
        assert!(filtered.contains("Entry 5"));
        assert!(!filtered.contains("Entry 6"));

        let post = get_text(&format!("{}/blog/post/6", base)).await;
        assert!(post.contains("id=\"post-detail\""));

        let admin = reqwest::get(format!("{}/blog/admin", base)).await.unwrap();
        assert_eq!(admin.status(), reqwest::StatusCode::OK);
        let api = reqwest::get(format!("{}/blog/api/posts", base)).await.unwrap();
        assert_eq!(api.status(), reqwest::StatusCode::OK);
        assert_eq!(get_text(&format!("{}/blog/css/style.css", base)).await, "body {}");

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();
        let resp = client.get(format!("{}/blog/post/99", base)).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], "/blog/");
        let resp = client.get(format!("{}/blog", base)).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::PERMANENT_REDIRECT);
        assert_eq!(resp.headers()["location"], "/blog/");

        // nothing is served outside the root
        let outside = reqwest::get(format!("{}/post/6", base)).await.unwrap();
        assert_eq!(outside.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_detail_and_redirect() {
        let (base, _dir) = spawn_default().await;

        let html = get_text(&format!("{}/post/3", base)).await;
        assert!(html.contains("id=\"post-detail\""));
        assert!(html.contains("<p>Body of entry 3</p>"));

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();
        for path in ["/post/99", "/post/abc"] {
            let resp = client.get(format!("{}{}", base, path)).send().await.unwrap();
            assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
            assert_eq!(resp.headers()["location"], "/");
        }
    }

    #[tokio::test]
    async fn test_admin_submit() {
        let (base, _dir) = spawn_default().await;
        let client = reqwest::Client::new();

        let form = get_text(&format!("{}/admin", base)).await;
        assert!(form.contains("id=\"admin-form\""));

        let html = client
            .post(format!("{}/admin", base))
            .form(&[("title", "Brand New"), ("tags", "a, b")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains("&quot;id&quot;: 7"));
        assert!(html.contains("&quot;slug&quot;: &quot;brand-new&quot;"));

        let html = client
            .post(format!("{}/admin", base))
            .form(&[("title", "  ")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains("a post needs a title"));
    }

    #[tokio::test]
    async fn test_contact_acknowledges() {
        let (base, _dir) = spawn_default().await;
        let html = reqwest::Client::new()
            .post(format!("{}/contact", base))
            .form(&[("name", "Ann"), ("email", "ann@example.com"), ("message", "Hi")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains(CONTACT_ACK));

        // a bare submission is acknowledged the same way
        let resp = reqwest::Client::new()
            .post(format!("{}/contact", base))
            .form(&[("message", "")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert!(resp.text().await.unwrap().contains(CONTACT_ACK));
    }

    #[tokio::test]
    async fn test_posts_api() {
        let (base, _dir) = spawn_default().await;
        let body = get_text(&format!("{}/api/posts", base)).await;
        let bundle: PostBundle = serde_json::from_str(&body).unwrap();

        let ids: Vec<u64> = bundle.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("hello.txt"), "hi there").unwrap();
        let state = ServerState::new(SiteConfig::default(), posts(), None).unwrap();
        let base = spawn(state, dir.path()).await;

        assert_eq!(get_text(&format!("{}/hello.txt", base)).await, "hi there");
        let missing = reqwest::get(format!("{}/nope.txt", base)).await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_load_error_replaces_list() {
        let dir = TempDir::new().unwrap();
        let state = ServerState::new(
            SiteConfig::default(),
            Arc::from(Vec::new()),
            Some("Failed to load blog posts: index missing".to_string()),
        )
        .unwrap();
        let base = spawn(state, dir.path()).await;

        let html = get_text(&format!("{}/", base)).await;
        assert!(html.contains("<h3>Error</h3>"));
        assert!(html.contains("Failed to load blog posts: index missing"));

        let resp = reqwest::get(format!("{}/api/posts", base)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_load_falls_back_to_samples() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let state = ServerState::load(&blog).await.unwrap();

        assert!(state.load_error.is_none());
        assert_eq!(state.posts.len(), 3);
    }
}
