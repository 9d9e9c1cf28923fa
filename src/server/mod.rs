//! Read-only JSON API over the blog content

pub mod pages;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{BlogStats, Category, ContentError, MarkdownRenderer, Post};
use crate::Blog;
use pages::Page;

/// Server state
struct ServerState {
    blog: Blog,
    renderer: MarkdownRenderer,
}

/// An error response. Details are logged, never sent to the client.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Not found",
        }
    }

    fn internal(message: &'static str, cause: impl Display) -> Self {
        tracing::error!("{}: {}", message, cause);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Build the API router
pub fn router(blog: Blog) -> Router {
    let state = Arc::new(ServerState {
        renderer: blog.renderer(),
        blog,
    });

    Router::new()
        .route("/api/blog/categories", get(categories_handler))
        .route("/api/blog/posts", get(posts_handler))
        .route("/api/blog/posts/:category", get(category_handler))
        .route("/api/blog/posts/:category/*rest", get(page_handler))
        .route("/api/blog/stats", get(stats_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(blog: Blog, ip: &str, port: u16) -> Result<()> {
    let title = blog.config.title.clone();
    let content_dir = blog.content_dir.clone();
    let app = router(blog);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!(
        "Serving {} ({:?}) at http://{}:{}/api/blog",
        title, content_dir, ip, port
    );
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a filesystem query off the async runtime
async fn blocking<T, F>(
    state: &Arc<ServerState>,
    message: &'static str,
    query: F,
) -> Result<T, ApiError>
where
    F: FnOnce(&ServerState) -> Result<T, ContentError> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    match tokio::task::spawn_blocking(move || query(&state)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ApiError::internal(message, e)),
        Err(e) => Err(ApiError::internal(message, e)),
    }
}

async fn categories_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = blocking(&state, "Failed to load categories", |s| {
        s.blog.categories()
    })
    .await?;
    Ok(Json(categories))
}

async fn posts_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = blocking(&state, "Failed to load posts", |s| s.blog.published_posts()).await?;
    Ok(Json(posts))
}

async fn category_handler(
    State(state): State<Arc<ServerState>>,
    Path(category): Path<String>,
) -> Result<Json<Page>, ApiError> {
    blocking(&state, "Failed to load category", move |s| {
        pages::category_page(&s.blog, &category)
    })
    .await?
    .map(Json)
    .ok_or_else(ApiError::not_found)
}

async fn page_handler(
    State(state): State<Arc<ServerState>>,
    Path((category, rest)): Path<(String, String)>,
) -> Result<Json<Page>, ApiError> {
    blocking(&state, "Failed to load post", move |s| {
        let segments: Vec<&str> = rest.split('/').filter(|seg| !seg.is_empty()).collect();
        pages::resolve(&s.blog, &s.renderer, &category, &segments)
    })
    .await?
    .map(Json)
    .ok_or_else(ApiError::not_found)
}

async fn stats_handler(State(state): State<Arc<ServerState>>) -> Result<Json<BlogStats>, ApiError> {
    let today = Local::now().date_naive();
    let stats = blocking(&state, "Failed to load stats", move |s| s.blog.stats(today)).await?;
    Ok(Json(stats))
}
