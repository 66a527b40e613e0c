//! HTTP edge: per-locale pages, JSON data endpoints, health check and a
//! static-file fallback.

pub mod error;
pub mod pages;
pub mod routes;
pub mod static_files;

use crate::content::ContentStore;
use crate::locale::Lang;
use crate::server::pages::PageCache;
use crate::settings::Settings;
use anyhow::{Context, Result};
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything loaded at startup. Never mutated afterwards.
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub content: Arc<ContentStore>,
    pub pages: PageCache,
}

impl AppState {
    pub fn load(settings: Settings) -> Self {
        let content = Arc::new(ContentStore::load(&settings.data_dir()));
        let pages = PageCache::load(&settings.pages_dir(), &content);
        Self {
            settings,
            content,
            pages,
        }
    }

    /// Startup failures, one line each, for the warning output.
    pub fn startup_errors(&self) -> Vec<String> {
        let content_errors = self
            .content
            .errors()
            .iter()
            .map(|failure| format!("{} content: {}", failure.lang, failure.message));
        let page_errors = self
            .pages
            .errors()
            .map(|(lang, message)| format!("{} page: {}", lang, message));
        content_errors.chain(page_errors).collect()
    }

    pub fn static_cache_control(&self) -> &'static str {
        if self.settings.mode.is_dev() {
            "no-store"
        } else {
            "public, max-age=3600"
        }
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    debug!("{} {} -> {}", method, path, response.status().as_u16());
    response
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::pt_page))
        .route("/en", get(routes::en_page))
        .route("/en/", get(routes::en_page))
        .route("/api/data/{locale}/{section}", get(routes::locale_data))
        .route("/api/health", get(routes::health))
        .route("/index.html", get(routes::index_redirect))
        .fallback(static_files::fallback)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

pub async fn serve(settings: Settings) -> Result<()> {
    info!("Starting server in {} mode...", settings.mode);
    let state = Arc::new(AppState::load(settings));
    for startup_error in state.startup_errors() {
        warn!("Startup error: {}", startup_error);
    }

    let bind_addr = state.settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    let local_addr = listener.local_addr().context("Failed to read local address")?;

    let base_url = format!("http://{}", local_addr);
    info!("Server running at {}/", base_url);
    for lang in Lang::ALL {
        info!("{}: {}{}", lang, base_url, pages::page_route(lang));
    }
    if state.settings.mode.is_dev() {
        info!("Development mode: pages are re-rendered from disk on every request");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    info!("Server stopped");
    Ok(())
}
