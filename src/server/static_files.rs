// src/server/static_files.rs
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::utils::path::join_confined;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

const PUBLIC_PREFIX: &str = "/public/";
const CNAME_ROUTE: &str = "/CNAME";

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("css", "text/css; charset=utf-8"),
    ("js", "text/javascript; charset=utf-8"),
    ("mjs", "text/javascript; charset=utf-8"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("webmanifest", "application/manifest+json"),
    ("xml", "application/xml"),
    ("txt", "text/plain; charset=utf-8"),
    ("pdf", "application/pdf"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("ico", "image/x-icon"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
];

/// Content type by file extension, case-insensitive.
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(DEFAULT_CONTENT_TYPE, |(_, content_type)| *content_type)
}

/// Handles every path the route table does not: public assets, the CNAME
/// file, then 404.
pub async fn fallback(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path();

    if let Some(relative) = path.strip_prefix(PUBLIC_PREFIX) {
        let public_dir = state.settings.public_dir();
        match join_confined(&public_dir, relative) {
            Some(file_path) => {
                if let Some(response) = serve_file(&state, &file_path, content_type_for(&file_path)).await {
                    return response;
                }
            }
            None => warn!("Rejected public path outside of {}: {}", public_dir.display(), path),
        }
    }

    if path == CNAME_ROUTE {
        let cname_path = state.settings.cname_path();
        if let Some(response) = serve_file(&state, &cname_path, "text/plain; charset=utf-8").await {
            return response;
        }
    }

    ApiError::NotFound.into_response()
}

async fn serve_file(state: &AppState, file_path: &Path, content_type: &'static str) -> Option<Response> {
    if !tokio::fs::metadata(file_path).await.ok()?.is_file() {
        return None;
    }
    match tokio::fs::read(file_path).await {
        Ok(bytes) => {
            debug!("Serving {} as {}", file_path.display(), content_type);
            Some(
                (
                    StatusCode::OK,
                    [
                        (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
                        (
                            header::CACHE_CONTROL,
                            HeaderValue::from_static(state.static_cache_control()),
                        ),
                    ],
                    bytes,
                )
                    .into_response(),
            )
        }
        Err(e) => {
            warn!("Failed to read {}: {}", file_path.display(), e);
            None
        }
    }
}
