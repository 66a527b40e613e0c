// src/server/routes.rs
use crate::content::Section;
use crate::locale::Lang;
use crate::server::error::ApiError;
use crate::server::pages::{render, template_path};
use crate::server::AppState;
use crate::settings::Mode;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

pub async fn pt_page(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    page(&state, Lang::PtBr).await
}

pub async fn en_page(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    page(&state, Lang::En).await
}

/// Production serves the pages rendered at startup; development re-reads the
/// template on every request so edits show up without a restart.
async fn page(state: &AppState, lang: Lang) -> Result<Response, ApiError> {
    let html = if state.settings.mode.is_dev() {
        let path = template_path(&state.settings.pages_dir(), lang);
        let template = tokio::fs::read_to_string(&path).await.map_err(|e| {
            warn!("Failed to read page {}: {}", path.display(), e);
            ApiError::PageUnavailable {
                lang,
                reason: format!("failed to read {}", path.display()),
            }
        })?;
        render(&template, lang, &state.content)
    } else {
        state
            .pages
            .get(lang)
            .map_err(|reason| ApiError::PageUnavailable {
                lang,
                reason: reason.to_string(),
            })?
            .to_string()
    };

    let mut response = Html(html).into_response();
    if state.settings.mode.is_dev() {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    Ok(response)
}

pub async fn locale_data(
    State(state): State<Arc<AppState>>,
    Path((locale, section)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let lang = Lang::from_tag(&locale).ok_or(ApiError::NotFound)?;
    let section = Section::from_name(&section).ok_or(ApiError::NotFound)?;

    match state.content.section(lang, section) {
        Some(data) => Ok(Json(data).into_response()),
        None => {
            let reason = state
                .content
                .failure(lang)
                .map_or_else(|| "content was not loaded".to_string(), |f| f.message.clone());
            Err(ApiError::DataUnavailable {
                lang,
                section,
                reason,
            })
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub mode: Mode,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        mode: state.settings.mode,
    })
}

pub async fn index_redirect() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, HeaderValue::from_static("/"))],
    )
}
