// src/server/error.rs
use crate::content::Section;
use crate::locale::Lang;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,
    #[error("{section} data for '{lang}' is unavailable: {reason}")]
    DataUnavailable {
        lang: Lang,
        section: Section,
        reason: String,
    },
    #[error("page for '{lang}' is unavailable: {reason}")]
    PageUnavailable { lang: Lang, reason: String },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            ApiError::DataUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody {
                    error: "Data unavailable",
                    message: self.to_string(),
                }),
            )
                .into_response(),
            ApiError::PageUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string()).into_response()
            }
        }
    }
}
