use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use arxiv_finder_core::CoreError;

/// Fields posted by the search form.
#[derive(Debug, Deserialize)]
pub struct FindForm {
    pub title: Option<String>,
}

/// Errors surfaced to the browser as a bare status page.
#[derive(Debug)]
pub enum AppError {
    MissingTitle,
    Lookup(CoreError),
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Lookup(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingTitle => {
                (StatusCode::BAD_REQUEST, "Missing form field: title").into_response()
            }
            AppError::Lookup(e) => {
                tracing::error!(error = %e, "lookup failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
