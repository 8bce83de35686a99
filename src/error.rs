// src/error.rs
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::repository::RepositoryError;
use crate::templates::NOT_FOUND_PAGE;

/// Failures a request handler can end in.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
