//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::fipe::LookupError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Unknown region code: {0}")]
    UnknownRegion(String),

    #[error("{stage} lookup failed: {source}")]
    Lookup {
        stage: &'static str,
        #[source]
        source: LookupError,
    },

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, stage) = match &self {
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, None),
            AppError::UnknownRegion(_) => (StatusCode::UNPROCESSABLE_ENTITY, None),
            AppError::Lookup { stage, source } => {
                tracing::error!(stage, error = %source, "FIPE lookup failed");
                (StatusCode::BAD_GATEWAY, Some(*stage))
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        // The stage field lets the page flag exactly which dropdown failed.
        let body = Json(json!({
            "error": self.to_string(),
            "stage": stage,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
