//! HTTP routes

pub mod api;
pub mod calculator;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Build the application router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calculator::page))
        .route("/api/health", get(api::health))
        .route("/api/sessions", post(api::create_session))
        .route("/api/sessions/:id/category", post(api::select_category))
        .route(
            "/api/sessions/:id/manufacturer",
            post(api::select_manufacturer),
        )
        .route("/api/sessions/:id/model", post(api::select_model))
        .route("/api/sessions/:id/model-year", post(api::select_model_year))
        .route("/api/sessions/:id/region", post(api::select_region))
        .route("/api/sessions/:id/estimate", post(api::estimate))
}
