use axum::{extract::OriginalUri, http::Method, routing::get, Router};
use std::sync::Arc;

use crate::web::ApiError;
use crate::AppContext;

pub mod callback_test;
pub mod index;
pub mod status;
pub mod webhook;

pub fn router() -> Router<Arc<AppContext>> {
    Router::new()
        .route("/", get(index::index).fallback(not_found))
        .route("/status", get(status::status).fallback(not_found))
        .merge(webhook::webhook_router())
        .merge(callback_test::callback_router())
        .fallback(not_found)
}

/// Catch-all for unknown paths and for known paths hit with the wrong method.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    ApiError::NotFound { path, method }
}
