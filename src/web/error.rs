use std::any::Any;
use std::fmt::Display;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::utils::http::timestamp;

const NOT_FOUND_MESSAGE: &str = "Endpoint not found";
const FAULT_MESSAGE: &str = "Internal server error";

/// Internal detail of a failed request. Carried in the response extensions
/// so the access-log middleware can report it, never serialized.
#[derive(Debug, Clone)]
pub struct FaultDetail(pub String);

#[derive(Debug)]
pub enum ApiError {
    NotFound { path: String, method: Method },
    Internal(anyhow::Error),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound { path, method } => write!(f, "No route for {} {}", method, path),
            ApiError::Internal(e) => write!(f, "{:#}", e),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal(error)
    }
}

#[derive(Debug, Serialize)]
struct NotFoundBody {
    error: &'static str,
    path: String,
    method: String,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct FaultBody {
    error: &'static str,
    timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { path, method } => (
                StatusCode::NOT_FOUND,
                Json(NotFoundBody {
                    error: NOT_FOUND_MESSAGE,
                    path,
                    method: method.to_string(),
                    timestamp: timestamp(),
                }),
            )
                .into_response(),
            ApiError::Internal(e) => {
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FaultBody {
                        error: FAULT_MESSAGE,
                        timestamp: timestamp(),
                    }),
                )
                    .into_response();
                response
                    .extensions_mut()
                    .insert(FaultDetail(format!("{:#}", e)));
                response
            }
        }
    }
}

/// Turns a caught handler panic into the generic 500 response.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(anyhow::anyhow!("Handler panicked: {}", detail)).into_response()
}
