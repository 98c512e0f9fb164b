use axum::Json;
use serde::Serialize;

use crate::utils::http::timestamp;

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub webhook: &'static str,
    pub test: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub message: &'static str,
    pub timestamp: String,
    pub endpoints: Endpoints,
}

pub async fn index() -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        message: "Santander Webhook API is running!",
        timestamp: timestamp(),
        endpoints: Endpoints {
            webhook: "/webhook",
            test: "/test",
        },
    })
}
