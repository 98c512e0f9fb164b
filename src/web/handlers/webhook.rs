use axum::{extract::State, http::HeaderMap, routing::post, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use super::not_found;
use crate::utils::http::{headers_to_json, pretty, timestamp};
use crate::web::RequestBody;
use crate::webhook::PaymentSummary;
use crate::AppContext;

const SEPARATOR_WIDTH: usize = 50;

pub fn webhook_router() -> Router<Arc<AppContext>> {
    Router::new()
        .route("/webhook", post(receive_webhook).fallback(not_found))
        .route("/webhook/santander", post(receive_santander).fallback(not_found))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
    pub success: bool,
    pub message: &'static str,
    pub received_at: String,
    pub data_received: bool,
}

#[derive(Debug, Serialize)]
pub struct SantanderAck {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
}

// Primary receiver
async fn receive_webhook(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Extension(body): Extension<RequestBody>,
) -> Json<WebhookAck> {
    let log = &ctx.log;
    let separator = "=".repeat(SEPARATOR_WIDTH);

    log.info("WEBHOOK RECEIVED FROM SANTANDER:");
    log.info(&separator);
    log.info(&format!("Timestamp: {}", timestamp()));
    log.info(&format!("Headers: {}", pretty(&headers_to_json(&headers))));
    log.info(&format!("Payload: {}", body.pretty()));
    log.info(&separator);

    let summary = PaymentSummary::from_body(body.value());
    log.info("PROCESSED DATA:");
    for line in summary.lines() {
        log.info(&line);
    }

    Json(WebhookAck {
        success: true,
        message: "Webhook received successfully",
        received_at: timestamp(),
        data_received: body.is_present(),
    })
}

// Alternate endpoint, no field extraction
async fn receive_santander(
    State(ctx): State<Arc<AppContext>>,
    Extension(body): Extension<RequestBody>,
) -> Json<SantanderAck> {
    ctx.log.info("SANTANDER WEBHOOK (alternate endpoint):");
    ctx.log.info(&format!("Payload: {}", body.pretty()));

    Json(SantanderAck {
        success: true,
        message: "Santander webhook received",
        timestamp: timestamp(),
    })
}
