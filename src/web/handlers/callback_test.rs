use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::not_found;
use crate::utils::http::timestamp;
use crate::web::RequestBody;
use crate::AppContext;

/// Manual integration check: whatever is posted to `/test` comes back.
pub fn callback_router() -> Router<Arc<AppContext>> {
    Router::new().route("/test", post(echo).fallback(not_found))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    pub success: bool,
    pub message: &'static str,
    pub data_received: Value,
    pub timestamp: String,
}

async fn echo(
    State(ctx): State<Arc<AppContext>>,
    Extension(body): Extension<RequestBody>,
) -> Json<EchoResponse> {
    ctx.log.info("POSTMAN TEST:");
    ctx.log.info(&format!("Body received: {}", body.pretty()));

    Json(EchoResponse {
        success: true,
        message: "Test completed successfully!",
        data_received: body.into_value().unwrap_or_else(|| Value::Object(Map::new())),
        timestamp: timestamp(),
    })
}
