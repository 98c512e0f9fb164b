use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{Any, CorsLayer};

use super::body::{RequestBody, BODY_LIMIT};
use super::error::{ApiError, FaultDetail};
use crate::utils::http::{headers_to_json, pretty, timestamp};
use crate::AppContext;

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Logs every request before it is dispatched, parses the body once and
/// hands it to the handlers as a [`RequestBody`] extension. Faults reported
/// by the inner service are written to the operator error stream.
pub async fn access_log(
    State(ctx): State<Arc<AppContext>>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    ctx.log.info(&format!("{} - {} {}", timestamp(), parts.method, parts.uri.path()));
    ctx.log.info(&format!("Headers: {}", pretty(&headers_to_json(&parts.headers))));

    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let response = ApiError::Internal(anyhow::anyhow!("Failed to read request body: {}", e))
                .into_response();
            return report_fault(&ctx, response);
        }
    };

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let request_body = match RequestBody::parse(content_type, &bytes) {
        Ok(request_body) => request_body,
        Err(e) => {
            // Accepted anyway, handlers see no body.
            ctx.log.error(&format!("{} - Ignoring request body: {:#}", timestamp(), e));
            RequestBody::default()
        }
    };

    if request_body.has_content() {
        ctx.log.info(&format!("Body: {}", request_body.pretty()));
    }

    parts.extensions.insert(request_body);
    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    report_fault(&ctx, response)
}

fn report_fault(ctx: &AppContext, response: Response) -> Response {
    if let Some(FaultDetail(detail)) = response.extensions().get::<FaultDetail>() {
        ctx.log.error(&format!("{} - API error: {}", timestamp(), detail));
    }
    response
}
