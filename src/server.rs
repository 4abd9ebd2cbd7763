//! Axum surface decorating the gateway as HTTP.
//!
//! Routes mirror the service contract: a health probe, the two forwarding
//! operations, and a diagnostic echo. Gateway errors become response statuses
//! here and nowhere else.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AllowedOrigins;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::types::{CompletionReply, CompletionRequest, ImageCompletionRequest};

/// Builds the application router over a shared gateway.
pub fn router(gateway: Arc<Gateway>, allowed_origins: &AllowedOrigins) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/completion", post(completion_handler))
        .route("/image-recognition", post(image_recognition_handler))
        .route("/items/{item_id}", get(read_item_handler))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

fn cors_layer(allowed_origins: &AllowedOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    match allowed_origins {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(err) => {
                        tracing::warn!(%origin, "skipping unparseable CORS origin: {err}");
                        None
                    }
                })
                .collect();
            layer.allow_origin(origins)
        }
    }
}

/// Gateway error translated into a transport response.
///
/// Validation keeps its descriptive message; provider-class failures are
/// logged in full but surface as a generic body so upstream detail never
/// leaks to clients.
struct ApiError(GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GatewayError::Validation { message } => {
                tracing::debug!("rejected request: {message}");
                (StatusCode::BAD_REQUEST, message.clone())
            }
            GatewayError::Unconfigured => {
                tracing::warn!("request refused: no provider credential configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "API key not found".to_string(),
                )
            }
            err => {
                tracing::error!("completion forwarding failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream completion failed".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "message": "API is working!" }))
}

async fn completion_handler(
    State(gateway): State<Arc<Gateway>>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionReply>, ApiError> {
    let reply = gateway.completion(request).await?;
    Ok(Json(reply))
}

async fn image_recognition_handler(
    State(gateway): State<Arc<Gateway>>,
    Json(request): Json<ImageCompletionRequest>,
) -> Result<Json<CompletionReply>, ApiError> {
    let reply = gateway.image_recognition(request).await?;
    Ok(Json(reply))
}

#[derive(Debug, Deserialize)]
struct ItemQuery {
    q: Option<String>,
}

async fn read_item_handler(
    Path(item_id): Path<i64>,
    Query(query): Query<ItemQuery>,
) -> Json<Value> {
    Json(json!({ "item_id": item_id, "q": query.q }))
}
