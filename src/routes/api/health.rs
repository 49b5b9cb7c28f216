use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};

use crate::{ApiResponse, Ctx};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /api/health
async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(
        "OK",
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    ))
}

pub fn mount() -> Router<Ctx> {
    Router::new().route("/health", get(health))
}
