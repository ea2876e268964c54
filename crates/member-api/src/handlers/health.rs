use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize)]
pub struct IndexResponse {
    service: String,
    version: String,
}

/// Index - GET /
pub async fn index(State(state): State<AppState>) -> Json<ApiResponse<IndexResponse>> {
    Json(ApiResponse::success(IndexResponse {
        service: state.config.app.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
