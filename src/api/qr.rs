use axum::{Json, extract::State};
use std::sync::Arc;

use super::extract::JsonOrQuery;
use super::types::{CustomizeQrRequest, CustomizeQrResponse, GenerateQrRequest, GenerateQrResponse};
use super::{ApiError, AppState};

/// `POST /generate`
pub async fn generate(
    State(state): State<Arc<AppState>>,
    JsonOrQuery(request): JsonOrQuery<GenerateQrRequest>,
) -> Result<Json<GenerateQrResponse>, ApiError> {
    Ok(Json(state.shared.qr_service.generate_qr_code(request).await?))
}

/// `POST /customize`
pub async fn customize(
    State(state): State<Arc<AppState>>,
    JsonOrQuery(request): JsonOrQuery<CustomizeQrRequest>,
) -> Result<Json<CustomizeQrResponse>, ApiError> {
    let response = state
        .shared
        .qr_service
        .customize_qr_code(&request.qr_code_id, &request.color, request.logo, request.size)
        .await?;

    Ok(Json(response))
}
