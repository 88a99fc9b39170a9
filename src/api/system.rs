//! Read-only system endpoints: logs, security posture, docs and health.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::types::{
    ApiDocumentationResponse, GetSystemLogsResponse, HealthResponse, LogsQuery,
    SecurityStatusResponse,
};
use super::{ApiError, AppState};
use crate::services::docs::api_documentation;

/// `GET /logs/system`
pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<GetSystemLogsResponse>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.shared.system_service.get_system_logs(query).await?))
}

/// `GET /security/status`
pub async fn security_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SecurityStatusResponse>, ApiError> {
    Ok(Json(state.shared.system_service.security_status().await?))
}

/// `GET /api/docs`
pub async fn api_docs() -> Json<ApiDocumentationResponse> {
    Json(api_documentation())
}

/// `GET /health`
///
/// Always 200; `database` reports whether a trivial query succeeded.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
    })
}
