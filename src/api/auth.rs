use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::extract::JsonOrQuery;
use super::types::{
    CheckPermissionResponse, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse,
    PermissionQuery,
};
use super::{ApiError, AppState};

/// `POST /auth/login`
///
/// Credentials come from a JSON body or from the query string.
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonOrQuery(request): JsonOrQuery<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state
        .shared
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(response))
}

/// `POST /auth/logout`
///
/// An unknown token still answers 200 with "Invalid token.".
pub async fn logout(
    State(state): State<Arc<AppState>>,
    JsonOrQuery(request): JsonOrQuery<LogoutRequest>,
) -> Result<Json<LogoutResponse>, ApiError> {
    Ok(Json(state.shared.auth_service.logout(&request.token).await?))
}

/// `GET /auth/permission/check?token=..&action=..`
pub async fn check_permission(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PermissionQuery>, QueryRejection>,
) -> Result<Json<CheckPermissionResponse>, ApiError> {
    let Query(query) = query?;

    let response = state
        .shared
        .permission_service
        .check_permission(&query.token, &query.action)
        .await?;

    Ok(Json(response))
}
