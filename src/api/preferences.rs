use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::extract::JsonOrQuery;
use super::types::{
    GetUserPreferencesResponse, PreferencesQuery, UpdatePreferencesRequest,
    UpdatePreferencesResponse,
};
use super::{ApiError, AppState};

/// `GET /user/preferences[?user_id=..]`
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PreferencesQuery>, QueryRejection>,
) -> Result<Json<GetUserPreferencesResponse>, ApiError> {
    let Query(query) = query?;

    let response = state
        .shared
        .preference_service
        .get_user_preferences(query.user_id.as_deref())
        .await?;

    Ok(Json(response))
}

/// `PUT /user/preferences/update`
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    JsonOrQuery(request): JsonOrQuery<UpdatePreferencesRequest>,
) -> Result<Json<UpdatePreferencesResponse>, ApiError> {
    let response = state
        .shared
        .preference_service
        .update_user_preferences(request)
        .await?;

    Ok(Json(response))
}
