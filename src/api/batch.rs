use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use std::sync::Arc;

use super::types::{BatchQuery, CreateBatchPayload, CreateBatchResponse};
use super::{ApiError, AppState};

/// `POST /batch/create[?userId=..]`
///
/// `userId` in the body takes precedence over the query string.
/// Items are only queued; nothing renders them yet.
pub async fn create_batch(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BatchQuery>, QueryRejection>,
    payload: Result<Json<CreateBatchPayload>, JsonRejection>,
) -> Result<Json<CreateBatchResponse>, ApiError> {
    let Query(query) = query?;
    let Json(payload) = payload?;

    let (body_user_id, items) = payload.into_parts();
    let user_id = body_user_id
        .or(query.user_id)
        .ok_or_else(|| ApiError::validation("userId is required"))?;

    let response = state
        .shared
        .batch_service
        .create_batch_request(&user_id, items)
        .await?;

    Ok(Json(response))
}
