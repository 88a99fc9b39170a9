use axum::{
    Json,
    extract::{FromRequest, Query, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use super::ApiError;

/// Reads a request's scalar fields from a JSON body, or from the query string
/// when the body is not JSON.
///
/// Form-style clients put every field in the query string, so both shapes
/// have to be accepted on the same route.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrQuery<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(req.headers()) {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let Query(value) = Query::<T>::try_from_uri(req.uri())?;
        Ok(Self(value))
    }
}

pub(super) fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || essence.ends_with("+json")
}
