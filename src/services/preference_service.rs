use thiserror::Error;

use crate::api::types::{
    GetUserPreferencesResponse, UpdatePreferencesRequest, UpdatePreferencesResponse,
};
use crate::models::{ErrorCorrection, HexColor};

pub const PREFERENCES_UPDATED_MESSAGE: &str = "User preferences updated successfully.";

pub const KEY_COLOR: &str = "color";
pub const KEY_SIZE: &str = "size";
pub const KEY_ERROR_CORRECTION_LEVEL: &str = "error_correction_level";
pub const KEY_MARGIN: &str = "margin";
pub const KEY_LOGO_INTEGRATION: &str = "logo_integration";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for PreferenceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PreferenceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait PreferenceService: Send + Sync {
    /// Without a `user_id` every stored preference is returned, whoever owns it.
    async fn get_user_preferences(
        &self,
        user_id: Option<&str>,
    ) -> Result<GetUserPreferencesResponse, PreferenceError>;

    async fn update_user_preferences(
        &self,
        request: UpdatePreferencesRequest,
    ) -> Result<UpdatePreferencesResponse, PreferenceError>;
}

/// Booleans are stored capitalized (`True`/`False`), matching existing rows.
#[must_use]
pub const fn bool_value(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Checks the request and flattens it into (key, value) pairs.
pub fn preference_values(
    request: &UpdatePreferencesRequest,
) -> Result<Vec<(&'static str, String)>, PreferenceError> {
    if request.user_id.trim().is_empty() {
        return Err(PreferenceError::Validation("user_id is required".to_string()));
    }

    request
        .color
        .parse::<HexColor>()
        .map_err(|e| PreferenceError::Validation(e.to_string()))?;

    if request.size <= 0 {
        return Err(PreferenceError::Validation(format!(
            "Invalid size: {}. Size must be positive",
            request.size
        )));
    }

    if request.margin < 0 {
        return Err(PreferenceError::Validation(format!(
            "Invalid margin: {}. Margin cannot be negative",
            request.margin
        )));
    }

    request
        .error_correction_level
        .parse::<ErrorCorrection>()
        .map_err(|e| PreferenceError::Validation(e.to_string()))?;

    Ok(vec![
        (KEY_COLOR, request.color.clone()),
        (KEY_SIZE, request.size.to_string()),
        (KEY_ERROR_CORRECTION_LEVEL, request.error_correction_level.clone()),
        (KEY_MARGIN, request.margin.to_string()),
        (KEY_LOGO_INTEGRATION, bool_value(request.logo_integration).to_string()),
    ])
}
