//! Domain service answering "may the holder of this token do that?".

use thiserror::Error;

use crate::api::types::CheckPermissionResponse;
use crate::models::Role;

pub const CREATE_QR_CODE: &str = "create_qr_code";

/// Action → roles allowed to perform it. Extend by adding rows.
pub const ACTION_PERMISSIONS: &[(&str, &[Role])] = &[(
    CREATE_QR_CODE,
    &[Role::PremiumUser, Role::Administrator],
)];

pub const MSG_INVALID_TOKEN: &str = "Invalid API Token.";
pub const MSG_USER_NOT_FOUND: &str = "User not found.";
pub const MSG_ROLE_DENIED: &str =
    "User does not have the required permissions to perform this action.";
pub const MSG_UNKNOWN_ACTION: &str = "Unknown or unauthorized action.";

/// Roles allowed to perform `action`, or `None` for an action nobody may perform.
#[must_use]
pub fn allowed_roles(action: &str) -> Option<&'static [Role]> {
    ACTION_PERMISSIONS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, roles)| *roles)
}

/// Pure decision for an already resolved role.
#[must_use]
pub fn decide(role: Role, action: &str) -> CheckPermissionResponse {
    match allowed_roles(action) {
        Some(roles) if roles.contains(&role) => CheckPermissionResponse::granted(),
        Some(_) => CheckPermissionResponse::denied(MSG_ROLE_DENIED),
        None => CheckPermissionResponse::denied(MSG_UNKNOWN_ACTION),
    }
}

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for PermissionError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PermissionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait PermissionService: Send + Sync {
    /// Resolves token → key → user and checks the user's role against the
    /// action table. A missing key or user is a denial, not an error.
    async fn check_permission(
        &self,
        token: &str,
        action: &str,
    ) -> Result<CheckPermissionResponse, PermissionError>;
}
