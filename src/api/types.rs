use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{DataType, ErrorCorrection};

// ============================================================================
// QR codes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQrRequest {
    pub data: String,
    pub data_type: DataType,
    pub size: u32,
    pub color: String,
    pub error_correction: ErrorCorrection,
    /// Persist the request under this user so it can be customized later
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateQrResponse {
    pub qr_code_id: String,
    pub qr_code_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomizeQrRequest {
    pub qr_code_id: String,
    pub color: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub size: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomizeQrResponse {
    pub qr_code_url: String,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub struct PermissionQuery {
    pub token: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPermissionResponse {
    pub is_authorized: bool,
    pub message: Option<String>,
}

impl CheckPermissionResponse {
    #[must_use]
    pub const fn granted() -> Self {
        Self {
            is_authorized: true,
            message: None,
        }
    }

    pub fn denied(message: impl Into<String>) -> Self {
        Self {
            is_authorized: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Batches
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeRequestInput {
    pub data: String,
    pub data_type: DataType,
    pub size: u32,
    pub color: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub error_correction: ErrorCorrection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub qr_code_requests: Vec<QrCodeRequestInput>,
}

/// `POST /batch/create` body: the full envelope, or just the item list with
/// `userId` in the query string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateBatchPayload {
    Envelope(CreateBatchRequest),
    Items(Vec<QrCodeRequestInput>),
}

impl CreateBatchPayload {
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, Vec<QrCodeRequestInput>) {
        match self {
            Self::Envelope(request) => (request.user_id, request.qr_code_requests),
            Self::Items(items) => (None, items),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchResponse {
    pub batch_request_id: String,
    pub message: String,
}

// ============================================================================
// Preferences
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PreferencesQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferenceDetail {
    pub preference_key: String,
    pub preference_value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetUserPreferencesResponse {
    pub preferences: Vec<UserPreferenceDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub color: String,
    pub size: i64,
    pub error_correction_level: String,
    pub margin: i64,
    pub logo_integration: bool,
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePreferencesResponse {
    pub success: bool,
    pub updated_preferences: BTreeMap<String, String>,
    pub message: String,
}

// ============================================================================
// System
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub log_type: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub log_type: String,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetSystemLogsResponse {
    pub logs: Vec<LogEntry>,
    pub page: u32,
    pub total_pages: u32,
    pub logs_per_page: u32,
    pub total_logs: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SecurityStatusResponse {
    pub encryption_status: String,
    pub api_security: String,
    pub compliance_status: String,
    pub detected_issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiDocumentationResponse {
    pub title: &'static str,
    pub version: &'static str,
    pub documentation: String,
    pub endpoints: Vec<EndpointDoc>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
