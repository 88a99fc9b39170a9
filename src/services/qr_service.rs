//! Domain service for generating and customizing QR codes.
//!
//! Also hosts the input checks shared with batch submission.

use thiserror::Error;

use crate::api::types::{CustomizeQrResponse, GenerateQrRequest, GenerateQrResponse};
use crate::config::QrConfig;
use crate::db::NewQrCode;
use crate::models::{DataType, ErrorCorrection, HexColor, OutputFormat};
use crate::services::renderer::RenderError;

/// A single rejected field, phrased for the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidQrInput(pub String);

/// Errors specific to QR code operations.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR code request {0} not found")]
    NotFound(String),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<InvalidQrInput> for QrError {
    fn from(err: InvalidQrInput) -> Self {
        Self::Validation(err.0)
    }
}

impl From<RenderError> for QrError {
    fn from(err: RenderError) -> Self {
        match err {
            // Too much data for the chosen level is the caller's problem
            RenderError::Encode(e) => Self::Validation(format!("Data cannot be encoded: {e}")),
            RenderError::Image(e) => Self::Render(e.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for QrError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for QrError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<std::io::Error> for QrError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait QrService: Send + Sync {
    /// Renders the code to storage and returns where it can be fetched.
    /// The request is persisted only when it names a user.
    async fn generate_qr_code(
        &self,
        request: GenerateQrRequest,
    ) -> Result<GenerateQrResponse, QrError>;

    /// Overwrites color, size and logo of a stored request.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::NotFound`] without writing anything when `qr_code_id`
    /// is unknown.
    async fn customize_qr_code(
        &self,
        qr_code_id: &str,
        color: &str,
        logo: Option<String>,
        size: u32,
    ) -> Result<CustomizeQrResponse, QrError>;
}

pub fn validate_size(size: u32, limits: &QrConfig) -> Result<u32, InvalidQrInput> {
    if size == 0 || size > limits.max_size {
        return Err(InvalidQrInput(format!(
            "Invalid size: {size}. Size must be between 1 and {}",
            limits.max_size
        )));
    }
    Ok(size)
}

pub fn parse_color(color: &str) -> Result<HexColor, InvalidQrInput> {
    color
        .parse::<HexColor>()
        .map_err(|e| InvalidQrInput(e.to_string()))
}

/// Checks that `data` is plausible for its declared type.
pub fn validate_payload(
    data_type: DataType,
    data: &str,
    limits: &QrConfig,
) -> Result<(), InvalidQrInput> {
    if data.trim().is_empty() {
        return Err(InvalidQrInput("Data cannot be empty".to_string()));
    }

    if data.len() > limits.max_data_length {
        return Err(InvalidQrInput(format!(
            "Data is {} bytes; the limit is {}",
            data.len(),
            limits.max_data_length
        )));
    }

    match data_type {
        DataType::Url => {
            let url = url::Url::parse(data.trim())
                .map_err(|e| InvalidQrInput(format!("Invalid URL: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(InvalidQrInput(format!(
                    "Unsupported URL scheme: {}",
                    url.scheme()
                )));
            }
        }
        DataType::Json => {
            serde_json::from_str::<serde_json::Value>(data)
                .map_err(|e| InvalidQrInput(format!("Invalid JSON: {e}")))?;
        }
        DataType::Vcard => {
            if !data.trim_start().to_ascii_uppercase().starts_with("BEGIN:VCARD") {
                return Err(InvalidQrInput(
                    "vCard data must start with BEGIN:VCARD".to_string(),
                ));
            }
        }
        DataType::Text | DataType::Csv => {}
    }

    Ok(())
}

/// Validates every field and assembles the row to store.
#[allow(clippy::too_many_arguments)]
pub fn build_new_qr(
    user_id: Option<String>,
    data: String,
    data_type: DataType,
    size: u32,
    color: &str,
    logo: Option<String>,
    error_correction: ErrorCorrection,
    limits: &QrConfig,
) -> Result<NewQrCode, InvalidQrInput> {
    validate_payload(data_type, &data, limits)?;
    let size = validate_size(size, limits)?;
    let color = parse_color(color)?;

    Ok(NewQrCode {
        id: uuid::Uuid::new_v4().to_string(),
        user_id,
        data,
        data_type,
        size,
        color,
        logo: logo.filter(|l| !l.trim().is_empty()),
        error_correction,
        format: OutputFormat::Png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> QrConfig {
        QrConfig::default()
    }

    #[test]
    fn size_bounds() {
        assert!(validate_size(1, &limits()).is_ok());
        assert!(validate_size(2048, &limits()).is_ok());
        assert!(validate_size(0, &limits()).is_err());
        assert!(validate_size(2049, &limits()).is_err());
    }

    #[test]
    fn url_payloads_must_be_http() {
        assert!(validate_payload(DataType::Url, "https://example.com/a?b=c", &limits()).is_ok());
        assert!(validate_payload(DataType::Url, "not a url", &limits()).is_err());
        assert!(validate_payload(DataType::Url, "ftp://example.com", &limits()).is_err());
    }

    #[test]
    fn json_and_vcard_payloads_are_checked() {
        assert!(validate_payload(DataType::Json, r#"{"a": 1}"#, &limits()).is_ok());
        assert!(validate_payload(DataType::Json, "{oops", &limits()).is_err());
        assert!(
            validate_payload(DataType::Vcard, "BEGIN:VCARD\nFN:A\nEND:VCARD", &limits()).is_ok()
        );
        assert!(validate_payload(DataType::Vcard, "FN:A", &limits()).is_err());
    }

    #[test]
    fn text_only_needs_content() {
        assert!(validate_payload(DataType::Text, "hello", &limits()).is_ok());
        assert!(validate_payload(DataType::Csv, "a,b\n1,2", &limits()).is_ok());
        assert!(validate_payload(DataType::Text, "   ", &limits()).is_err());

        let tight = QrConfig {
            max_data_length: 4,
            ..QrConfig::default()
        };
        assert!(validate_payload(DataType::Text, "hello", &tight).is_err());
    }

    #[test]
    fn build_new_qr_normalizes_color_and_drops_blank_logo() {
        let qr = build_new_qr(
            Some("u1".to_string()),
            "hello".to_string(),
            DataType::Text,
            300,
            "#abc",
            Some("  ".to_string()),
            ErrorCorrection::Low,
            &limits(),
        )
        .unwrap();

        assert_eq!(qr.color.to_string(), "#AABBCC");
        assert!(qr.logo.is_none());
        assert_eq!(qr.format, OutputFormat::Png);
    }
}
