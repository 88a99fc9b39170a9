use thiserror::Error;

use crate::api::types::{CreateBatchResponse, QrCodeRequestInput};
use crate::services::qr_service::InvalidQrInput;

pub const BATCH_QUEUED_MESSAGE: &str = "Batch request is queued and being processed.";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<InvalidQrInput> for BatchError {
    fn from(err: InvalidQrInput) -> Self {
        Self::Validation(err.0)
    }
}

impl From<sea_orm::DbErr> for BatchError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BatchError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait BatchService: Send + Sync {
    /// Queues a batch of QR code requests for `user_id`.
    ///
    /// Either the batch and all of its items are stored, or nothing is.
    async fn create_batch_request(
        &self,
        user_id: &str,
        requests: Vec<QrCodeRequestInput>,
    ) -> Result<CreateBatchResponse, BatchError>;
}
