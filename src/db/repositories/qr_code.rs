use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::*, qr_code_requests};
use crate::models::{DataType, ErrorCorrection, HexColor, OutputFormat};

/// A validated QR code request ready to be written.
#[derive(Debug, Clone)]
pub struct NewQrCode {
    pub id: String,
    pub user_id: Option<String>,
    pub data: String,
    pub data_type: DataType,
    pub size: u32,
    pub color: HexColor,
    pub logo: Option<String>,
    pub error_correction: ErrorCorrection,
    pub format: OutputFormat,
}

impl NewQrCode {
    pub(crate) fn into_active_model(
        self,
        batch_request_id: Option<String>,
    ) -> qr_code_requests::ActiveModel {
        let now = chrono::Utc::now().to_rfc3339();

        qr_code_requests::ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            data: Set(self.data),
            data_type: Set(self.data_type.as_str().to_string()),
            size: Set(i32::try_from(self.size).unwrap_or(i32::MAX)),
            color: Set(self.color.to_string()),
            logo: Set(self.logo),
            error_correction: Set(self.error_correction.as_str().to_string()),
            format: Set(self.format.as_str().to_string()),
            batch_request_id: Set(batch_request_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
    }
}

/// Fields a customization may overwrite.
#[derive(Debug, Clone)]
pub struct QrCodeChanges {
    pub color: HexColor,
    pub size: u32,
    pub logo: Option<String>,
}

pub struct QrCodeRepository {
    conn: DatabaseConnection,
}

impl QrCodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, qr: NewQrCode) -> Result<qr_code_requests::Model> {
        qr.into_active_model(None)
            .insert(&self.conn)
            .await
            .context("Failed to store QR code request")
    }

    pub async fn get(&self, id: &str) -> Result<Option<qr_code_requests::Model>> {
        QrCodeRequests::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query QR code request")
    }

    /// Returns `None` without writing when the row does not exist.
    pub async fn update(
        &self,
        id: &str,
        changes: QrCodeChanges,
    ) -> Result<Option<qr_code_requests::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: qr_code_requests::ActiveModel = existing.into();
        active.color = Set(changes.color.to_string());
        active.size = Set(i32::try_from(changes.size).unwrap_or(i32::MAX));
        active.logo = Set(changes.logo);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update QR code request")?;

        Ok(Some(updated))
    }

    pub async fn list_for_batch(&self, batch_id: &str) -> Result<Vec<qr_code_requests::Model>> {
        QrCodeRequests::find()
            .filter(qr_code_requests::Column::BatchRequestId.eq(batch_id))
            .order_by_asc(qr_code_requests::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list QR code requests for batch")
    }
}
