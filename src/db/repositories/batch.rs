use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};

use super::qr_code::NewQrCode;
use crate::entities::{batch_requests, prelude::*};
use crate::models::BatchStatus;

/// Rows per INSERT. Each row binds 12 values and SQLite caps a statement
/// at 32766 variables.
const INSERT_CHUNK_SIZE: usize = 500;

pub struct BatchRepository {
    conn: DatabaseConnection,
}

impl BatchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Writes the batch row and all of its items in one transaction.
    pub async fn create_with_items(
        &self,
        user_id: &str,
        items: Vec<NewQrCode>,
    ) -> Result<batch_requests::Model> {
        let txn = self.conn.begin().await?;

        let batch = batch_requests::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            status: Set(BatchStatus::Queued.as_str().to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        }
        .insert(&txn)
        .await
        .context("Failed to create batch request")?;

        let mut items = items.into_iter();
        loop {
            let chunk: Vec<_> = items
                .by_ref()
                .take(INSERT_CHUNK_SIZE)
                .map(|item| item.into_active_model(Some(batch.id.clone())))
                .collect();
            if chunk.is_empty() {
                break;
            }

            QrCodeRequests::insert_many(chunk)
                .exec_without_returning(&txn)
                .await
                .context("Failed to create batch items")?;
        }

        txn.commit().await?;
        Ok(batch)
    }

    pub async fn get(&self, id: &str) -> Result<Option<batch_requests::Model>> {
        BatchRequests::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query batch request")
    }

    pub async fn count(&self) -> Result<u64> {
        BatchRequests::find()
            .count(&self.conn)
            .await
            .context("Failed to count batch requests")
    }
}
