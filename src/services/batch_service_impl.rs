//! `SeaORM` implementation of the `BatchService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::types::{CreateBatchResponse, QrCodeRequestInput};
use crate::config::Config;
use crate::db::{NewQrCode, Store};
use crate::services::batch_service::{BATCH_QUEUED_MESSAGE, BatchError, BatchService};
use crate::services::qr_service::build_new_qr;

pub struct SeaOrmBatchService {
    store: Store,
    config: Arc<Config>,
}

impl SeaOrmBatchService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<Config>) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl BatchService for SeaOrmBatchService {
    async fn create_batch_request(
        &self,
        user_id: &str,
        requests: Vec<QrCodeRequestInput>,
    ) -> Result<CreateBatchResponse, BatchError> {
        if requests.is_empty() {
            return Err(BatchError::Validation(
                "qrCodeRequests must contain at least one item".to_string(),
            ));
        }

        if self.store.get_user_by_id(user_id).await?.is_none() {
            return Err(BatchError::UserNotFound(user_id.to_string()));
        }

        let items = requests
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                build_new_qr(
                    Some(user_id.to_string()),
                    input.data,
                    input.data_type,
                    input.size,
                    &input.color,
                    input.logo,
                    input.error_correction,
                    &self.config.qr,
                )
                .map_err(|e| BatchError::Validation(format!("qrCodeRequests[{index}]: {e}")))
            })
            .collect::<Result<Vec<NewQrCode>, _>>()?;

        let item_count = items.len();
        let batch = self.store.create_batch(user_id, items).await?;

        info!(batch_id = %batch.id, user_id, items = item_count, "Batch request queued");

        Ok(CreateBatchResponse {
            batch_request_id: batch.id,
            message: BATCH_QUEUED_MESSAGE.to_string(),
        })
    }
}
