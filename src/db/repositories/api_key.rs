use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::{api_keys, prelude::*};

pub struct ApiKeyRepository {
    conn: DatabaseConnection,
}

impl ApiKeyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, user_id: &str, key: &str) -> Result<api_keys::Model> {
        api_keys::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            key: Set(key.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        }
        .insert(&self.conn)
        .await
        .context("Failed to store API key")
    }

    pub async fn get_by_key(&self, key: &str) -> Result<Option<api_keys::Model>> {
        ApiKeys::find()
            .filter(api_keys::Column::Key.eq(key))
            .one(&self.conn)
            .await
            .context("Failed to query API key")
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = ApiKeys::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete API key")?;

        Ok(result.rows_affected > 0)
    }
}
