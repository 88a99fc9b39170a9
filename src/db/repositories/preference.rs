use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::entities::{prelude::*, user_preferences};

pub struct PreferenceRepository {
    conn: DatabaseConnection,
}

impl PreferenceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Every row in the table, regardless of owner.
    pub async fn list_all(&self) -> Result<Vec<user_preferences::Model>> {
        UserPreferences::find()
            .order_by_asc(user_preferences::Column::UserId)
            .order_by_asc(user_preferences::Column::PreferenceKey)
            .all(&self.conn)
            .await
            .context("Failed to list preferences")
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<user_preferences::Model>> {
        UserPreferences::find()
            .filter(user_preferences::Column::UserId.eq(user_id))
            .order_by_asc(user_preferences::Column::PreferenceKey)
            .all(&self.conn)
            .await
            .context("Failed to list preferences for user")
    }

    /// Updates the existing (user, key) row in place or inserts a new one.
    pub async fn upsert_many(&self, user_id: &str, values: &[(&str, String)]) -> Result<()> {
        let txn = self.conn.begin().await?;
        let now = chrono::Utc::now().to_rfc3339();

        for (key, value) in values {
            let existing = UserPreferences::find()
                .filter(user_preferences::Column::UserId.eq(user_id))
                .filter(user_preferences::Column::PreferenceKey.eq(*key))
                .one(&txn)
                .await
                .with_context(|| format!("Failed to look up preference '{key}'"))?;

            if let Some(existing) = existing {
                let mut active: user_preferences::ActiveModel = existing.into();
                active.preference_value = Set(value.clone());
                active.updated_at = Set(now.clone());
                active.update(&txn).await?;
            } else {
                user_preferences::ActiveModel {
                    id: Set(uuid::Uuid::new_v4().to_string()),
                    user_id: Set(user_id.to_string()),
                    preference_key: Set((*key).to_string()),
                    preference_value: Set(value.clone()),
                    updated_at: Set(now.clone()),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        Ok(())
    }
}
