use crate::entities::{prelude::*, user_preferences};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per (user, key); the service upserts on top of this.
        manager
            .create_index(
                Index::create()
                    .name("idx_user_preferences_user_key")
                    .table(UserPreferences)
                    .col(user_preferences::Column::UserId)
                    .col(user_preferences::Column::PreferenceKey)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_preferences_user_key")
                    .table(UserPreferences)
                    .to_owned(),
            )
            .await
    }
}
