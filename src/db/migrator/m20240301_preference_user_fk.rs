use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("ALTER TABLE user_preferences RENAME TO user_preferences_old")
            .await?;

        conn.execute_unprepared(
            r"
            CREATE TABLE user_preferences (
                id TEXT NOT NULL PRIMARY KEY,
                user_id TEXT NOT NULL,
                preference_key TEXT NOT NULL,
                preference_value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE ON UPDATE CASCADE
            )
        ",
        )
        .await?;

        // Rows for users that no longer exist are dropped
        conn.execute_unprepared(
            r"
            INSERT INTO user_preferences (id, user_id, preference_key, preference_value, updated_at)
            SELECT id, user_id, preference_key, preference_value, updated_at
            FROM user_preferences_old
            WHERE user_id IN (SELECT id FROM users)
        ",
        )
        .await?;

        conn.execute_unprepared("DROP TABLE user_preferences_old")
            .await?;

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_user_preferences_user_key \
             ON user_preferences (user_id, preference_key)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Ok(())
    }
}
