use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::Role;

pub mod migrator;
pub mod repositories;

pub use crate::entities::api_keys::Model as ApiKey;
pub use crate::entities::batch_requests::Model as BatchRequest;
pub use crate::entities::qr_code_requests::Model as QrCodeRequest;
pub use crate::entities::user_preferences::Model as UserPreference;
pub use repositories::qr_code::{NewQrCode, QrCodeChanges};
pub use repositories::user::User;

/// Handle to the relational store. Cheap to clone; every clone shares the pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        if in_memory {
            // Every pooled connection would otherwise see its own empty database.
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Closes the pool. Called once at shutdown.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn api_key_repo(&self) -> repositories::api_key::ApiKeyRepository {
        repositories::api_key::ApiKeyRepository::new(self.conn.clone())
    }

    fn qr_code_repo(&self) -> repositories::qr_code::QrCodeRepository {
        repositories::qr_code::QrCodeRepository::new(self.conn.clone())
    }

    fn batch_repo(&self) -> repositories::batch::BatchRepository {
        repositories::batch::BatchRepository::new(self.conn.clone())
    }

    fn preference_repo(&self) -> repositories::preference::PreferenceRepository {
        repositories::preference::PreferenceRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: Role,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(email, password, role, security).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn verify_user_password(&self, user: &User, password: &str) -> Result<bool> {
        self.user_repo().verify_password(user, password).await
    }

    // API keys

    pub async fn create_api_key(&self, user_id: &str, key: &str) -> Result<ApiKey> {
        self.api_key_repo().create(user_id, key).await
    }

    pub async fn get_api_key(&self, key: &str) -> Result<Option<ApiKey>> {
        self.api_key_repo().get_by_key(key).await
    }

    pub async fn delete_api_key(&self, id: &str) -> Result<bool> {
        self.api_key_repo().delete(id).await
    }

    // QR code requests

    pub async fn create_qr_code(&self, qr: NewQrCode) -> Result<QrCodeRequest> {
        self.qr_code_repo().create(qr).await
    }

    pub async fn get_qr_code(&self, id: &str) -> Result<Option<QrCodeRequest>> {
        self.qr_code_repo().get(id).await
    }

    pub async fn update_qr_code(
        &self,
        id: &str,
        changes: QrCodeChanges,
    ) -> Result<Option<QrCodeRequest>> {
        self.qr_code_repo().update(id, changes).await
    }

    pub async fn list_qr_codes_for_batch(&self, batch_id: &str) -> Result<Vec<QrCodeRequest>> {
        self.qr_code_repo().list_for_batch(batch_id).await
    }

    // Batches

    pub async fn create_batch(
        &self,
        user_id: &str,
        items: Vec<NewQrCode>,
    ) -> Result<BatchRequest> {
        self.batch_repo().create_with_items(user_id, items).await
    }

    pub async fn get_batch(&self, id: &str) -> Result<Option<BatchRequest>> {
        self.batch_repo().get(id).await
    }

    pub async fn count_batches(&self) -> Result<u64> {
        self.batch_repo().count().await
    }

    // Preferences

    pub async fn list_preferences(&self, user_id: Option<&str>) -> Result<Vec<UserPreference>> {
        let repo = self.preference_repo();
        match user_id {
            Some(user_id) => repo.list_for_user(user_id).await,
            None => repo.list_all().await,
        }
    }

    pub async fn upsert_preferences(
        &self,
        user_id: &str,
        values: &[(&str, String)],
    ) -> Result<()> {
        self.preference_repo().upsert_many(user_id, values).await
    }
}
