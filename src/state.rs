use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, BatchService, PermissionService, PreferenceService, QrService,
    SeaOrmAuthService, SeaOrmBatchService, SeaOrmPermissionService, SeaOrmPreferenceService,
    SeaOrmQrService, StaticSystemService, SystemService, TokenIssuer,
};

/// Everything request handlers share. All services sit on the same pool.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub permission_service: Arc<dyn PermissionService>,

    pub qr_service: Arc<dyn QrService>,

    pub batch_service: Arc<dyn BatchService>,

    pub preference_service: Arc<dyn PreferenceService>,

    pub system_service: Arc<dyn SystemService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let config = Arc::new(config);
        let tokens = TokenIssuer::new(&config.security);

        Self {
            auth_service: Arc::new(SeaOrmAuthService::new(store.clone(), tokens.clone())),
            permission_service: Arc::new(SeaOrmPermissionService::new(store.clone(), tokens)),
            qr_service: Arc::new(SeaOrmQrService::new(store.clone(), config.clone())),
            batch_service: Arc::new(SeaOrmBatchService::new(store.clone(), config.clone())),
            preference_service: Arc::new(SeaOrmPreferenceService::new(store.clone())),
            system_service: Arc::new(StaticSystemService::new()),
            store,
            config,
        }
    }
}
