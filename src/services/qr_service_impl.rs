//! `SeaORM` implementation of the `QrService` trait.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::types::{CustomizeQrResponse, GenerateQrRequest, GenerateQrResponse};
use crate::config::Config;
use crate::db::{QrCodeChanges, Store};
use crate::services::qr_service::{
    QrError, QrService, build_new_qr, parse_color, validate_size,
};
use crate::services::renderer::render_png;

pub struct SeaOrmQrService {
    store: Store,
    config: Arc<Config>,
}

impl SeaOrmQrService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.output_dir)
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/qr/{file_name}", self.config.public_base_url())
    }

    fn customized_url(&self, id: &str) -> String {
        format!(
            "{}/path/to/customized/qr_code_id_{id}.png",
            self.config.public_base_url()
        )
    }
}

#[async_trait]
impl QrService for SeaOrmQrService {
    async fn generate_qr_code(
        &self,
        request: GenerateQrRequest,
    ) -> Result<GenerateQrResponse, QrError> {
        let new_qr = build_new_qr(
            request.user_id.clone(),
            request.data,
            request.data_type,
            request.size,
            &request.color,
            None,
            request.error_correction,
            &self.config.qr,
        )?;

        if let Some(user_id) = &new_qr.user_id
            && self.store.get_user_by_id(user_id).await?.is_none()
        {
            return Err(QrError::UserNotFound(user_id.clone()));
        }

        let data = new_qr.data.clone();
        let (level, color, size) = (new_qr.error_correction, new_qr.color, new_qr.size);
        let png = tokio::task::spawn_blocking(move || render_png(&data, level, color, size))
            .await
            .map_err(|e| QrError::Internal(format!("Render task failed: {e}")))??;

        let file_name = format!("{}.{}", new_qr.id, new_qr.format.extension());
        let dir = self.output_dir();
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), &png).await?;

        let qr_code_id = new_qr.id.clone();
        if new_qr.user_id.is_some()
            && let Err(e) = self.store.create_qr_code(new_qr).await
        {
            // Don't leave an orphaned image behind
            if let Err(remove_err) = tokio::fs::remove_file(dir.join(&file_name)).await {
                warn!(error = %remove_err, file = %file_name, "Failed to remove rendered QR code");
            }
            return Err(e.into());
        }

        metrics::counter!("qr_codes_generated_total").increment(1);
        info!(qr_code_id = %qr_code_id, bytes = png.len(), "QR code generated");

        Ok(GenerateQrResponse {
            qr_code_url: self.public_url(&file_name),
            qr_code_id,
        })
    }

    async fn customize_qr_code(
        &self,
        qr_code_id: &str,
        color: &str,
        logo: Option<String>,
        size: u32,
    ) -> Result<CustomizeQrResponse, QrError> {
        let changes = QrCodeChanges {
            color: parse_color(color)?,
            size: validate_size(size, &self.config.qr)?,
            logo: logo.filter(|l| !l.trim().is_empty()),
        };

        let Some(updated) = self.store.update_qr_code(qr_code_id, changes).await? else {
            return Err(QrError::NotFound(qr_code_id.to_string()));
        };

        info!(qr_code_id = %updated.id, color = %updated.color, size = updated.size, "QR code customized");

        Ok(CustomizeQrResponse {
            qr_code_url: self.customized_url(&updated.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::models::{DataType, ErrorCorrection, Role};

    struct Fixture {
        service: SeaOrmQrService,
        store: Store,
        user_id: String,
        dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.output_dir = dir.path().display().to_string();
        config.server.public_base_url = "http://qr.test/".to_string();

        let store = Store::new("sqlite::memory:").await.unwrap();
        let security = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        };
        let user = store
            .create_user("dave@example.com", "pw", Role::User, &security)
            .await
            .unwrap();

        Fixture {
            service: SeaOrmQrService::new(store.clone(), Arc::new(config)),
            store,
            user_id: user.id,
            dir,
        }
    }

    fn request(user_id: Option<String>) -> GenerateQrRequest {
        GenerateQrRequest {
            data: "https://example.com".to_string(),
            data_type: DataType::Url,
            size: 200,
            color: "#000000".to_string(),
            error_correction: ErrorCorrection::Medium,
            user_id,
        }
    }

    #[tokio::test]
    async fn generate_writes_png_and_persists_for_user() {
        let fx = fixture().await;

        let response = fx
            .service
            .generate_qr_code(request(Some(fx.user_id.clone())))
            .await
            .unwrap();

        assert_eq!(
            response.qr_code_url,
            format!("http://qr.test/qr/{}.png", response.qr_code_id)
        );

        let path = fx.dir.path().join(format!("{}.png", response.qr_code_id));
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let row = fx.store.get_qr_code(&response.qr_code_id).await.unwrap().unwrap();
        assert_eq!(row.user_id.as_deref(), Some(fx.user_id.as_str()));
        assert_eq!(row.format, "PNG");
    }

    #[tokio::test]
    async fn anonymous_generate_does_not_persist() {
        let fx = fixture().await;
        let response = fx.service.generate_qr_code(request(None)).await.unwrap();
        assert!(fx.store.get_qr_code(&response.qr_code_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn generate_rejects_bad_input() {
        let fx = fixture().await;

        let mut bad_size = request(None);
        bad_size.size = 0;
        assert!(matches!(
            fx.service.generate_qr_code(bad_size).await,
            Err(QrError::Validation(_))
        ));

        let mut bad_color = request(None);
        bad_color.color = "red".to_string();
        assert!(matches!(
            fx.service.generate_qr_code(bad_color).await,
            Err(QrError::Validation(_))
        ));

        assert!(matches!(
            fx.service
                .generate_qr_code(request(Some("missing".to_string())))
                .await,
            Err(QrError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn customize_updates_row_and_returns_derived_url() {
        let fx = fixture().await;
        let generated = fx
            .service
            .generate_qr_code(request(Some(fx.user_id.clone())))
            .await
            .unwrap();

        let response = fx
            .service
            .customize_qr_code(&generated.qr_code_id, "#ff0000", Some("logo.png".to_string()), 512)
            .await
            .unwrap();
        assert_eq!(
            response.qr_code_url,
            format!(
                "http://qr.test/path/to/customized/qr_code_id_{}.png",
                generated.qr_code_id
            )
        );

        let row = fx
            .store
            .get_qr_code(&generated.qr_code_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.color, "#FF0000");
        assert_eq!(row.size, 512);
        assert_eq!(row.logo.as_deref(), Some("logo.png"));
    }

    #[tokio::test]
    async fn customize_unknown_id_is_not_found() {
        let fx = fixture().await;
        assert!(matches!(
            fx.service.customize_qr_code("nope", "#000", None, 100).await,
            Err(QrError::NotFound(_))
        ));
    }
}
