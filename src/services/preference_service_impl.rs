//! `SeaORM` implementation of the `PreferenceService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::api::types::{
    GetUserPreferencesResponse, UpdatePreferencesRequest, UpdatePreferencesResponse,
    UserPreferenceDetail,
};
use crate::db::Store;
use crate::services::preference_service::{
    PREFERENCES_UPDATED_MESSAGE, PreferenceError, PreferenceService, preference_values,
};

pub struct SeaOrmPreferenceService {
    store: Store,
}

impl SeaOrmPreferenceService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PreferenceService for SeaOrmPreferenceService {
    async fn get_user_preferences(
        &self,
        user_id: Option<&str>,
    ) -> Result<GetUserPreferencesResponse, PreferenceError> {
        let rows = self.store.list_preferences(user_id).await?;

        Ok(GetUserPreferencesResponse {
            preferences: rows
                .into_iter()
                .map(|row| UserPreferenceDetail {
                    preference_key: row.preference_key,
                    preference_value: row.preference_value,
                })
                .collect(),
        })
    }

    async fn update_user_preferences(
        &self,
        request: UpdatePreferencesRequest,
    ) -> Result<UpdatePreferencesResponse, PreferenceError> {
        let values = preference_values(&request)?;

        if self.store.get_user_by_id(&request.user_id).await?.is_none() {
            return Err(PreferenceError::UserNotFound(request.user_id));
        }

        self.store
            .upsert_preferences(&request.user_id, &values)
            .await?;

        info!(user_id = %request.user_id, "User preferences updated");

        Ok(UpdatePreferencesResponse {
            success: true,
            updated_preferences: values
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
            message: PREFERENCES_UPDATED_MESSAGE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::models::Role;

    fn request(user_id: &str, color: &str) -> UpdatePreferencesRequest {
        UpdatePreferencesRequest {
            color: color.to_string(),
            size: 250,
            error_correction_level: "H".to_string(),
            margin: 2,
            logo_integration: false,
            user_id: user_id.to_string(),
        }
    }

    async fn store_with_users(emails: &[&str]) -> (Store, Vec<String>) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let security = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        };

        let mut ids = Vec::new();
        for email in emails {
            let user = store
                .create_user(email, "pw", Role::User, &security)
                .await
                .unwrap();
            ids.push(user.id);
        }
        (store, ids)
    }

    #[tokio::test]
    async fn update_then_get_round_trips() {
        let (store, ids) = store_with_users(&["frank@example.com"]).await;
        let service = SeaOrmPreferenceService::new(store);

        let response = service
            .update_user_preferences(request(&ids[0], "#FFFFFF"))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.message, PREFERENCES_UPDATED_MESSAGE);
        assert_eq!(response.updated_preferences["logo_integration"], "False");
        assert_eq!(response.updated_preferences["size"], "250");

        let prefs = service.get_user_preferences(Some(&ids[0])).await.unwrap();
        assert_eq!(prefs.preferences.len(), 5);
        assert!(prefs.preferences.contains(&UserPreferenceDetail {
            preference_key: "color".to_string(),
            preference_value: "#FFFFFF".to_string(),
        }));
    }

    #[tokio::test]
    async fn second_update_overwrites_instead_of_duplicating() {
        let (store, ids) = store_with_users(&["frank@example.com"]).await;
        let service = SeaOrmPreferenceService::new(store);

        service
            .update_user_preferences(request(&ids[0], "#000000"))
            .await
            .unwrap();
        service
            .update_user_preferences(request(&ids[0], "#123456"))
            .await
            .unwrap();

        let prefs = service.get_user_preferences(Some(&ids[0])).await.unwrap();
        assert_eq!(prefs.preferences.len(), 5);
        let color = prefs
            .preferences
            .iter()
            .find(|p| p.preference_key == "color")
            .unwrap();
        assert_eq!(color.preference_value, "#123456");
    }

    #[tokio::test]
    async fn unscoped_listing_returns_every_users_rows() {
        let (store, ids) = store_with_users(&["frank@example.com", "grace@example.com"]).await;
        let service = SeaOrmPreferenceService::new(store);

        service
            .update_user_preferences(request(&ids[0], "#000000"))
            .await
            .unwrap();
        service
            .update_user_preferences(request(&ids[1], "#FFFFFF"))
            .await
            .unwrap();

        assert_eq!(service.get_user_preferences(None).await.unwrap().preferences.len(), 10);
        assert_eq!(
            service.get_user_preferences(Some(&ids[1])).await.unwrap().preferences.len(),
            5
        );
    }

    #[tokio::test]
    async fn unknown_user_is_rejected_without_writes() {
        let (store, _) = store_with_users(&[]).await;
        let service = SeaOrmPreferenceService::new(store);

        assert!(matches!(
            service
                .update_user_preferences(request("no-such-user", "#000000"))
                .await,
            Err(PreferenceError::UserNotFound(_))
        ));
        assert!(service.get_user_preferences(None).await.unwrap().preferences.is_empty());
    }

    #[tokio::test]
    async fn invalid_request_writes_nothing() {
        let (store, ids) = store_with_users(&["frank@example.com"]).await;
        let service = SeaOrmPreferenceService::new(store);

        let mut bad = request(&ids[0], "#000000");
        bad.margin = -3;
        assert!(matches!(
            service.update_user_preferences(bad).await,
            Err(PreferenceError::Validation(_))
        ));
        assert!(service.get_user_preferences(None).await.unwrap().preferences.is_empty());
    }

    #[tokio::test]
    async fn store_rejects_orphan_rows() {
        let (store, _) = store_with_users(&[]).await;

        let result = store
            .upsert_preferences("no-such-user", &[("color", "#000000".to_string())])
            .await;
        assert!(result.is_err());
    }
}
