//! `SeaORM` implementation of the `PermissionService` trait.

use async_trait::async_trait;
use tracing::debug;

use crate::api::types::CheckPermissionResponse;
use crate::db::Store;
use crate::services::TokenIssuer;
use crate::services::permission_service::{
    MSG_INVALID_TOKEN, MSG_USER_NOT_FOUND, PermissionError, PermissionService, decide,
};

pub struct SeaOrmPermissionService {
    store: Store,
    tokens: TokenIssuer,
}

impl SeaOrmPermissionService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }
}

#[async_trait]
impl PermissionService for SeaOrmPermissionService {
    async fn check_permission(
        &self,
        token: &str,
        action: &str,
    ) -> Result<CheckPermissionResponse, PermissionError> {
        // A stored key whose JWT has expired or was signed elsewhere is still invalid.
        if let Err(e) = self.tokens.verify(token) {
            debug!(error = %e, "Rejected access token");
            return Ok(CheckPermissionResponse::denied(MSG_INVALID_TOKEN));
        }

        let Some(api_key) = self.store.get_api_key(token).await? else {
            return Ok(CheckPermissionResponse::denied(MSG_INVALID_TOKEN));
        };

        let Some(user) = self.store.get_user_by_id(&api_key.user_id).await? else {
            return Ok(CheckPermissionResponse::denied(MSG_USER_NOT_FOUND));
        };

        let decision = decide(user.role, action);
        debug!(
            user_id = %user.id,
            role = %user.role,
            action,
            authorized = decision.is_authorized,
            "Permission checked"
        );

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::models::Role;
    use crate::services::Claims;
    use crate::services::permission_service::{CREATE_QR_CODE, MSG_ROLE_DENIED};
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "permission-test-secret";

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: SECRET.to_string(),
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    async fn store_with_user(role: Role) -> (Store, String) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let user = store
            .create_user("carol@example.com", "pw", role, &security())
            .await
            .unwrap();
        (store, user.id)
    }

    /// Issues a token for the user and stores it the way login does.
    async fn service_with_token(role: Role) -> (SeaOrmPermissionService, String) {
        let (store, user_id) = store_with_user(role).await;
        let tokens = TokenIssuer::new(&security());
        let token = tokens.issue(&user_id).unwrap();
        store.create_api_key(&user_id, &token).await.unwrap();
        (SeaOrmPermissionService::new(store, tokens), token)
    }

    #[tokio::test]
    async fn premium_user_may_create_qr_codes() {
        let (service, token) = service_with_token(Role::PremiumUser).await;

        let response = service.check_permission(&token, CREATE_QR_CODE).await.unwrap();
        assert!(response.is_authorized);
        assert!(response.message.is_none());
    }

    #[tokio::test]
    async fn plain_user_is_denied() {
        let (service, token) = service_with_token(Role::User).await;

        let response = service.check_permission(&token, CREATE_QR_CODE).await.unwrap();
        assert!(!response.is_authorized);
        assert_eq!(response.message.as_deref(), Some(MSG_ROLE_DENIED));
    }

    #[tokio::test]
    async fn unknown_token_is_denied_softly() {
        let (service, _) = service_with_token(Role::Administrator).await;

        let response = service
            .check_permission("nope", CREATE_QR_CODE)
            .await
            .unwrap();
        assert!(!response.is_authorized);
        assert_eq!(response.message.as_deref(), Some(MSG_INVALID_TOKEN));
    }

    #[tokio::test]
    async fn valid_token_without_stored_key_is_denied() {
        let (store, user_id) = store_with_user(Role::Administrator).await;
        let tokens = TokenIssuer::new(&security());
        let token = tokens.issue(&user_id).unwrap();
        let service = SeaOrmPermissionService::new(store, tokens);

        let response = service.check_permission(&token, CREATE_QR_CODE).await.unwrap();
        assert_eq!(response.message.as_deref(), Some(MSG_INVALID_TOKEN));
    }

    #[tokio::test]
    async fn expired_token_is_denied_even_when_stored() {
        let (store, user_id) = store_with_user(Role::Administrator).await;
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.clone(),
            iat: now - 7200,
            exp: now - 3600,
            jti: "expired".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        store.create_api_key(&user_id, &token).await.unwrap();

        let service = SeaOrmPermissionService::new(store, TokenIssuer::new(&security()));
        let response = service.check_permission(&token, CREATE_QR_CODE).await.unwrap();
        assert!(!response.is_authorized);
        assert_eq!(response.message.as_deref(), Some(MSG_INVALID_TOKEN));
    }
}
