//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::api::types::{LoginResponse, LogoutResponse};
use crate::db::Store;
use crate::services::auth_service::{
    AuthError, AuthService, LOGOUT_INVALID_TOKEN, LOGOUT_SUCCESS, TOKEN_TYPE,
};
use crate::services::token::{Claims, TokenIssuer};

pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenIssuer,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::Validation("Email is required".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        let Some(user) = self.store.get_user_by_email(email).await? else {
            metrics::counter!("logins_total", "outcome" => "unknown_user").increment(1);
            return Err(AuthError::UserNotFound);
        };

        if !self.store.verify_user_password(&user, password).await? {
            metrics::counter!("logins_total", "outcome" => "bad_password").increment(1);
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue(&user.id)?;
        self.store.create_api_key(&user.id, &access_token).await?;

        metrics::counter!("logins_total", "outcome" => "success").increment(1);
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
        })
    }

    async fn logout(&self, token: &str) -> Result<LogoutResponse, AuthError> {
        let Some(api_key) = self.store.get_api_key(token).await? else {
            return Ok(LogoutResponse {
                message: LOGOUT_INVALID_TOKEN.to_string(),
            });
        };

        self.store.delete_api_key(&api_key.id).await?;
        info!(user_id = %api_key.user_id, "User logged out");

        Ok(LogoutResponse {
            message: LOGOUT_SUCCESS.to_string(),
        })
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.tokens.verify(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::models::Role;

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "auth-service-test-secret".to_string(),
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    async fn service_with_user() -> (SeaOrmAuthService, Store, String) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let user = store
            .create_user("alice@example.com", "correct horse", Role::User, &security())
            .await
            .unwrap();
        let service = SeaOrmAuthService::new(store.clone(), TokenIssuer::new(&security()));
        (service, store, user.id)
    }

    #[tokio::test]
    async fn login_issues_token_for_user() {
        let (service, store, user_id) = service_with_user().await;

        let response = service
            .login("Alice@Example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(response.token_type, "bearer");

        let claims = service.decode_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, user_id);

        let stored = store.get_api_key(&response.access_token).await.unwrap();
        assert_eq!(stored.map(|k| k.user_id), Some(user_id));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_email() {
        let (service, _, _) = service_with_user().await;

        assert!(matches!(
            service.login("alice@example.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("bob@example.com", "correct horse").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn logout_twice_reports_invalid_token() {
        let (service, _, _) = service_with_user().await;
        let token = service
            .login("alice@example.com", "correct horse")
            .await
            .unwrap()
            .access_token;

        assert_eq!(service.logout(&token).await.unwrap().message, LOGOUT_SUCCESS);
        assert_eq!(
            service.logout(&token).await.unwrap().message,
            LOGOUT_INVALID_TOKEN
        );
    }

    #[tokio::test]
    async fn error_conversions_work() {
        let db_err = sea_orm::DbErr::Custom("test".to_string());
        let auth_err: AuthError = db_err.into();
        assert!(matches!(auth_err, AuthError::Database(_)));
    }
}
