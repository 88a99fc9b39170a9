pub use super::api_keys::Entity as ApiKeys;
pub use super::batch_requests::Entity as BatchRequests;
pub use super::qr_code_requests::Entity as QrCodeRequests;
pub use super::user_preferences::Entity as UserPreferences;
pub use super::users::Entity as Users;
