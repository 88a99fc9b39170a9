pub mod prelude;

pub mod api_keys;
pub mod batch_requests;
pub mod qr_code_requests;
pub mod user_preferences;
pub mod users;
