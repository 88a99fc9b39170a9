pub mod api_key;
pub mod batch;
pub mod preference;
pub mod qr_code;
pub mod user;
