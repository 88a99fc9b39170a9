pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod permission_service;
pub mod permission_service_impl;
pub use permission_service::{PermissionError, PermissionService};
pub use permission_service_impl::SeaOrmPermissionService;

pub mod renderer;
pub mod token;
pub use token::{Claims, TokenIssuer};

pub mod qr_service;
pub mod qr_service_impl;
pub use qr_service::{QrError, QrService};
pub use qr_service_impl::SeaOrmQrService;

pub mod batch_service;
pub mod batch_service_impl;
pub use batch_service::{BatchError, BatchService};
pub use batch_service_impl::SeaOrmBatchService;

pub mod preference_service;
pub mod preference_service_impl;
pub use preference_service::{PreferenceError, PreferenceService};
pub use preference_service_impl::SeaOrmPreferenceService;

pub mod system_service;
pub mod system_service_impl;
pub use system_service::{SystemError, SystemService};
pub use system_service_impl::StaticSystemService;

pub mod docs;
