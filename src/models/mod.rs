pub mod color;
pub mod qr;
pub mod user;

use thiserror::Error;

pub use color::HexColor;
pub use qr::{BatchStatus, DataType, ErrorCorrection, OutputFormat};
pub use user::Role;

/// A stored or submitted enum value that matches none of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
