//! PNG rendering through the `qrcode` and `image` crates.

use image::{DynamicImage, ImageFormat, Rgba};
use qrcode::QrCode;
use std::io::Cursor;
use thiserror::Error;

use crate::models::{ErrorCorrection, HexColor};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Data cannot be encoded: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Render `data` with dark modules in `color` on white, at least
/// `size`×`size` pixels including the quiet zone.
pub fn render_png(
    data: &str,
    error_correction: ErrorCorrection,
    color: HexColor,
    size: u32,
) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), error_correction.ec_level())?;

    let image = code
        .render::<Rgba<u8>>()
        .dark_color(Rgba(color.rgba()))
        .light_color(Rgba(HexColor::WHITE.rgba()))
        .min_dimensions(size, size)
        .build();

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn renders_a_png_of_at_least_the_requested_size() {
        let bytes = render_png(
            "https://example.com",
            ErrorCorrection::Medium,
            HexColor::BLACK,
            200,
        )
        .unwrap();
        assert_eq!(bytes[..8], PNG_SIGNATURE);

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert!(decoded.width() >= 200);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn oversized_payload_is_an_encode_error() {
        let data = "x".repeat(8000);
        let err = render_png(&data, ErrorCorrection::High, HexColor::BLACK, 100).unwrap_err();
        assert!(matches!(err, RenderError::Encode(_)));
    }
}
