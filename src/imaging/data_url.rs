//! Pure data-URL helpers. No I/O.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;

/// Media type used when the bytes are not a recognised image format.
pub const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Sniff the media type of encoded image bytes.
///
/// Only the magic number is inspected. Unknown content keeps the JPEG marker
/// so the output matches what photo pickers hand back in practice.
pub fn media_type(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Tiff) => "image/tiff",
        Ok(ImageFormat::Bmp) => "image/bmp",
        _ => DEFAULT_MEDIA_TYPE,
    }
}

/// Encode bytes as `data:<media-type>;base64,<payload>`.
pub fn encode_data_url(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type(bytes), STANDARD.encode(bytes))
}
