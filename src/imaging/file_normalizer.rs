//! Native strategy: read the picked file from disk.

use super::encode_data_url;
use super::normalizer::{ImageNormalizer, NormalizeError};
use std::path::Path;

/// Reads plain paths and `file://` URIs, base64-encoding the contents.
///
/// Failure yields an empty image source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileNormalizer;

/// Strip a `file://` scheme, leaving a filesystem path.
///
/// Percent-escapes are not decoded; pickers on the native side hand back
/// literal paths.
pub fn locator_path(locator: &str) -> &Path {
    Path::new(locator.strip_prefix("file://").unwrap_or(locator))
}

impl ImageNormalizer for FileNormalizer {
    fn encode(&self, locator: &str) -> Result<String, NormalizeError> {
        if locator.starts_with("data:") {
            return Ok(locator.to_string());
        }
        let bytes = std::fs::read(locator_path(locator))?;
        log::debug!("read {} bytes from {locator}", bytes.len());
        Ok(encode_data_url(&bytes))
    }

    fn fallback(&self, _locator: &str) -> String {
        String::new()
    }
}
