//! Web strategy: fetch the picked image over HTTP.

use super::encode_data_url;
use super::normalizer::{ImageNormalizer, NormalizeError};
use reqwest::blocking::Client;

/// Fetches `http(s)` locators and base64-encodes the body.
///
/// Failure passes the locator through unchanged, so the card links the image
/// instead of embedding it.
#[derive(Debug, Clone)]
pub struct FetchNormalizer {
    client: Client,
}

impl FetchNormalizer {
    pub fn new() -> Result<Self, NormalizeError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

impl ImageNormalizer for FetchNormalizer {
    fn encode(&self, locator: &str) -> Result<String, NormalizeError> {
        if locator.starts_with("data:") {
            return Ok(locator.to_string());
        }
        if !(locator.starts_with("http://") || locator.starts_with("https://")) {
            return Err(NormalizeError::UnsupportedLocator(locator.to_string()));
        }
        let bytes = self
            .client
            .get(locator)
            .send()?
            .error_for_status()?
            .bytes()?;
        log::debug!("fetched {} bytes from {locator}", bytes.len());
        Ok(encode_data_url(&bytes))
    }

    fn fallback(&self, locator: &str) -> String {
        locator.to_string()
    }
}
