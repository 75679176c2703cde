//! Normalizer trait and strategy selection.
//!
//! Each strategy implements [`ImageNormalizer::encode`] (the fallible part)
//! and [`ImageNormalizer::fallback`] (what to embed when encoding fails).
//! Callers use [`ImageNormalizer::normalize`], which never fails.

use super::{FetchNormalizer, FileNormalizer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unsupported locator: {0}")]
    UnsupportedLocator(String),
}

/// Where the picked image comes from, which decides how it is read.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Locators are filesystem paths or `file://` URIs.
    #[default]
    Native,
    /// Locators are fetchable URLs.
    Web,
}

/// Converts an image locator into an HTML-embeddable image source.
pub trait ImageNormalizer {
    /// Read and encode the image as a data URL.
    fn encode(&self, locator: &str) -> Result<String, NormalizeError>;

    /// Value embedded when [`encode`](Self::encode) fails.
    fn fallback(&self, locator: &str) -> String;

    /// Encode, logging and degrading to [`fallback`](Self::fallback) on error.
    fn normalize(&self, locator: &str) -> String {
        match self.encode(locator) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("could not encode image {locator}: {e}");
                self.fallback(locator)
            }
        }
    }
}

/// Build the normalizer for a platform.
pub fn normalizer_for(platform: Platform) -> Result<Box<dyn ImageNormalizer>, NormalizeError> {
    Ok(match platform {
        Platform::Native => Box::new(FileNormalizer),
        Platform::Web => Box::new(FetchNormalizer::new()?),
    })
}
