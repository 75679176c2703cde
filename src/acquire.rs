//! Image acquisition: permission check plus picking a locator.
//!
//! On the command line the "picker" is the `--image` argument. Locators are
//! either filesystem paths (optionally `file://`) or `http(s)`/`data:` URLs.

use crate::imaging::file_normalizer::locator_path;
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("You need to grant permission to access your photos")]
    PermissionDenied,
    #[error("Failed to pick image. Please try again.")]
    Picker(#[source] std::io::Error),
}

impl AcquireError {
    /// Heading for the user-facing alert.
    pub fn title(&self) -> &'static str {
        match self {
            AcquireError::PermissionDenied => "Permission Denied",
            AcquireError::Picker(_) => "Error",
        }
    }
}

/// A place images can be picked from.
pub trait ImageSource {
    /// Ask for access to the user's photos.
    fn request_permission(&self) -> Result<bool, AcquireError>;

    /// Let the user choose an image. `None` means the user cancelled.
    fn pick_image(&self) -> Result<Option<String>, AcquireError>;
}

/// Source backed by a locator given up front.
#[derive(Debug, Clone, Default)]
pub struct PathSource {
    locator: Option<String>,
}

impl PathSource {
    pub fn new(locator: Option<String>) -> Self {
        Self { locator }
    }
}

fn is_url(locator: &str) -> bool {
    ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| locator.starts_with(scheme))
}

impl ImageSource for PathSource {
    fn request_permission(&self) -> Result<bool, AcquireError> {
        let Some(locator) = self.locator.as_deref().filter(|l| !l.trim().is_empty()) else {
            return Ok(true);
        };
        if is_url(locator) {
            return Ok(true);
        }
        let path = locator_path(locator);
        let opened = fs::metadata(path).and_then(|meta| {
            if !meta.is_file() {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("not a file: {}", path.display()),
                ));
            }
            File::open(path)
        });
        match opened {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(false),
            Err(e) => Err(AcquireError::Picker(e)),
        }
    }

    fn pick_image(&self) -> Result<Option<String>, AcquireError> {
        Ok(self.locator.clone().filter(|l| !l.trim().is_empty()))
    }
}

/// Request permission, then pick. Returns `Ok(None)` when the user cancels.
pub fn acquire_image(source: &dyn ImageSource) -> Result<Option<String>, AcquireError> {
    if !source.request_permission()? {
        return Err(AcquireError::PermissionDenied);
    }
    let picked = source.pick_image()?;
    match &picked {
        Some(locator) => log::debug!("picked image {locator}"),
        None => log::debug!("image pick cancelled"),
    }
    Ok(picked)
}
