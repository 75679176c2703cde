//! Shared test fixtures for the card-maker test suite.

use std::path::{Path, PathBuf};

use crate::types::{CardDraft, Session};

/// Smallest byte string `image::guess_format` recognises as JPEG.
pub const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00\x01\x01\x00\x00\x01\x00\x01\x00\x00\xff\xd9";

/// Write [`JPEG_BYTES`] to `dir/name` and return the path.
pub fn write_jpeg(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, JPEG_BYTES).unwrap();
    path
}

pub fn sample_session() -> Session {
    Session {
        id: "1".to_string(),
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
    }
}

/// A complete draft: two-line greeting plus an image locator.
pub fn sample_draft() -> CardDraft {
    CardDraft::new("Happy\nBirthday", Some("/photos/beach.jpg".to_string()))
}
