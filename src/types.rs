//! Shared types passed between the acquisition, generation, and print stages.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The signed-in user.
///
/// Exactly one session exists per data directory. It is written on every
/// sign-in or sign-up and removed on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// The card being composed. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    /// Greeting text as typed, newlines included.
    pub greeting: String,
    /// Locator returned by the image source, if one was picked.
    pub image_locator: Option<String>,
}

impl CardDraft {
    pub fn new(greeting: impl Into<String>, image_locator: Option<String>) -> Self {
        Self {
            greeting: greeting.into(),
            image_locator,
        }
    }

    /// True when the greeting has something other than whitespace.
    pub fn has_greeting(&self) -> bool {
        !self.greeting.trim().is_empty()
    }
}

/// Physical page dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize {
        width: 8.5,
        height: 11.0,
    };
    pub const A4: PageSize = PageSize {
        width: 8.27,
        height: 11.69,
    };

    /// Value for the CSS `@page { size: ... }` descriptor.
    pub fn to_css(&self) -> String {
        format!("{}in {}in", self.width, self.height)
    }
}

/// A printable file produced by a print dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub page: PageSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_greeting_is_not_a_greeting() {
        assert!(!CardDraft::new("  \n\t ", None).has_greeting());
        assert!(CardDraft::new(" hi ", None).has_greeting());
    }

    #[test]
    fn letter_page_css() {
        assert_eq!(PageSize::LETTER.to_css(), "8.5in 11in");
    }

    #[test]
    fn session_serializes_with_plain_field_names() {
        let session = Session {
            id: "1".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
        };
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(json, r#"{"id":"1","email":"ada@example.com","name":"Ada"}"#);
    }
}
