//! Card configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional user file in the data directory, so a sparse
//! file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [card]
//! title = "Greetings"               # Front cover heading
//! brand = "Card Creator"            # Footer: "Created by {name} with {brand}"
//!
//! [paper]
//! size = "letter"                   # "letter" (8.5in x 11in) or "a4"
//!
//! [fonts]
//! family = "Arial, sans-serif"
//! title_size = "28pt"
//! greeting_size = "18pt"
//! footer_size = "9pt"
//!
//! [colors]
//! background = "#ffffff"
//! text = "#333333"
//! text_muted = "#888888"            # Footer
//! accent = "#4285f4"                # Cover title
//! fold_guide = "#bbbbbb"            # Dashed fold lines (print only)
//!
//! [images]
//! platform = "native"               # "native" reads files, "web" fetches URLs
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Platform;
use crate::types::PageSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Card configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// Fixed card wording.
    pub card: CardText,
    /// Physical paper the card is printed on.
    pub paper: PaperConfig,
    /// Typography.
    pub fonts: FontConfig,
    /// Colors used by the printed card.
    pub colors: ColorScheme,
    /// Image normalization settings.
    pub images: ImagesConfig,
}

impl CardConfig {
    /// Validate that the values the document depends on are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.card.title.trim().is_empty() {
            return Err(ConfigError::Validation("card.title must not be empty".into()));
        }
        if self.card.brand.trim().is_empty() {
            return Err(ConfigError::Validation("card.brand must not be empty".into()));
        }
        if self.fonts.family.trim().is_empty() {
            return Err(ConfigError::Validation("fonts.family must not be empty".into()));
        }
        Ok(())
    }

    pub fn page_size(&self) -> PageSize {
        self.paper.size.page_size()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardText {
    /// Heading on the front cover.
    pub title: String,
    /// Product name in the back-panel attribution.
    pub brand: String,
}

impl Default for CardText {
    fn default() -> Self {
        Self {
            title: "Greetings".to_string(),
            brand: "Card Creator".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    Letter,
    A4,
}

impl PaperSize {
    pub fn page_size(self) -> PageSize {
        match self {
            PaperSize::Letter => PageSize::LETTER,
            PaperSize::A4 => PageSize::A4,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaperConfig {
    pub size: PaperSize,
}

/// Typography settings. Sizes are CSS lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub family: String,
    pub title_size: String,
    pub greeting_size: String,
    pub footer_size: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Arial, sans-serif".to_string(),
            title_size: "28pt".to_string(),
            greeting_size: "18pt".to_string(),
            footer_size: "9pt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Greeting text.
    pub text: String,
    /// Footer text.
    pub text_muted: String,
    /// Cover title.
    pub accent: String,
    /// Dashed fold lines.
    pub fold_guide: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#333333".to_string(),
            text_muted: "#888888".to_string(),
            accent: "#4285f4".to_string(),
            fold_guide: "#bbbbbb".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Which normalization strategy turns picked images into data URLs.
    pub platform: Platform,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CardConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Name of the optional config file inside the data directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Read the user's card overrides from the data directory, unmerged.
///
/// Returns `Ok(None)` when the data directory has no [`CONFIG_FILENAME`].
pub fn load_raw_config(data_dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no {} in {}, using stock card style", CONFIG_FILENAME, data_dir.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    log::debug!("card style overrides from {}", config_path.display());
    Ok(Some(toml::from_str(&content)?))
}

/// Load the card config from the data directory, merged over stock
/// defaults and validated.
pub fn load_config(dir: &Path) -> Result<CardConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: CardConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Card Maker Configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Place this file as config.toml in the data directory.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Card wording
# ---------------------------------------------------------------------------
[card]
# Heading on the front cover.
title = "Greetings"
# Back panel reads "Created by {your name} with {brand}".
brand = "Card Creator"

# ---------------------------------------------------------------------------
# Paper
# ---------------------------------------------------------------------------
[paper]
# "letter" (8.5in x 11in) or "a4". The sheet is folded in quarters.
size = "letter"

# ---------------------------------------------------------------------------
# Typography (CSS values)
# ---------------------------------------------------------------------------
[fonts]
family = "Arial, sans-serif"
title_size = "28pt"
greeting_size = "18pt"
footer_size = "9pt"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#ffffff"
text = "#333333"
text_muted = "#888888"    # Back panel attribution
accent = "#4285f4"        # Cover title
fold_guide = "#bbbbbb"    # Dashed fold lines, printed only

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# "native" reads picked files from disk.
# "web" fetches http(s) URLs and falls back to linking them on failure.
platform = "native"
"##
}

/// Generate CSS custom properties and the `@page` rule from config.
pub fn generate_card_css(config: &CardConfig) -> String {
    format!(
        r#"@page {{
    size: {page};
    margin: 0;
}}

:root {{
    --page-width: {width}in;
    --page-height: {height}in;
    --font-family: {family};
    --title-size: {title_size};
    --greeting-size: {greeting_size};
    --footer-size: {footer_size};
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-fold-guide: {fold_guide};
}}"#,
        page = config.page_size().to_css(),
        width = config.page_size().width,
        height = config.page_size().height,
        family = config.fonts.family,
        title_size = config.fonts.title_size,
        greeting_size = config.fonts.greeting_size,
        footer_size = config.fonts.footer_size,
        background = config.colors.background,
        text = config.colors.text,
        text_muted = config.colors.text_muted,
        accent = config.colors.accent,
        fold_guide = config.colors.fold_guide,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_letter_native() {
        let config = CardConfig::default();
        assert_eq!(config.paper.size, PaperSize::Letter);
        assert_eq!(config.images.platform, Platform::Native);
        assert_eq!(config.card.brand, "Card Creator");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
accent = "#ff0000"
"##;
        let config: CardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.accent, "#ff0000");
        assert_eq!(config.colors.text, "#333333");
        assert_eq!(config.card.title, "Greetings");
    }

    #[test]
    fn parse_paper_and_platform() {
        let toml = r#"
[paper]
size = "a4"

[images]
platform = "web"
"#;
        let config: CardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.page_size(), PageSize::A4);
        assert_eq!(config.images.platform, Platform::Web);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.card.title, "Greetings");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[card]
title = "Happy Birthday"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.card.title, "Happy Birthday");
        assert_eq!(config.card.brand, "Card Creator");
    }

    #[test]
    fn raw_config_is_none_without_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn raw_config_is_sparse() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[paper]\nsize = \"a4\"\n").unwrap();

        let raw = load_raw_config(tmp.path()).unwrap().unwrap();
        assert_eq!(raw["paper"]["size"].as_str(), Some("a4"));
        assert!(raw.get("card").is_none());
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[card]
titel = "typo"
"#;
        assert!(toml::from_str::<CardConfig>(toml).is_err());
    }

    #[test]
    fn blank_title_fails_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[card]\ntitle = \"   \"\n",
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value =
            toml::from_str("[colors]\ntext = \"#000\"\naccent = \"#111\"").unwrap();
        let overlay: toml::Value = toml::from_str("[colors]\naccent = \"#222\"").unwrap();
        let merged = merge_toml(base, overlay);
        let colors = merged.get("colors").unwrap();
        assert_eq!(colors.get("text").unwrap().as_str(), Some("#000"));
        assert_eq!(colors.get("accent").unwrap().as_str(), Some("#222"));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: CardConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = CardConfig::default();
        assert_eq!(config.card.title, defaults.card.title);
        assert_eq!(config.fonts.family, defaults.fonts.family);
        assert_eq!(config.colors.fold_guide, defaults.colors.fold_guide);
    }

    #[test]
    fn card_css_has_page_rule_and_variables() {
        let css = generate_card_css(&CardConfig::default());
        assert!(css.contains("size: 8.5in 11in;"));
        assert!(css.contains("--color-fold-guide: #bbbbbb;"));
        assert!(css.contains("--font-family: Arial, sans-serif;"));
    }
}
