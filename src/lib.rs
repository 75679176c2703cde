//! # Card Maker
//!
//! Printable quarter-fold greeting cards from a photo and a greeting.
//!
//! # Architecture: Sequential Generation
//!
//! A card goes through four stages, each finishing before the next starts:
//!
//! ```text
//! 1. Acquire    --image        →  locator       (permission + pick)
//! 2. Normalize  locator        →  data URL      (file read or HTTP fetch)
//! 3. Build      data URL + text →  HTML document (pure, deterministic)
//! 4. Dispatch   HTML document  →  card.html / card.pdf
//! ```
//!
//! Stages 2–4 are driven by [`flow::GenerationFlow`], an explicit state
//! machine that validates the draft before touching the filesystem or the
//! network. The signed-in [`types::Session`] is passed in explicitly and only
//! supplies the attribution name on the back panel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`acquire`] | Image permission and picking ([`acquire::ImageSource`]) |
//! | [`imaging`] | Locator → data URL normalization, one strategy per platform |
//! | [`card`] | Card document builder, rendered with Maud |
//! | [`print`] | Print dispatchers: HTML file, or PDF with the `pdf` feature |
//! | [`flow`] | The `Idle → Validating → … → Idle` generation state machine |
//! | [`session`] | Single-record session store and mock sign-in/up/out |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types (`Session`, `CardDraft`, `PageSize`, `Artifact`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Self-Contained Documents
//!
//! The photo is embedded as a base64 data URL and the stylesheet is inlined,
//! so the card file can be moved, mailed, or printed from any browser with
//! no external references.
//!
//! ## Degrade, Don't Fail
//!
//! Image normalization never fails a generation. A file that can't be read
//! embeds nothing; a URL that can't be fetched is linked instead of
//! embedded. Both cases are logged.
//!
//! ## Escaped User Text
//!
//! Greetings and names are interpolated through Maud, which escapes markup.
//! Only newlines are turned into `<br>`.

pub mod acquire;
pub mod card;
pub mod config;
pub mod flow;
pub mod imaging;
pub mod output;
pub mod print;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
