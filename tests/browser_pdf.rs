//! PDF output through headless Chrome.
//!
//! Run with: `cargo test --features pdf --test browser_pdf -- --ignored`

#![cfg(feature = "pdf")]

use card_maker::card;
use card_maker::config::{CardConfig, PaperSize};
use card_maker::print::{PdfDispatcher, PrintDispatcher};
use card_maker::types::PageSize;
use tempfile::TempDir;

fn render(config: &CardConfig) -> (TempDir, card_maker::types::Artifact) {
    let tmp = TempDir::new().unwrap();
    let markup = card::build_document_with(config, "", "Happy\nBirthday", Some("Ada"));
    let artifact = PdfDispatcher::new(tmp.path())
        .render_to_file(&markup, config.page_size())
        .expect("failed to print card");
    (tmp, artifact)
}

#[test]
#[ignore]
fn letter_card_prints_to_pdf() {
    let (tmp, artifact) = render(&CardConfig::default());

    assert_eq!(artifact.path, tmp.path().join("card.pdf"));
    assert_eq!(artifact.page, PageSize::LETTER);
    let bytes = std::fs::read(&artifact.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "not a PDF");
    // HTML is staged next to the PDF for Chrome to load.
    assert!(tmp.path().join("card.html").exists());
}

#[test]
#[ignore]
fn a4_card_carries_configured_page() {
    let mut config = CardConfig::default();
    config.paper.size = PaperSize::A4;
    let (_tmp, artifact) = render(&config);

    assert_eq!(artifact.page, PageSize::A4);
    assert!(std::fs::read(&artifact.path).unwrap().starts_with(b"%PDF"));
}
