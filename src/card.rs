//! Card document generation.
//!
//! Builds a single self-contained HTML page describing a quarter-fold card.
//! The sheet is split into four equal panels by one horizontal and one
//! vertical fold guide:
//!
//! ```text
//! ┌──────────────┬──────────────┐
//! │ inside-right │ inside-left  │   ← printed upside down
//! │  (greeting)  │   (photo)    │
//! ├╌╌╌╌╌╌╌╌╌╌╌╌╌╌┼╌╌╌╌╌╌╌╌╌╌╌╌╌╌┤
//! │     back     │    front     │
//! │ (attribution)│ (title+photo)│
//! └──────────────┴──────────────┘
//! ```
//!
//! Fold the top half behind the bottom half, then fold the left half behind
//! the right. The front cover ends up facing out and the inside panels read
//! upright when the card is opened.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time templating. Every
//! interpolated string is escaped, so greetings and names cannot inject
//! markup. Output is deterministic: the same inputs give the same bytes.

use crate::config::{self, CardConfig};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/card.css");

/// Shown in place of an empty greeting.
pub const PLACEHOLDER_GREETING: &str = "Your greeting will appear here";

/// Attribution name used when no author is known.
pub const DEFAULT_AUTHOR: &str = "Card Creator User";

/// Alt text for both photo panels.
pub const IMAGE_ALT: &str = "Greeting Card Image";

/// Embedded when the image source is empty: a grey landscape sketch.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSI0MDAiIGhlaWdodD0iMzAwIiB2aWV3Qm94PSIwIDAgNDAwIDMwMCI+PHJlY3Qgd2lkdGg9IjQwMCIgaGVpZ2h0PSIzMDAiIGZpbGw9IiNlZWVlZWUiLz48cGF0aCBkPSJNNjAgMjQwbDkwLTExMCA3MCA4MCA1MC01MCA3MCA4MHoiIGZpbGw9IiNjY2NjY2MiLz48Y2lyY2xlIGN4PSIyOTAiIGN5PSI5MCIgcj0iMjgiIGZpbGw9IiNjY2NjY2MiLz48L3N2Zz4=";

/// Build the card with stock styling.
pub fn build_document(image_source: &str, greeting: &str, author_name: Option<&str>) -> String {
    build_document_with(&CardConfig::default(), image_source, greeting, author_name)
}

/// Build the card with the given styling.
pub fn build_document_with(
    config: &CardConfig,
    image_source: &str,
    greeting: &str,
    author_name: Option<&str>,
) -> String {
    let css = format!("{}\n\n{}", config::generate_card_css(config), CSS_STATIC);
    let image_source = if image_source.is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        image_source
    };
    let author = author_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_AUTHOR);

    let content = html! {
        main.sheet {
            div.row.row-inside {
                (panel("inside-left", photo(image_source)))
                (panel("inside-right", greeting_text(greeting)))
            }
            div.row.row-outside {
                (panel("back", attribution(author, &config.card.brand)))
                (panel("front", html! {
                    h1.cover-title { (config.card.title) }
                    (photo(image_source))
                }))
            }
            div.fold-guide.fold-horizontal {}
            div.fold-guide.fold-vertical {}
        }
    };

    base_document("Greeting Card", &css, content).into_string()
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn panel(name: &str, content: Markup) -> Markup {
    html! {
        section class={ "panel panel-" (name) } {
            (content)
        }
    }
}

fn photo(source: &str) -> Markup {
    html! {
        figure.photo {
            img src=(source) alt=(IMAGE_ALT);
        }
    }
}

/// Greeting with each input line on its own visual line.
fn greeting_text(greeting: &str) -> Markup {
    if greeting.trim().is_empty() {
        return html! { p.greeting { (PLACEHOLDER_GREETING) } };
    }
    html! {
        p.greeting {
            @for (idx, line) in greeting.split('\n').enumerate() {
                @if idx > 0 { br; }
                (line.trim_end_matches('\r'))
            }
        }
    }
}

fn attribution(author: &str, brand: &str) -> Markup {
    html! {
        p.attribution { "Created by " (author) " with " (brand) }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const IMG: &str = "data:image/jpeg;base64,/9j/4AAQ";

    #[test]
    fn document_starts_with_doctype() {
        let doc = build_document(IMG, "Hello", None);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Greeting Card</title>"));
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let a = build_document(IMG, "Happy\nBirthday", Some("Ada"));
        let b = build_document(IMG, "Happy\nBirthday", Some("Ada"));
        assert_eq!(a, b);
    }

    #[test]
    fn newlines_become_line_breaks() {
        let doc = build_document(IMG, "Hi\nthere", None);
        assert!(doc.contains("Hi<br>there"));
        assert!(!doc.contains("Hi\nthere"));
    }

    #[test]
    fn crlf_newlines_become_line_breaks() {
        let doc = build_document(IMG, "Hi\r\nthere", None);
        assert!(doc.contains("Hi<br>there"));
    }

    #[test]
    fn empty_image_uses_placeholder() {
        let doc = build_document("", "Hello", None);
        assert!(doc.contains(PLACEHOLDER_IMAGE));
        assert!(!doc.contains(r#"src="""#));
    }

    #[test]
    fn image_appears_on_front_and_inside() {
        let doc = build_document(IMG, "Hello", None);
        assert_eq!(doc.matches(IMG).count(), 2);
        assert!(doc.contains(r#"alt="Greeting Card Image""#));
    }

    #[test]
    fn missing_author_uses_default_attribution() {
        let doc = build_document(IMG, "Hello", None);
        assert!(doc.contains("Created by Card Creator User with Card Creator"));
    }

    #[test]
    fn blank_author_uses_default_attribution() {
        let doc = build_document(IMG, "Hello", Some("  "));
        assert!(doc.contains("Created by Card Creator User with Card Creator"));
    }

    #[test]
    fn author_name_in_attribution() {
        let doc = build_document(IMG, "Hello", Some("Ada"));
        assert!(doc.contains("Created by Ada with Card Creator"));
    }

    #[test]
    fn empty_greeting_uses_placeholder_text() {
        let doc = build_document(IMG, "   ", None);
        assert!(doc.contains(PLACEHOLDER_GREETING));
    }

    #[test]
    fn four_panels_and_two_fold_guides() {
        let doc = build_document(IMG, "Hello", None);
        for name in ["front", "back", "inside-left", "inside-right"] {
            assert!(
                doc.contains(&format!(r#"class="panel panel-{name}""#)),
                "missing panel {name}"
            );
        }
        assert!(doc.contains("fold-guide fold-horizontal"));
        assert!(doc.contains("fold-guide fold-vertical"));
    }

    #[test]
    fn fold_guides_only_shown_in_print() {
        let doc = build_document(IMG, "Hello", None);
        assert!(doc.contains("@media print"));
    }

    #[test]
    fn page_sized_to_letter_by_default() {
        let doc = build_document(IMG, "Hello", None);
        assert!(doc.contains("size: 8.5in 11in;"));
    }

    #[test]
    fn front_cover_uses_configured_title() {
        let mut config = CardConfig::default();
        config.card.title = "Happy Holidays".to_string();
        let doc = build_document_with(&config, IMG, "Hello", None);
        assert!(doc.contains(r#"<h1 class="cover-title">Happy Holidays</h1>"#));
    }

    #[test]
    fn greeting_markup_is_escaped() {
        let doc = build_document(IMG, "<script>alert('x')</script>", None);
        assert!(!doc.contains("<script>alert"));
        assert!(doc.contains("&lt;script&gt;"));
    }

    #[test]
    fn author_markup_is_escaped() {
        let doc = build_document(IMG, "Hello", Some("<b>Eve</b>"));
        assert!(doc.contains("Created by &lt;b&gt;Eve&lt;/b&gt; with"));
    }

    #[test]
    fn image_source_attribute_is_escaped() {
        let doc = build_document(r#"x" onerror="alert(1)"#, "Hello", None);
        assert!(!doc.contains(r#"onerror="alert(1)""#));
    }
}
