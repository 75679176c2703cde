//! CLI output formatting.
//!
//! Each message has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout or stderr.
//! Format functions are pure.
//!
//! ```text
//! Signed in as Ada <ada@example.com>
//!
//! Card → out/card.html
//!     Page: 8.5in × 11in
//!     Print at 100% scale, then fold top half back and left half back.
//!
//! Missing Greeting
//!     Please add a greeting message for your card
//! ```

use crate::flow::FlowState;
use crate::types::{Artifact, Session};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

pub fn format_session(session: Option<&Session>) -> Vec<String> {
    match session {
        Some(s) => vec![format!("Signed in as {} <{}>", s.name, s.email)],
        None => vec!["Not signed in".to_string()],
    }
}

pub fn print_session(session: Option<&Session>) {
    for line in format_session(session) {
        println!("{}", line);
    }
}

/// A blocking alert: heading line plus indented message.
pub fn format_alert(title: &str, message: &str) -> Vec<String> {
    vec![title.to_string(), format!("{}{}", indent(1), message)]
}

pub fn print_alert(title: &str, message: &str) {
    for line in format_alert(title, message) {
        eprintln!("{}", line);
    }
}

pub fn format_artifact(artifact: &Artifact) -> Vec<String> {
    vec![
        format!("Card → {}", artifact.path.display()),
        format!(
            "{}Page: {}in × {}in",
            indent(1),
            artifact.page.width,
            artifact.page.height
        ),
        format!(
            "{}Print at 100% scale, then fold top half back and left half back.",
            indent(1)
        ),
    ]
}

pub fn print_artifact(artifact: &Artifact) {
    for line in format_artifact(artifact) {
        println!("{}", line);
    }
}

/// One-line rendering of the states a generation passed through.
pub fn format_trace(trace: &[FlowState]) -> String {
    trace
        .iter()
        .map(|s| format!("{:?}", s))
        .collect::<Vec<_>>()
        .join(" → ")
}
