//! Print dispatch: turning a card document into a printable file.
//!
//! [`HtmlFileDispatcher`] writes the document as `card.html`; the page size is
//! carried by the document's own `@page` rule, so any browser's print dialog
//! produces a correctly sized sheet. With the `pdf` feature,
//! [`PdfDispatcher`] drives a local Chrome to print `card.pdf` directly.

use crate::types::{Artifact, PageSize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render failed: {0}")]
    Render(String),
}

/// Renders markup to a printable artifact and presents it to the user.
pub trait PrintDispatcher {
    fn render_to_file(&self, markup: &str, page: PageSize) -> Result<Artifact, PrintError>;

    fn present(&self, artifact: &Artifact) -> Result<(), PrintError>;
}

/// Writes `card.html` into an output directory.
#[derive(Debug, Clone)]
pub struct HtmlFileDispatcher {
    output_dir: PathBuf,
}

impl HtmlFileDispatcher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl PrintDispatcher for HtmlFileDispatcher {
    fn render_to_file(&self, markup: &str, page: PageSize) -> Result<Artifact, PrintError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join("card.html");
        fs::write(&path, markup)?;
        log::info!("wrote {}", path.display());
        Ok(Artifact { path, page })
    }

    fn present(&self, artifact: &Artifact) -> Result<(), PrintError> {
        if !artifact.path.exists() {
            return Err(PrintError::Render(format!(
                "artifact missing: {}",
                artifact.path.display()
            )));
        }
        crate::output::print_artifact(artifact);
        Ok(())
    }
}

#[cfg(feature = "pdf")]
pub use pdf::PdfDispatcher;

#[cfg(feature = "pdf")]
mod pdf {
    use super::*;
    use headless_chrome::types::PrintToPdfOptions;
    use headless_chrome::{Browser, LaunchOptions};

    /// Prints the card to `card.pdf` through headless Chrome.
    ///
    /// The markup is staged as `card.html` next to the PDF so Chrome can load
    /// it from a `file://` URL.
    #[derive(Debug, Clone)]
    pub struct PdfDispatcher {
        html: HtmlFileDispatcher,
        output_dir: PathBuf,
    }

    impl PdfDispatcher {
        pub fn new(output_dir: impl Into<PathBuf>) -> Self {
            let output_dir = output_dir.into();
            Self {
                html: HtmlFileDispatcher::new(output_dir.clone()),
                output_dir,
            }
        }
    }

    fn render_err(e: impl std::fmt::Display) -> PrintError {
        PrintError::Render(e.to_string())
    }

    impl PrintDispatcher for PdfDispatcher {
        fn render_to_file(&self, markup: &str, page: PageSize) -> Result<Artifact, PrintError> {
            let staged = self.html.render_to_file(markup, page)?;
            let source = fs::canonicalize(&staged.path)?;

            let browser = Browser::new(LaunchOptions::default()).map_err(render_err)?;
            let tab = browser.new_tab().map_err(render_err)?;
            tab.navigate_to(&format!("file://{}", source.display()))
                .map_err(render_err)?
                .wait_until_navigated()
                .map_err(render_err)?;
            let bytes = tab
                .print_to_pdf(Some(PrintToPdfOptions {
                    paper_width: Some(page.width),
                    paper_height: Some(page.height),
                    margin_top: Some(0.0),
                    margin_bottom: Some(0.0),
                    margin_left: Some(0.0),
                    margin_right: Some(0.0),
                    print_background: Some(true),
                    prefer_css_page_size: Some(true),
                    ..Default::default()
                }))
                .map_err(render_err)?;

            let path = self.output_dir.join("card.pdf");
            fs::write(&path, bytes)?;
            log::info!("wrote {}", path.display());
            Ok(Artifact { path, page })
        }

        fn present(&self, artifact: &Artifact) -> Result<(), PrintError> {
            self.html.present(artifact)
        }
    }
}
