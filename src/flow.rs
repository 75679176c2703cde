//! The card generation state machine.
//!
//! ```text
//! Idle → Validating → Normalizing → Building → Dispatching → Idle
//!            │                                      │
//!            └── missing image / greeting ──────────┴── failure ──→ Idle
//! ```
//!
//! Stages run strictly in order and each one finishes before the next
//! starts. Validation happens before any filesystem or network access, so a
//! draft without an image or greeting never reaches the normalizer or the
//! dispatcher. Whatever happens, the flow finishes back in `Idle`.

use crate::card;
use crate::config::CardConfig;
use crate::imaging::ImageNormalizer;
use crate::print::{PrintDispatcher, PrintError};
use crate::types::{Artifact, CardDraft, Session};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    Normalizing,
    Building,
    Dispatching,
}

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Please select an image for your card")]
    MissingImage,
    #[error("Please add a greeting message for your card")]
    MissingGreeting,
    #[error("Failed to generate printable card. Please try again.")]
    Dispatch(#[source] PrintError),
}

impl FlowError {
    /// Heading for the user-facing alert.
    pub fn title(&self) -> &'static str {
        match self {
            FlowError::MissingImage => "Missing Image",
            FlowError::MissingGreeting => "Missing Greeting",
            FlowError::Dispatch(_) => "Error",
        }
    }
}

/// Drives one card from draft to printable artifact.
pub struct GenerationFlow<'a> {
    normalizer: &'a dyn ImageNormalizer,
    dispatcher: &'a dyn PrintDispatcher,
    config: &'a CardConfig,
    state: FlowState,
    trace: Vec<FlowState>,
}

impl<'a> GenerationFlow<'a> {
    pub fn new(
        normalizer: &'a dyn ImageNormalizer,
        dispatcher: &'a dyn PrintDispatcher,
        config: &'a CardConfig,
    ) -> Self {
        Self {
            normalizer,
            dispatcher,
            config,
            state: FlowState::Idle,
            trace: Vec::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Every state entered by the most recent [`run`](Self::run).
    pub fn trace(&self) -> &[FlowState] {
        &self.trace
    }

    /// Generate and present a card. The session, when present, supplies the
    /// attribution name.
    pub fn run(
        &mut self,
        draft: &CardDraft,
        session: Option<&Session>,
    ) -> Result<Artifact, FlowError> {
        self.trace.clear();
        let result = self.run_stages(draft, session);
        if let Err(e) = &result {
            log::debug!("generation stopped in {:?}: {e}", self.state);
        }
        self.enter(FlowState::Idle);
        result
    }

    fn run_stages(
        &mut self,
        draft: &CardDraft,
        session: Option<&Session>,
    ) -> Result<Artifact, FlowError> {
        self.enter(FlowState::Validating);
        let locator = draft
            .image_locator
            .as_deref()
            .filter(|l| !l.is_empty())
            .ok_or(FlowError::MissingImage)?;
        if !draft.has_greeting() {
            return Err(FlowError::MissingGreeting);
        }

        self.enter(FlowState::Normalizing);
        let image_source = self.normalizer.normalize(locator);

        self.enter(FlowState::Building);
        let document = card::build_document_with(
            self.config,
            &image_source,
            &draft.greeting,
            session.map(|s| s.name.as_str()),
        );

        self.enter(FlowState::Dispatching);
        let dispatched = self
            .dispatcher
            .render_to_file(&document, self.config.page_size())
            .and_then(|artifact| {
                self.dispatcher.present(&artifact)?;
                Ok(artifact)
            });
        dispatched.map_err(|e| {
            log::error!("error generating printable card: {e}");
            FlowError::Dispatch(e)
        })
    }

    fn enter(&mut self, state: FlowState) {
        log::debug!("generation: {:?} -> {:?}", self.state, state);
        self.state = state;
        self.trace.push(state);
    }
}
