//! Analysis Controller
//!
//! Owns the selection and the visible [`UiState`], and drives the extraction
//! call. All mutation happens on the task that owns the controller; spawned
//! extraction tasks only report back through a channel.
//!
//! Every new selection and every new analysis bumps a generation counter.
//! Outcomes tagged with an older generation are discarded, so a slow call
//! can never overwrite the state of a newer selection.

use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use textlens_core::{
    detect_mime, ExtractError, ImageSelection, Locale, Messages, PreviewRegistry, SelectError,
    TextExtractor, UiState, UserError,
};
use textlens_logging::{AnalysisEvent, EventLogger};

/// Completion of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub generation: u64,
    pub result: Result<String, ExtractError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Applied,
    Stale,
}

pub struct Controller {
    extractor: Arc<dyn TextExtractor>,
    messages: &'static Messages,
    previews: PreviewRegistry,
    selection: Option<ImageSelection>,
    state: UiState,
    generation: u64,
    outcome_tx: mpsc::UnboundedSender<AnalysisOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<AnalysisOutcome>,
}

impl Controller {
    pub fn new(extractor: Arc<dyn TextExtractor>, locale: Locale) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            extractor,
            messages: locale.messages(),
            previews: PreviewRegistry::new(),
            selection: None,
            state: UiState::Idle,
            generation: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn selection(&self) -> Option<&ImageSelection> {
        self.selection.as_ref()
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Whether the analyze action is enabled.
    pub fn can_analyze(&self) -> bool {
        self.selection.is_some() && !self.state.is_loading()
    }

    /// Read an image file and make it the current selection.
    ///
    /// The preview is decoded on the blocking pool so a large image does not
    /// stall the event loop.
    pub async fn select_image(&mut self, path: &Path) -> Result<&ImageSelection, SelectError> {
        let payload = Bytes::from(tokio::fs::read(path).await?);
        let source = path.display().to_string();
        let mime = detect_mime(path, &payload).ok_or_else(|| SelectError::Unsupported(source.clone()))?;

        let registry = self.previews.clone();
        let decode_input = payload.clone();
        let preview = tokio::task::spawn_blocking(move || registry.acquire(&decode_input))
            .await
            .map_err(|err| SelectError::Io(std::io::Error::other(err)))?;

        Ok(self.install(ImageSelection::new(source, mime, payload, preview)))
    }

    /// Make an in-memory image the current selection.
    ///
    /// Valid in any state. On success the previous selection (and its
    /// preview) is released and the state returns to `Idle`. On error
    /// nothing changes.
    pub fn select_bytes(
        &mut self,
        source: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Result<&ImageSelection, SelectError> {
        let source = source.into();
        let payload = payload.into();

        let mime = detect_mime(Path::new(&source), &payload)
            .ok_or_else(|| SelectError::Unsupported(source.clone()))?;

        let preview = self.previews.acquire(&payload);
        Ok(self.install(ImageSelection::new(source, mime, payload, preview)))
    }

    fn install(&mut self, selection: ImageSelection) -> &ImageSelection {
        if selection.is_oversized() {
            warn!(source = %selection.source(), bytes = selection.byte_len(), "Selected image exceeds the advisory size limit");
        }
        info!(source = %selection.source(), mime = %selection.mime(), bytes = selection.byte_len(), "Image selected");

        if self.state.is_loading() {
            debug!(generation = self.generation, "Selection replaced while an analysis is in flight");
        }
        self.generation += 1;
        self.state = UiState::Idle;
        &*self.selection.insert(selection)
    }

    /// Start extracting text from the current selection.
    ///
    /// Enters `Loading` before returning. The call itself runs on a spawned
    /// task; its outcome arrives through [`Controller::recv_outcome`].
    pub fn start_analysis(&mut self) -> Result<u64, UserError> {
        if self.state.is_loading() {
            return Err(UserError::AnalysisInFlight);
        }
        let Some(selection) = self.selection.as_ref() else {
            self.state = UiState::Failure(self.messages.no_selection.to_string());
            return Err(UserError::NoSelection);
        };

        self.generation += 1;
        let generation = self.generation;
        let extractor = Arc::clone(&self.extractor);
        let payload = selection.payload().clone();
        let mime = selection.mime();
        let tx = self.outcome_tx.clone();

        EventLogger::log_event(
            generation,
            AnalysisEvent::Started {
                source: selection.source().to_string(),
                mime: mime.to_string(),
                bytes: payload.len(),
            },
        );
        self.state = UiState::Loading;

        tokio::spawn(async move {
            let result = match AssertUnwindSafe(extractor.extract(&payload, mime))
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    error!(generation, extractor = extractor.name(), "Extractor panicked");
                    Err(ExtractError)
                }
            };
            if tx.send(AnalysisOutcome { generation, result }).is_err() {
                debug!(generation, "Controller gone; dropping analysis outcome");
            }
        });

        Ok(generation)
    }

    /// Wait for the next extraction outcome without applying it.
    pub async fn recv_outcome(&mut self) -> Option<AnalysisOutcome> {
        self.outcome_rx.recv().await
    }

    /// Apply a finished extraction, unless a newer selection or analysis
    /// has superseded it.
    pub fn apply_outcome(&mut self, outcome: AnalysisOutcome) -> OutcomeStatus {
        if outcome.generation != self.generation || !self.state.is_loading() {
            EventLogger::log_event(
                outcome.generation,
                AnalysisEvent::Discarded {
                    current_generation: self.generation,
                },
            );
            return OutcomeStatus::Stale;
        }

        self.state = match outcome.result {
            Ok(text) => {
                EventLogger::log_event(
                    outcome.generation,
                    AnalysisEvent::Completed {
                        chars: text.chars().count(),
                    },
                );
                UiState::Success(text)
            }
            Err(err) => {
                EventLogger::log_event(
                    outcome.generation,
                    AnalysisEvent::Failed {
                        reason: err.to_string(),
                    },
                );
                UiState::Failure(self.messages.extraction_failed.to_string())
            }
        };
        OutcomeStatus::Applied
    }

    /// Wait for the next outcome and apply it.
    pub async fn next_outcome(&mut self) -> Option<OutcomeStatus> {
        let outcome = self.recv_outcome().await?;
        Some(self.apply_outcome(outcome))
    }
}
