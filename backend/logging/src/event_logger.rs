//! Analysis Event Logger
//!
//! Lifecycle events of an extraction (started, completed, failed, discarded)
//! written as structured JSON through `tracing`. Extracted text itself is
//! never logged, only its length.

use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    Started {
        source: String,
        mime: String,
        bytes: usize,
    },
    Completed {
        chars: usize,
    },
    Failed {
        reason: String,
    },
    Discarded {
        current_generation: u64,
    },
}

#[derive(Debug, Serialize)]
struct EventLogEntry<'a> {
    generation: u64,
    event: &'a AnalysisEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Render an event as the JSON line that gets logged.
    pub fn render(generation: u64, event: &AnalysisEvent) -> serde_json::Result<String> {
        let event = match event {
            AnalysisEvent::Failed { reason } => AnalysisEvent::Failed {
                reason: redact_sensitive_data(reason),
            },
            other => other.clone(),
        };
        serde_json::to_string(&EventLogEntry {
            generation,
            event: &event,
        })
    }

    /// Log an analysis event for the given generation.
    pub fn log_event(generation: u64, event: AnalysisEvent) {
        match Self::render(generation, &event) {
            Ok(json) => info!(target: "textlens::analysis", generation, event = %json, "Analysis event"),
            Err(e) => warn!(generation, error = %e, "Failed to serialize analysis event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tagged_json() {
        let json = EventLogger::render(3, &AnalysisEvent::Completed { chars: 4 }).unwrap();
        assert_eq!(json, r#"{"generation":3,"event":{"type":"completed","chars":4}}"#);
    }

    #[test]
    fn failure_reason_is_redacted() {
        let json = EventLogger::render(
            1,
            &AnalysisEvent::Failed {
                reason: "url ?key=topsecret rejected".into(),
            },
        )
        .unwrap();
        assert!(!json.contains("topsecret"));
        assert!(json.contains(r#""type":"failed""#));
    }
}
