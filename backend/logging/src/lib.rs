//! Structured logging for textlens.
//!
//! Handles subscriber setup (rolling NDJSON file, optional stderr), credential
//! redaction, and the analysis lifecycle events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{AnalysisEvent, EventLogger};
pub use logger::{init_logger, LOG_FILE_PREFIX};
pub use redact::redact_sensitive_data;
