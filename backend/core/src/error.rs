use thiserror::Error;

/// A user action that cannot proceed in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("no image selected")]
    NoSelection,

    #[error("an analysis is already running")]
    AnalysisInFlight,
}

/// Picking a file failed; the previous selection is kept.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("unsupported image type: {0}")]
    Unsupported(String),

    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Opaque failure of an extraction call.
///
/// The underlying cause is logged by the extractor and never carried here,
/// so nothing about the transport or the credential can reach the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("failed to extract text from image")]
pub struct ExtractError;
