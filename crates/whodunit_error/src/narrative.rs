//! Generation pipeline error types.

/// Specific error conditions for the generation pipeline.
///
/// Model misbehaviour never lands here; only caller mistakes do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NarrativeErrorKind {
    /// Requested cast size is unusable
    #[display("Cast size must be at least 1, got {}", _0)]
    InvalidCastSize(usize),
    /// Generation result could not be serialized
    #[display("Serialization error: {}", _0)]
    Serialization(String),
}

/// Error type for generation pipeline operations.
///
/// # Examples
///
/// ```
/// use whodunit_error::{NarrativeError, NarrativeErrorKind};
///
/// let err = NarrativeError::new(NarrativeErrorKind::InvalidCastSize(0));
/// assert!(format!("{}", err).contains("at least 1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Narrative Error: {} at line {} in {}", kind, line, file)]
pub struct NarrativeError {
    /// The specific error condition
    pub kind: NarrativeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl NarrativeError {
    /// Create a new NarrativeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NarrativeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
