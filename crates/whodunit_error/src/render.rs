//! Rendering and packaging error types.

/// Specific error conditions while producing documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RenderErrorKind {
    /// Zip archive could not be written
    #[display("Failed to build archive: {}", _0)]
    Archive(String),
    /// A document could not be laid out as PDF
    #[display("Failed to render PDF '{}': {}", name, message)]
    Pdf {
        /// Document name
        name: String,
        /// Renderer message
        message: String,
    },
    /// A document could not be serialized
    #[display("Failed to serialize document '{}': {}", name, message)]
    Serialization {
        /// Document name
        name: String,
        /// Serializer message
        message: String,
    },
}

/// Render error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The specific error condition
    pub kind: RenderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RenderError {
    /// Create a new RenderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
