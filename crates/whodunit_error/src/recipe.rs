//! Recipe data error types.

/// Specific error conditions while loading recipe tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RecipeErrorKind {
    /// Recipe file could not be read
    #[display("Failed to read recipe file: {}", _0)]
    FileRead(String),
    /// CSV header could not be parsed
    #[display("Malformed recipe header in {}: {}", path, message)]
    Header {
        /// File being parsed
        path: String,
        /// Parser message
        message: String,
    },
    /// A required column is absent
    #[display("Recipe file {} has no '{}' column", path, column)]
    MissingColumn {
        /// File being parsed
        path: String,
        /// Column name
        column: String,
    },
}

/// Recipe error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Recipe Error: {} at line {} in {}", kind, line, file)]
pub struct RecipeError {
    /// The specific error condition
    pub kind: RecipeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RecipeError {
    /// Create a new RecipeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RecipeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
