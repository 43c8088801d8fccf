//! Top-level error wrapper types.

use crate::{
    BackendError, ConfigError, HttpError, JsonError, NarrativeError, RecipeError, RenderError,
    ServerError, StorageError,
};

/// Every error condition a whodunit crate can surface.
///
/// # Examples
///
/// ```
/// use whodunit_error::{WhodunitError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: WhodunitError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WhodunitErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Completion endpoint error
    #[from(ServerError)]
    Server(ServerError),
    /// Filesystem error
    #[from(StorageError)]
    Storage(StorageError),
    /// Recipe data error
    #[from(RecipeError)]
    Recipe(RecipeError),
    /// Document rendering or packaging error
    #[from(RenderError)]
    Render(RenderError),
    /// Generation pipeline error
    #[from(NarrativeError)]
    Narrative(NarrativeError),
}

/// Whodunit error with kind discrimination.
///
/// # Examples
///
/// ```
/// use whodunit_error::{WhodunitResult, ConfigError};
///
/// fn might_fail() -> WhodunitResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Whodunit Error: {}", _0)]
pub struct WhodunitError(Box<WhodunitErrorKind>);

impl WhodunitError {
    /// Create a new error from a kind.
    pub fn new(kind: WhodunitErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WhodunitErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to WhodunitErrorKind
impl<T> From<T> for WhodunitError
where
    T: Into<WhodunitErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for whodunit operations.
pub type WhodunitResult<T> = std::result::Result<T, WhodunitError>;
