//! Case premise types.

use crate::MenuNames;
use serde::{Deserialize, Serialize};

/// The murder-mystery premise produced by the case stage.
///
/// Every field is free text; the model fills them in and the case stage
/// substitutes a fixed premise when it does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseData {
    /// Name of the victim
    pub victim_name: String,
    /// Age, job, notable traits
    pub victim_description: String,
    /// The controversy the case revolves around
    pub controversial_theme: String,
    /// Short description of the main setting
    pub location: String,
    /// Three to five sentence summary
    pub summary: String,
    /// Rough timeline of the crime
    pub timeline: String,
    /// Model reply kept when the premise was replaced by the fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_model_output: Option<String>,
}

/// Read-only input to the casting pipeline.
///
/// Built once per generation request from the form input, the chosen menu
/// and the case premise.
///
/// # Examples
///
/// ```
/// use whodunit_core::{CaseContext, CaseData, MenuNames};
///
/// let context = CaseContext::new("Hamburg", "harbour corruption", MenuNames::default(), CaseData::default());
/// assert_eq!(context.theme_for_retrieval(), "harbour corruption");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseContext {
    /// Where the dinner takes place
    pub location: String,
    /// The thematic prompt typed by the host
    pub theme: String,
    /// Names of the dishes served
    pub menu: MenuNames,
    /// Premise from the case stage
    pub case: CaseData,
}

impl CaseContext {
    /// Assemble a context.
    pub fn new(
        location: impl Into<String>,
        theme: impl Into<String>,
        menu: MenuNames,
        case: CaseData,
    ) -> Self {
        Self {
            location: location.into(),
            theme: theme.into(),
            menu,
            case,
        }
    }

    /// The generated controversy when there is one, the host's theme otherwise.
    pub fn theme_for_retrieval(&self) -> &str {
        if self.case.controversial_theme.trim().is_empty() {
            &self.theme
        } else {
            &self.case.controversial_theme
        }
    }
}

/// A background document handed back by the retrieval collaborator.
///
/// The `id` values of one request form the whitelist for character
/// `source_references`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Document identifier
    pub id: String,
    /// Document body
    pub text: String,
}

impl RetrievedDocument {
    /// Create a new document.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}
