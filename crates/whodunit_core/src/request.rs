//! Request and response types for model generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Provider-neutral generation request.
///
/// # Examples
///
/// ```
/// use whodunit_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::system("You write mysteries."), Message::user("Go.")])
///     .temperature(0.6)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 2);
/// assert_eq!(*request.temperature(), Some(0.6));
/// assert_eq!(*request.max_tokens(), None);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    #[builder(setter(into))]
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(setter(strip_option))]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(setter(strip_option))]
    temperature: Option<f32>,
    /// Model identifier override
    #[builder(setter(into, strip_option))]
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// A system + user instruction pair, the shape every generation stage sends.
    pub fn instruction_pair(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system), Message::user(user)],
            ..Default::default()
        }
    }

    /// Returns this request with a sampling temperature set.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use whodunit_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse::new(vec![Output::Text("[]".to_string())]);
/// assert_eq!(response.text(), Some("[]".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Wraps a list of outputs.
    pub fn new(outputs: Vec<Output>) -> Self {
        Self { outputs }
    }

    /// Concatenated text outputs, or `None` when the model produced no text.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                Output::Json(_) | Output::ToolCalls(_) => None,
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }
}
