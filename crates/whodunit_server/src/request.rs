use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion request
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    PartialEq,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<Message>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    temperature: Option<f32>,
    /// Tools the model may call
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    tools: Option<Vec<ChatTool>>,
    /// Enable streaming mode
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    stream: Option<bool>,
}

impl ChatCompletionRequest {
    /// Attach tool definitions to the request
    pub fn with_tools(mut self, tools: Vec<ChatTool>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }
}

/// A message in the conversation
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    role: String,
    /// Message content
    content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Tool entry of the `tools` array
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTool {
    /// Always "function"
    #[serde(rename = "type")]
    pub kind: String,
    /// Function description
    pub function: FunctionSpec,
}

/// Function description inside a tool entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Function name
    pub name: String,
    /// What the function does
    pub description: String,
    /// JSON Schema of the arguments
    pub parameters: serde_json::Value,
}
