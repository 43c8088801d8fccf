use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion response
///
/// Local servers are inconsistent about the bookkeeping fields, so
/// everything except `choices` is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, derive_getters::Getters)]
pub struct ChatCompletionResponse {
    /// Unique identifier for the completion
    #[serde(default)]
    id: String,
    /// Object type (always "chat.completion")
    #[serde(default)]
    object: String,
    /// Unix timestamp of when the completion was created
    #[serde(default)]
    created: i64,
    /// Model used for completion
    #[serde(default)]
    model: String,
    /// Generated completions
    choices: Vec<Choice>,
    /// Token usage statistics
    #[serde(default)]
    usage: Option<Usage>,
}

/// A completion choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_getters::Getters)]
pub struct Choice {
    /// Index of this choice
    #[serde(default)]
    index: u32,
    /// The generated message
    message: ChoiceMessage,
    /// Reason why generation finished
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Message in a choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_getters::Getters)]
pub struct ChoiceMessage {
    /// Role of the message (typically "assistant")
    #[serde(default)]
    role: String,
    /// Generated content; absent when the model only calls tools
    #[serde(default)]
    content: Option<String>,
    /// Tool invocations requested by the model
    #[serde(default)]
    tool_calls: Option<Vec<ResponseToolCall>>,
}

/// A tool invocation inside a choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseToolCall {
    /// Call identifier
    pub id: String,
    /// Always "function"
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Which function and with what arguments
    pub function: FunctionCall,
}

/// Function name and JSON-encoded arguments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionCall {
    /// Function name
    pub name: String,
    /// Arguments as a JSON string
    #[serde(default)]
    pub arguments: String,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

/// Response of `GET /models`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelList {
    /// Models the server can serve
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

/// One entry of the model list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelEntry {
    /// Model identifier
    pub id: String,
}
