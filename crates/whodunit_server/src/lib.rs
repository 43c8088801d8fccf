//! OpenAI-compatible chat completion client for whodunit.
//!
//! Talks to a local inference server (LM Studio, llama.cpp, vLLM) through the
//! standard `/chat/completions` and `/models` endpoints and exposes it as a
//! [`CompletionDriver`](whodunit_interface::CompletionDriver).
//!
//! # Example
//!
//! ```rust,no_run
//! use whodunit_core::GenerateRequest;
//! use whodunit_interface::CompletionDriver;
//! use whodunit_server::{ServerClient, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServerClient::new(ServerConfig::from_env())?;
//!     let request = GenerateRequest::instruction_pair("You are terse.", "Say hi.");
//!     let response = client.generate(&request).await?;
//!     println!("{:?}", response.text());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod request;
mod response;

pub use client::ServerClient;
pub use config::{DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_MODEL, ServerConfig};
pub use convert::{from_chat_response, to_chat_request, to_chat_tools};
pub use request::{
    ChatCompletionRequest, ChatCompletionRequestBuilder, ChatTool, FunctionSpec, Message,
    MessageBuilder,
};
pub use response::{
    ChatCompletionResponse, Choice, ChoiceMessage, FunctionCall, ModelEntry, ModelList,
    ResponseToolCall, Usage,
};
pub use whodunit_error::{ServerError, ServerErrorKind};
