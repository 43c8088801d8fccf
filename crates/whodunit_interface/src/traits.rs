//! Trait definitions for completion backends and retrieval.

use crate::{HealthStatus, ToolDefinition};
use async_trait::async_trait;
use whodunit_core::{GenerateRequest, GenerateResponse, RetrievedDocument};
use whodunit_error::WhodunitResult;

/// Core trait every completion backend implements.
#[async_trait]
pub trait CompletionDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> WhodunitResult<GenerateResponse>;

    /// Provider name (e.g. "lm-studio", "scripted").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

/// Backends that support function/tool calling.
#[async_trait]
pub trait ToolUse: CompletionDriver {
    /// Generate with available tools.
    ///
    /// The response may contain `Output::ToolCalls` instead of text.
    async fn generate_with_tools(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> WhodunitResult<GenerateResponse>;

    /// Maximum number of tools that can be provided.
    fn max_tools(&self) -> usize {
        128
    }
}

/// Backends that support health checks.
#[async_trait]
pub trait Health: CompletionDriver {
    /// Check whether the backend is reachable.
    async fn health(&self) -> WhodunitResult<HealthStatus>;
}

/// Source of background documents for prompts.
///
/// Implementations return at most `k` documents, most relevant first.
pub trait Retriever: Send + Sync {
    /// Retrieve up to `k` documents for `query`.
    fn retrieve(&self, query: &str, k: usize) -> Vec<RetrievedDocument>;
}

impl<R: Retriever + ?Sized> Retriever for std::sync::Arc<R> {
    fn retrieve(&self, query: &str, k: usize) -> Vec<RetrievedDocument> {
        (**self).retrieve(query, k)
    }
}
