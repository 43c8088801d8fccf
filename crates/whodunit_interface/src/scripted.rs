//! Scripted completion driver.

use crate::CompletionDriver;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use whodunit_core::{GenerateRequest, GenerateResponse, Output};
use whodunit_error::{BackendError, WhodunitResult};

/// A single queued reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Return this text as the model output
    Text(String),
    /// Fail the call with this message
    Failure(String),
}

impl ScriptedReply {
    /// A text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A failed call.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }
}

/// Completion driver that plays back queued replies in order.
///
/// Once the queue is exhausted every call receives the fallback reply,
/// which defaults to a failure. Requests are recorded so tests can inspect
/// the prompts that were sent.
///
/// # Examples
///
/// ```
/// use whodunit_core::GenerateRequest;
/// use whodunit_interface::{CompletionDriver, ScriptedDriver, ScriptedReply};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let driver = ScriptedDriver::new(vec![ScriptedReply::text("[]")]);
/// let response = driver.generate(&GenerateRequest::default()).await.unwrap();
/// assert_eq!(response.text(), Some("[]".to_string()));
/// assert!(driver.generate(&GenerateRequest::default()).await.is_err());
/// assert_eq!(driver.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedDriver {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    fallback: ScriptedReply,
    model_name: String,
}

impl ScriptedDriver {
    /// Driver that plays back `replies`, then fails.
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fallback: ScriptedReply::failure("script exhausted"),
            model_name: "scripted".to_string(),
        }
    }

    /// Driver that always answers with the same text.
    pub fn repeating(text: impl Into<String>) -> Self {
        Self::new(Vec::new()).with_fallback(ScriptedReply::text(text))
    }

    /// Driver whose every call fails, simulating an unreachable endpoint.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(Vec::new()).with_fallback(ScriptedReply::failure(message))
    }

    /// Replace the reply used once the queue is empty.
    pub fn with_fallback(mut self, fallback: ScriptedReply) -> Self {
        self.fallback = fallback;
        self
    }

    /// Append a reply to the queue.
    pub fn push(&self, reply: ScriptedReply) {
        lock(&self.replies).push_back(reply);
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Copies of every request received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        lock(&self.requests).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl CompletionDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> WhodunitResult<GenerateResponse> {
        lock(&self.requests).push(req.clone());
        let reply = lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            ScriptedReply::Text(text) => Ok(GenerateResponse::new(vec![Output::Text(text)])),
            ScriptedReply::Failure(message) => Err(BackendError::new(message).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
