use crate::{ChatCompletionRequest, ChatCompletionResponse, ModelList, ServerConfig, convert};
use async_trait::async_trait;
use tracing::instrument;
use whodunit_core::{GenerateRequest, GenerateResponse};
use whodunit_error::{ServerError, ServerErrorKind, WhodunitResult};
use whodunit_interface::{CompletionDriver, Health, HealthStatus, ToolDefinition, ToolUse};

/// Client for an OpenAI-compatible completion endpoint
#[derive(Debug, Clone)]
pub struct ServerClient {
    config: ServerConfig,
    client: reqwest::Client,
}

impl ServerClient {
    /// Create a new client; the configured timeout applies to every request
    #[instrument(skip(config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        tracing::debug!("Creating server client");
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ServerError::new(ServerErrorKind::Configuration(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self { config, client })
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(api_key) => req.header("Authorization", format!("Bearer {}", api_key)),
            None => req,
        }
    }

    /// List the models the server offers
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<ModelList, ServerError> {
        let url = self.config.endpoint("models");
        tracing::debug!("Listing models at {}", url);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Model listing failed: {}", e);
                ServerError::new(ServerErrorKind::Http(format!("Model listing failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Server returned error: {}", status);
            return Err(ServerError::new(ServerErrorKind::Api(format!(
                "Server returned: {}",
                status
            ))));
        }

        response.json().await.map_err(|e| {
            ServerError::new(ServerErrorKind::Deserialization(format!(
                "Failed to parse model list: {}",
                e
            )))
        })
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ServerError> {
        let url = self.config.endpoint("chat/completions");
        tracing::debug!("Sending chat completion request to {}", url);

        let req = self
            .client
            .post(&url)
            .json(&request)
            .header("Content-Type", "application/json");

        let response = self.authorize(req).send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            ServerError::new(ServerErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Server returned error: {}", status);
            return Err(ServerError::new(ServerErrorKind::Api(format!(
                "Server returned: {}",
                status
            ))));
        }

        let result = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            ServerError::new(ServerErrorKind::Deserialization(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        tracing::debug!("Chat completion successful");
        Ok(result)
    }
}

#[async_trait]
impl CompletionDriver for ServerClient {
    #[instrument(skip(self, req))]
    async fn generate(&self, req: &GenerateRequest) -> WhodunitResult<GenerateResponse> {
        let chat_request = convert::to_chat_request(req, &self.config.model)?;
        let response = self.chat_completion(chat_request).await?;
        Ok(convert::from_chat_response(response)?)
    }

    fn provider_name(&self) -> &'static str {
        "lm-studio"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ToolUse for ServerClient {
    #[instrument(skip(self, req, tools), fields(tools = tools.len()))]
    async fn generate_with_tools(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> WhodunitResult<GenerateResponse> {
        let chat_request = convert::to_chat_request(req, &self.config.model)?
            .with_tools(convert::to_chat_tools(tools));
        let response = self.chat_completion(chat_request).await?;
        Ok(convert::from_chat_response(response)?)
    }
}

#[async_trait]
impl Health for ServerClient {
    #[instrument(skip(self))]
    async fn health(&self) -> WhodunitResult<HealthStatus> {
        match self.list_models().await {
            Ok(list) if list.data.iter().any(|m| m.id == self.config.model) => {
                Ok(HealthStatus::Healthy)
            }
            Ok(list) => Ok(HealthStatus::Degraded {
                message: format!(
                    "model {} not among {} served models",
                    self.config.model,
                    list.data.len()
                ),
            }),
            Err(e) => Ok(HealthStatus::Unhealthy {
                message: e.to_string(),
            }),
        }
    }
}
