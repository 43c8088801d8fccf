use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use whodunit_core::{GenerateRequest, Output};
use whodunit_interface::{CompletionDriver, Health, HealthStatus, ToolDefinition, ToolUse};
use whodunit_server::{ServerClient, ServerConfig};

async fn chat(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer lm-studio");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no key"})));
    }

    if body.get("tools").is_some() {
        return (
            StatusCode::OK,
            Json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "tool_calls": [{
                            "id": "call_7",
                            "type": "function",
                            "function": {"name": "generate_image", "arguments": "{\"prompt\":\"harbour\"}"}
                        }]
                    }
                }]
            })),
        );
    }

    let echoed = body["messages"][1]["content"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 0,
            "model": body["model"],
            "choices": [{"index": 0, "message": {"role": "assistant", "content": format!("echo: {echoed}")}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
        })),
    )
}

async fn models() -> Json<Value> {
    Json(json!({"data": [{"id": "mystery-model"}]}))
}

async fn spawn_mock() -> String {
    let app = Router::new()
        .route("/v1/chat/completions", post(chat))
        .route("/v1/models", get(models));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn client(base_url: &str, model: &str) -> ServerClient {
    ServerClient::new(ServerConfig::new(base_url, model).with_api_key("lm-studio")).unwrap()
}

#[tokio::test]
async fn generate_round_trips_through_endpoint() {
    let base_url = spawn_mock().await;
    let client = client(&base_url, "mystery-model");

    let request = GenerateRequest::instruction_pair("system text", "who did it?");
    let response = client.generate(&request).await.unwrap();

    assert_eq!(response.text(), Some("echo: who did it?".to_string()));
    assert_eq!(client.model_name(), "mystery-model");
}

#[tokio::test]
async fn missing_key_is_an_api_error() {
    let base_url = spawn_mock().await;
    let client = ServerClient::new(ServerConfig::new(&base_url, "mystery-model")).unwrap();

    let err = client
        .generate(&GenerateRequest::instruction_pair("a", "b"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn tool_calls_surface_as_outputs() {
    let base_url = spawn_mock().await;
    let client = client(&base_url, "mystery-model");
    let tools = vec![ToolDefinition {
        name: "generate_image".to_string(),
        description: "Draw a portrait".to_string(),
        parameters: json!({"type": "object", "properties": {"prompt": {"type": "string"}}}),
    }];

    let response = client
        .generate_with_tools(&GenerateRequest::instruction_pair("a", "b"), &tools)
        .await
        .unwrap();

    assert!(matches!(&response.outputs()[0], Output::ToolCalls(calls) if calls[0].id == "call_7"));
}

#[tokio::test]
async fn health_reflects_model_availability() {
    let base_url = spawn_mock().await;

    let served = client(&base_url, "mystery-model");
    assert_eq!(served.health().await.unwrap(), HealthStatus::Healthy);

    let unknown = client(&base_url, "other-model");
    assert!(matches!(
        unknown.health().await.unwrap(),
        HealthStatus::Degraded { .. }
    ));
}

#[tokio::test]
async fn unreachable_endpoint_is_unhealthy() {
    let client = client("http://127.0.0.1:9/v1", "mystery-model");
    assert!(matches!(
        client.health().await.unwrap(),
        HealthStatus::Unhealthy { .. }
    ));
    assert!(
        client
            .generate(&GenerateRequest::instruction_pair("a", "b"))
            .await
            .is_err()
    );
}
