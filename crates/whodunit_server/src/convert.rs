//! Conversion between whodunit and server API types

use crate::{
    ChatCompletionRequest, ChatCompletionResponse, ChatTool, FunctionSpec,
    request::{ChatCompletionRequestBuilder, MessageBuilder},
};
use whodunit_core::{GenerateRequest, GenerateResponse, Message, Output, ToolCall};
use whodunit_error::{ServerError, ServerErrorKind};
use whodunit_interface::ToolDefinition;

/// Convert a GenerateRequest to a ChatCompletionRequest
///
/// The request's own model override wins over `model`.
#[tracing::instrument(skip(request))]
pub fn to_chat_request(
    request: &GenerateRequest,
    model: &str,
) -> Result<ChatCompletionRequest, ServerError> {
    let messages = request
        .messages()
        .iter()
        .map(message_to_server_message)
        .collect::<Result<Vec<_>, _>>()?;

    let model = request.model().clone().unwrap_or_else(|| model.to_string());

    ChatCompletionRequestBuilder::default()
        .model(model)
        .messages(messages)
        .max_tokens(*request.max_tokens())
        .temperature(*request.temperature())
        .stream(Some(false))
        .build()
        .map_err(|e| {
            ServerError::new(ServerErrorKind::Api(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Convert tool definitions to the OpenAI `tools` array
pub fn to_chat_tools(tools: &[ToolDefinition]) -> Vec<ChatTool> {
    tools
        .iter()
        .map(|tool| ChatTool {
            kind: "function".to_string(),
            function: FunctionSpec {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        })
        .collect()
}

fn message_to_server_message(msg: &Message) -> Result<crate::Message, ServerError> {
    MessageBuilder::default()
        .role(msg.role.as_ref())
        .content(msg.content.clone())
        .build()
        .map_err(|e| {
            ServerError::new(ServerErrorKind::Api(format!(
                "Failed to build message: {}",
                e
            )))
        })
}

/// Convert a ChatCompletionResponse to a GenerateResponse
///
/// Tool calls become `Output::ToolCalls`; text content becomes `Output::Text`.
/// A choice with neither is an empty response.
#[tracing::instrument(skip(response))]
pub fn from_chat_response(
    response: ChatCompletionResponse,
) -> Result<GenerateResponse, ServerError> {
    let choice = response.choices().first().ok_or_else(|| {
        ServerError::new(ServerErrorKind::EmptyResponse(
            "No choices in response".into(),
        ))
    })?;

    let mut outputs = Vec::new();

    if let Some(calls) = choice.message().tool_calls().as_ref().filter(|c| !c.is_empty()) {
        let calls = calls
            .iter()
            .map(|call| ToolCall {
                id: call.id.clone(),
                name: call.function.name.clone(),
                arguments: serde_json::from_str(&call.function.arguments)
                    .unwrap_or_else(|_| serde_json::Value::String(call.function.arguments.clone())),
            })
            .collect();
        outputs.push(Output::ToolCalls(calls));
    }

    if let Some(text) = choice.message().content().as_ref().filter(|t| !t.is_empty()) {
        outputs.push(Output::Text(text.clone()));
    }

    if outputs.is_empty() {
        return Err(ServerError::new(ServerErrorKind::EmptyResponse(
            "Choice carried neither content nor tool calls".into(),
        )));
    }

    Ok(GenerateResponse::new(outputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> ChatCompletionResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_uses_override_model_and_temperature() {
        let request = GenerateRequest::builder()
            .messages(vec![Message::system("sys"), Message::user("hi")])
            .temperature(0.6)
            .model("override")
            .build()
            .unwrap();

        let chat = to_chat_request(&request, "configured").unwrap();
        assert_eq!(chat.model(), "override");
        assert_eq!(*chat.temperature(), Some(0.6));
        assert_eq!(chat.messages()[0].role(), "system");
        assert_eq!(chat.messages()[1].content(), "hi");
    }

    #[test]
    fn text_choice_becomes_text_output() {
        let converted = from_chat_response(response(json!({
            "choices": [{"message": {"role": "assistant", "content": "[]"}}]
        })))
        .unwrap();
        assert_eq!(converted.text(), Some("[]".to_string()));
    }

    #[test]
    fn tool_calls_become_tool_output() {
        let converted = from_chat_response(response(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "generate_image", "arguments": "{\"prompt\":\"a baker\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .unwrap();

        match &converted.outputs()[0] {
            Output::ToolCalls(calls) => {
                assert_eq!(calls[0].name, "generate_image");
                assert_eq!(calls[0].arguments, json!({"prompt": "a baker"}));
            }
            other => panic!("unexpected output {other:?}"),
        }
        assert_eq!(converted.text(), None);
    }

    #[test]
    fn empty_choices_are_an_error() {
        let err = from_chat_response(response(json!({"choices": []}))).unwrap_err();
        assert!(matches!(err.kind, ServerErrorKind::EmptyResponse(_)));
    }
}
