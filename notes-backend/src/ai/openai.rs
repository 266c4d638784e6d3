//! Client for OpenAI-compatible `/chat/completions` endpoints with
//! function calling. Gemini exposes the same surface, which is the default.

use crate::ai::types::{AiError, AiResponse, ChatMessage, ToolCall};
use crate::ai::ChatModel;
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    auth_headers: header::HeaderMap,
    endpoint: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct WireMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
struct WireTool {
    #[serde(rename = "type")]
    tool_type: String,
    function: WireToolFunction,
}

#[derive(Debug, Serialize, Clone)]
struct WireToolFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct WireToolCall {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: WireFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded arguments object
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiCompatClient {
    pub fn new(endpoint: &str, model: &str, api_key: Option<&str>, temperature: f32) -> Self {
        let mut auth_headers = header::HeaderMap::new();
        auth_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(key) = api_key {
            match header::HeaderValue::from_str(&format!("Bearer {}", key)) {
                Ok(v) => {
                    auth_headers.insert(header::AUTHORIZATION, v);
                }
                Err(_) => log::warn!("[AI] API key contains invalid header characters, ignoring"),
            }
        }

        Self {
            client: crate::http::shared_client().clone(),
            auth_headers,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            temperature,
        }
    }
}

fn to_wire(message: &ChatMessage) -> WireMessage {
    match message {
        ChatMessage::System(text) => WireMessage {
            role: "system".to_string(),
            content: Some(text.clone()),
            tool_calls: None,
            tool_call_id: None,
        },
        ChatMessage::User(text) => WireMessage {
            role: "user".to_string(),
            content: Some(text.clone()),
            tool_calls: None,
            tool_call_id: None,
        },
        ChatMessage::Assistant {
            content,
            tool_calls,
        } => WireMessage {
            role: "assistant".to_string(),
            content: if content.is_empty() {
                None
            } else {
                Some(content.clone())
            },
            tool_calls: if tool_calls.is_empty() {
                None
            } else {
                Some(
                    tool_calls
                        .iter()
                        .map(|c| WireToolCall {
                            id: Some(c.id.clone()),
                            call_type: function_type(),
                            function: WireFunctionCall {
                                name: c.name.clone(),
                                arguments: c.arguments.to_string(),
                            },
                        })
                        .collect(),
                )
            },
            tool_call_id: None,
        },
        ChatMessage::Tool(response) => WireMessage {
            role: "tool".to_string(),
            content: Some(response.content.clone()),
            tool_calls: None,
            tool_call_id: Some(response.tool_call_id.clone()),
        },
    }
}

fn from_wire(message: WireMessage) -> AiResponse {
    let tool_calls = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, call)| {
            // Leave unparseable arguments as a raw string; the tool reports
            // "Invalid parameters" back to the model.
            let arguments = if call.function.arguments.trim().is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(&call.function.arguments)
                    .unwrap_or(Value::String(call.function.arguments.clone()))
            };
            ToolCall {
                id: call.id.unwrap_or_else(|| format!("call_{}", i)),
                name: call.function.name,
                arguments,
            }
        })
        .collect();

    AiResponse::with_tools(message.content.unwrap_or_default(), tool_calls)
}

#[async_trait]
impl ChatModel for OpenAiCompatClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError> {
        let wire_tools: Vec<WireTool> = tools
            .iter()
            .map(|t| WireTool {
                tool_type: "function".to_string(),
                function: WireToolFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: serde_json::to_value(&t.input_schema).unwrap_or_default(),
                },
            })
            .collect();

        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.iter().map(to_wire).collect(),
            temperature: self.temperature,
            tools: if wire_tools.is_empty() {
                None
            } else {
                Some(wire_tools)
            },
        };

        log::debug!(
            "[AI] Sending {} messages with {} tools to {}",
            request.messages.len(),
            tools.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.auth_headers.clone())
            .timeout(Duration::from_secs(120))
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::new(format!("AI API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&error_text)
                .map(|env| env.error.message)
                .unwrap_or(error_text);
            return Err(AiError::with_status(
                format!("AI API error: {}", message),
                status.as_u16(),
            ));
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::new(format!("Failed to parse AI response: {}", e)))?;

        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::new("AI API returned no choices"))?;

        Ok(from_wire(choice.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::ToolResponse;
    use serde_json::json;

    #[test]
    fn test_assistant_tool_call_serialization() {
        let msg = ChatMessage::Assistant {
            content: String::new(),
            tool_calls: vec![ToolCall {
                id: "call_1".to_string(),
                name: "read_note".to_string(),
                arguments: json!({ "filename": "a.txt" }),
            }],
        };
        let wire = serde_json::to_value(to_wire(&msg)).unwrap();
        assert_eq!(wire["role"], "assistant");
        assert!(wire["content"].is_null());
        assert_eq!(wire["tool_calls"][0]["type"], "function");
        assert_eq!(wire["tool_calls"][0]["function"]["name"], "read_note");
        let args: Value =
            serde_json::from_str(wire["tool_calls"][0]["function"]["arguments"].as_str().unwrap())
                .unwrap();
        assert_eq!(args["filename"], "a.txt");
    }

    #[test]
    fn test_tool_message_serialization() {
        let msg = ChatMessage::Tool(ToolResponse {
            tool_call_id: "call_1".to_string(),
            content: "ok".to_string(),
        });
        let wire = serde_json::to_value(to_wire(&msg)).unwrap();
        assert_eq!(wire["role"], "tool");
        assert_eq!(wire["tool_call_id"], "call_1");
        assert!(wire.get("tool_calls").is_none());
    }

    #[test]
    fn test_parse_response_with_tool_calls() {
        let body = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [
                        {
                            "id": "abc",
                            "type": "function",
                            "function": { "name": "write_note", "arguments": "{\"filename\":\"a.txt\",\"content\":\"x\"}" }
                        },
                        {
                            "function": { "name": "list_notes", "arguments": "" }
                        }
                    ]
                },
                "finish_reason": "tool_calls"
            }]
        });
        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        let response = from_wire(parsed.choices.into_iter().next().unwrap().message);

        assert!(response.has_tool_calls());
        assert_eq!(response.content, "");
        assert_eq!(response.tool_calls[0].id, "abc");
        assert_eq!(response.tool_calls[0].arguments["content"], "x");
        assert_eq!(response.tool_calls[1].id, "call_1");
        assert_eq!(response.tool_calls[1].arguments, json!({}));
    }

    #[test]
    fn test_unparseable_arguments_kept_raw() {
        let response = from_wire(WireMessage {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(vec![WireToolCall {
                id: None,
                call_type: function_type(),
                function: WireFunctionCall {
                    name: "read_note".to_string(),
                    arguments: "{not json".to_string(),
                },
            }]),
            tool_call_id: None,
        });
        assert_eq!(response.tool_calls[0].arguments, json!("{not json"));
    }
}
