use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// AI API error with status code information
#[derive(Debug, Clone)]
pub struct AiError {
    /// Error message
    pub message: String,
    /// HTTP status code if available
    pub status_code: Option<u16>,
}

impl AiError {
    pub fn new(message: impl Into<String>) -> Self {
        AiError {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        AiError {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// 4xx from the provider, usually a bad key or malformed request
    pub fn is_client_error(&self) -> bool {
        self.status_code.map(|c| (400..500).contains(&c)).unwrap_or(false)
    }
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.status_code {
            write!(f, "[HTTP {}] {}", code, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for AiError {}

/// Represents a tool call made by the AI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// Arguments to pass to the tool as JSON
    pub arguments: Value,
}

/// Represents the result of a tool execution to send back to the AI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// ID of the tool call this responds to
    pub tool_call_id: String,
    /// Content of the tool response
    pub content: String,
}

/// Provider-agnostic conversation entry
#[derive(Debug, Clone)]
pub enum ChatMessage {
    System(String),
    User(String),
    Assistant {
        content: String,
        tool_calls: Vec<ToolCall>,
    },
    Tool(ToolResponse),
}

/// One model turn: text, tool calls, or both
#[derive(Debug, Clone, Default)]
pub struct AiResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl AiResponse {
    #[cfg(test)]
    pub fn text(content: impl Into<String>) -> Self {
        AiResponse {
            content: content.into(),
            tool_calls: vec![],
        }
    }

    pub fn with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        AiResponse {
            content: content.into(),
            tool_calls,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_error_display() {
        assert_eq!(AiError::new("boom").to_string(), "boom");
        let e = AiError::with_status("bad key", 401);
        assert_eq!(e.to_string(), "[HTTP 401] bad key");
        assert!(e.is_client_error());
        assert!(!AiError::with_status("down", 503).is_client_error());
    }
}
