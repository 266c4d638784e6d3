use crate::notes::NoteStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use strum::{Display, EnumIter, EnumString};

/// The fixed set of note tools exposed to the model.
///
/// Names round-trip through strum, so the string the model sends back
/// parses directly into a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum NoteToolName {
    ReadNote,
    WriteNote,
    ListNotes,
    DeleteNote,
}

/// JSON-schema property of a tool argument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
}

impl PropertySchema {
    pub fn string(description: impl Into<String>) -> Self {
        PropertySchema {
            schema_type: "string".to_string(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: HashMap<String, PropertySchema>,
    pub required: Vec<String>,
}

impl ToolInputSchema {
    pub fn object(properties: HashMap<String, PropertySchema>, required: Vec<String>) -> Self {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties,
            required,
        }
    }
}

/// Self-description handed to the model so it can pick a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

/// Outcome of a tool call. Always rendered to plain text for the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unexpected failure (I/O, permissions). The agent stops instead of
    /// relaying it to the model.
    #[serde(default)]
    pub internal: bool,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        ToolResult {
            success: true,
            content: content.into(),
            error: None,
            internal: false,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        ToolResult {
            success: false,
            content: String::new(),
            error: Some(error.into()),
            internal: false,
        }
    }

    pub fn internal(error: impl Into<String>) -> Self {
        ToolResult {
            internal: true,
            ..ToolResult::error(error)
        }
    }

    /// Text sent back to the model
    pub fn to_text(&self) -> String {
        if self.success {
            self.content.clone()
        } else {
            format!("Error: {}", self.error.as_deref().unwrap_or("unknown error"))
        }
    }
}

/// Everything a tool needs to run
#[derive(Clone)]
pub struct ToolContext {
    pub notes_store: Arc<NoteStore>,
}

impl ToolContext {
    pub fn new(notes_store: Arc<NoteStore>) -> Self {
        ToolContext { notes_store }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tool_names_are_stable() {
        let names: Vec<String> = NoteToolName::iter().map(|n| n.to_string()).collect();
        assert_eq!(
            names,
            vec!["read_note", "write_note", "list_notes", "delete_note"]
        );
        assert_eq!(
            NoteToolName::from_str("delete_note").unwrap(),
            NoteToolName::DeleteNote
        );
        assert!(NoteToolName::from_str("rm_rf").is_err());
    }

    #[test]
    fn test_result_text() {
        assert_eq!(ToolResult::success("done").to_text(), "done");
        assert_eq!(ToolResult::error("nope").to_text(), "Error: nope");
        assert!(ToolResult::internal("disk").internal);
    }

    #[test]
    fn test_schema_serializes_as_json_schema() {
        let mut props = HashMap::new();
        props.insert("filename".to_string(), PropertySchema::string("name"));
        let schema = ToolInputSchema::object(props, vec!["filename".to_string()]);
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "object");
        assert_eq!(value["properties"]["filename"]["type"], "string");
        assert_eq!(value["required"][0], "filename");
        assert_eq!(value["properties"]["filename"]["description"], "name");
    }
}
