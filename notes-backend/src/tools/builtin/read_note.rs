use super::{filename_property, store_error};
use crate::notes::NoteError;
use crate::tools::registry::Tool;
use crate::tools::types::{
    NoteToolName, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Read note tool - returns the full text of one note
pub struct ReadNoteTool {
    definition: ToolDefinition,
}

impl ReadNoteTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();
        properties.insert("filename".to_string(), filename_property());

        ReadNoteTool {
            definition: ToolDefinition {
                name: NoteToolName::ReadNote.to_string(),
                description: "Read the contents of a note file. Use this when the user asks what a note says or before editing an existing note.".to_string(),
                input_schema: ToolInputSchema::object(properties, vec!["filename".to_string()]),
            },
        }
    }
}

impl Default for ReadNoteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ReadNoteParams {
    filename: String,
}

#[async_trait]
impl Tool for ReadNoteTool {
    fn name(&self) -> NoteToolName {
        NoteToolName::ReadNote
    }

    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: ReadNoteParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };
        let store = &context.notes_store;

        match store.read(&params.filename) {
            Ok(content) if content.trim().is_empty() => ToolResult::success(format!(
                "Note '{}' exists but is empty.",
                params.filename
            )),
            Ok(content) => ToolResult::success(format!(
                "Contents of '{}':\n\n{}",
                params.filename, content
            )),
            Err(NoteError::NotFound { filename }) => {
                let available = store.list().unwrap_or_default();
                if available.is_empty() {
                    ToolResult::error(format!(
                        "Note '{}' not found. The notes folder is empty.",
                        filename
                    ))
                } else {
                    ToolResult::error(format!(
                        "Note '{}' not found. Available notes: {}",
                        filename,
                        available.join(", ")
                    ))
                }
            }
            Err(e) => store_error(e),
        }
    }
}
