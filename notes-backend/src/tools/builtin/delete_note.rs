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

/// Delete note tool - permanently removes one note
pub struct DeleteNoteTool {
    definition: ToolDefinition,
}

impl DeleteNoteTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();
        properties.insert("filename".to_string(), filename_property());

        DeleteNoteTool {
            definition: ToolDefinition {
                name: NoteToolName::DeleteNote.to_string(),
                description: "Delete a note file. The note must exist. This cannot be undone, so only use it when the user clearly asks to remove a note.".to_string(),
                input_schema: ToolInputSchema::object(properties, vec!["filename".to_string()]),
            },
        }
    }
}

impl Default for DeleteNoteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct DeleteNoteParams {
    filename: String,
}

#[async_trait]
impl Tool for DeleteNoteTool {
    fn name(&self) -> NoteToolName {
        NoteToolName::DeleteNote
    }

    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: DeleteNoteParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        match context.notes_store.delete(&params.filename) {
            Ok(()) => ToolResult::success(format!("Successfully deleted '{}'.", params.filename)),
            Err(NoteError::NotFound { filename }) => ToolResult::error(format!(
                "Note '{}' does not exist. Cannot delete a file that doesn't exist.",
                filename
            )),
            Err(e) => store_error(e),
        }
    }
}
