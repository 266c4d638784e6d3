use super::{filename_property, store_error};
use crate::tools::registry::Tool;
use crate::tools::types::{
    NoteToolName, PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Write note tool - creates a note or replaces its entire content
pub struct WriteNoteTool {
    definition: ToolDefinition,
}

impl WriteNoteTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();
        properties.insert("filename".to_string(), filename_property());
        properties.insert(
            "content".to_string(),
            PropertySchema::string(
                "The full text to store. Replaces any existing content, so include everything the note should keep.",
            ),
        );

        WriteNoteTool {
            definition: ToolDefinition {
                name: NoteToolName::WriteNote.to_string(),
                description: "Write content to a note file. Creates the note if it does not exist and overwrites it if it does.".to_string(),
                input_schema: ToolInputSchema::object(
                    properties,
                    vec!["filename".to_string(), "content".to_string()],
                ),
            },
        }
    }
}

impl Default for WriteNoteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct WriteNoteParams {
    filename: String,
    content: String,
}

#[async_trait]
impl Tool for WriteNoteTool {
    fn name(&self) -> NoteToolName {
        NoteToolName::WriteNote
    }

    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: WriteNoteParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        match context.notes_store.write(&params.filename, &params.content) {
            Ok(outcome) => ToolResult::success(format!(
                "Successfully wrote {} characters to '{}'.",
                outcome.chars, params.filename
            )),
            Err(e) => store_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::notes::NoteStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup(max: Option<usize>) -> (TempDir, ToolContext) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(NoteStore::new(dir.path().join("notes"), max));
        (dir, ToolContext::new(store))
    }

    #[tokio::test]
    async fn test_write_reports_characters() {
        let (_dir, ctx) = setup(None);
        let result = WriteNoteTool::new()
            .execute(
                json!({ "filename": "shopping.txt", "content": "milk, eggs, bread" }),
                &ctx,
            )
            .await;

        assert!(result.success);
        assert_eq!(
            result.content,
            "Successfully wrote 17 characters to 'shopping.txt'."
        );
        assert_eq!(
            ctx.notes_store.read("shopping.txt").unwrap(),
            "milk, eggs, bread"
        );
    }

    #[tokio::test]
    async fn test_write_rejects_path() {
        let (dir, ctx) = setup(None);
        let result = WriteNoteTool::new()
            .execute(json!({ "filename": "../pwned.txt", "content": "x" }), &ctx)
            .await;

        assert!(!result.success);
        assert!(!result.internal);
        assert!(!dir.path().join("pwned.txt").exists());
    }

    #[tokio::test]
    async fn test_write_too_large() {
        let (_dir, ctx) = setup(Some(4));
        let result = WriteNoteTool::new()
            .execute(json!({ "filename": "a.txt", "content": "12345" }), &ctx)
            .await;

        assert!(!result.success);
        assert!(!result.internal);
        assert!(result.error.unwrap().contains("too large"));
    }

    #[tokio::test]
    async fn test_write_requires_content() {
        let (_dir, ctx) = setup(None);
        let result = WriteNoteTool::new()
            .execute(json!({ "filename": "a.txt" }), &ctx)
            .await;
        assert!(result.error.unwrap().contains("content"));
    }
}
