use super::store_error;
use crate::tools::registry::Tool;
use crate::tools::types::{
    NoteToolName, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// List notes tool - names of every note in the notes folder
pub struct ListNotesTool {
    definition: ToolDefinition,
}

impl ListNotesTool {
    pub fn new() -> Self {
        ListNotesTool {
            definition: ToolDefinition {
                name: NoteToolName::ListNotes.to_string(),
                description: "List all existing notes in the notes folder. Use this first when the user refers to a note without giving its exact filename.".to_string(),
                input_schema: ToolInputSchema::object(HashMap::new(), vec![]),
            },
        }
    }
}

impl Default for ListNotesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ListNotesTool {
    fn name(&self) -> NoteToolName {
        NoteToolName::ListNotes
    }

    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    // Takes no arguments; anything the model sends is ignored.
    async fn execute(&self, _params: Value, context: &ToolContext) -> ToolResult {
        let notes = match context.notes_store.list() {
            Ok(n) => n,
            Err(e) => return store_error(e),
        };

        let text = match notes.len() {
            0 => "No notes found. The notes folder is empty.".to_string(),
            1 => format!("Found 1 note: {}", notes[0]),
            n => format!(
                "Found {} notes:\n{}",
                n,
                notes
                    .iter()
                    .map(|note| format!("  - {}", note))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        };

        ToolResult::success(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::notes::NoteStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_formats() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(NoteStore::new(dir.path().join("notes"), None));
        let ctx = ToolContext::new(store.clone());
        let tool = ListNotesTool::new();

        let result = tool.execute(json!({}), &ctx).await;
        assert_eq!(result.content, "No notes found. The notes folder is empty.");

        store.write("b.txt", "b").unwrap();
        let result = tool.execute(Value::Null, &ctx).await;
        assert_eq!(result.content, "Found 1 note: b.txt");

        store.write("a.txt", "a").unwrap();
        let result = tool.execute(json!({}), &ctx).await;
        assert_eq!(result.content, "Found 2 notes:\n  - a.txt\n  - b.txt");
    }
}
