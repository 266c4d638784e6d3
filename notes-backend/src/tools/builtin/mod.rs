mod delete_note;
mod list_notes;
mod read_note;
mod write_note;

pub use delete_note::DeleteNoteTool;
pub use list_notes::ListNotesTool;
pub use read_note::ReadNoteTool;
pub use write_note::WriteNoteTool;

use crate::notes::NoteError;
use crate::tools::registry::Tool;
use crate::tools::types::{NoteToolName, PropertySchema, ToolResult};
use std::sync::Arc;

pub fn note_tool(name: NoteToolName) -> Arc<dyn Tool> {
    match name {
        NoteToolName::ReadNote => Arc::new(ReadNoteTool::new()),
        NoteToolName::WriteNote => Arc::new(WriteNoteTool::new()),
        NoteToolName::ListNotes => Arc::new(ListNotesTool::new()),
        NoteToolName::DeleteNote => Arc::new(DeleteNoteTool::new()),
    }
}

fn filename_property() -> PropertySchema {
    PropertySchema::string(
        "The name of the note file (e.g. 'mynote.txt'). Must be a simple filename without paths: letters, numbers, dots, dashes and underscores only.",
    )
}

/// Map a store failure onto a tool result. Filesystem faults are internal;
/// everything else is relayed to the model.
fn store_error(err: NoteError) -> ToolResult {
    if err.is_user_error() {
        ToolResult::error(err.to_string())
    } else {
        ToolResult::internal(err.to_string())
    }
}
