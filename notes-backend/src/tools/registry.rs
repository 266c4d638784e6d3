use crate::tools::builtin;
use crate::tools::types::{NoteToolName, ToolContext, ToolDefinition, ToolResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Trait that all tools must implement
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool definition for the AI API
    fn definition(&self) -> ToolDefinition;

    /// Executes the tool with the given parameters
    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult;

    /// Which of the fixed note tools this is
    fn name(&self) -> NoteToolName;
}

/// Registry that holds all available tools, keyed by tool name.
pub struct ToolRegistry {
    tools: RwLock<HashMap<NoteToolName, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        ToolRegistry {
            tools: RwLock::new(HashMap::new()),
        }
    }

    /// Registry preloaded with the four note tools
    pub fn with_note_tools() -> Self {
        let registry = Self::new();
        for name in NoteToolName::iter() {
            registry.register(builtin::note_tool(name));
        }
        registry
    }

    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name();
        self.tools.write().insert(name, tool);
    }

    pub fn get(&self, name: NoteToolName) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(&name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.read().len()
    }

    /// All definitions, sorted by name so the model sees a stable order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> =
            self.tools.read().values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Run the tool called `name`. Unknown names come back as an error
    /// result so the model can correct itself.
    pub async fn execute(&self, name: &str, params: Value, context: &ToolContext) -> ToolResult {
        let tool = match NoteToolName::from_str(name).ok().and_then(|n| self.get(n)) {
            Some(t) => t,
            None => {
                let mut available: Vec<String> =
                    self.tools.read().keys().map(|n| n.to_string()).collect();
                available.sort();
                log::warn!("[TOOLS] Model requested unknown tool '{}'", name);
                return ToolResult::error(format!(
                    "Unknown tool '{}'. Available tools: {}",
                    name,
                    available.join(", ")
                ));
            }
        };

        log::debug!("[TOOLS] Executing {} with {}", name, params);
        let result = tool.execute(params, context).await;
        if result.internal {
            log::error!(
                "[TOOLS] {} failed internally: {}",
                name,
                result.error.as_deref().unwrap_or("")
            );
        } else if !result.success {
            log::info!(
                "[TOOLS] {} returned error: {}",
                name,
                result.error.as_deref().unwrap_or("")
            );
        }
        result
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
