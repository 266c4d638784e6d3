use crate::ai::types::{AiError, ChatMessage, ToolResponse};
use crate::ai::{Agent, ChatModel};
use crate::tools::{ToolContext, ToolRegistry};
use async_trait::async_trait;
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "You are a note-taking assistant with access to a private notes folder. \
Help the user manage their notes quickly and accurately.\n\n\
Tools:\n\
- read_note: read the contents of a note\n\
- write_note: create a note or replace its whole content\n\
- list_notes: list every note in the folder\n\
- delete_note: permanently delete a note\n\n\
Rules:\n\
1. Only call tools when the request needs the notes folder. Answer general questions directly.\n\
2. When the user mentions a note without its exact filename, call list_notes first instead of guessing.\n\
3. Filenames are plain names like 'mynote.txt'. Never use paths or folders.\n\
4. write_note replaces the whole note. To add to a note, read it first and write back the combined text.\n\
5. After reading a note, quote or summarise what matters rather than just saying it was read.\n\
6. Keep answers short and clear.";

const NO_RESPONSE: &str = "Error: No response generated.";

/// Runs model turns until the model answers without calling a tool
pub struct ToolLoopAgent<M: ChatModel> {
    model: M,
    registry: Arc<ToolRegistry>,
    context: ToolContext,
    max_tool_rounds: usize,
}

impl<M: ChatModel> ToolLoopAgent<M> {
    pub fn new(
        model: M,
        registry: Arc<ToolRegistry>,
        context: ToolContext,
        max_tool_rounds: usize,
    ) -> Self {
        Self {
            model,
            registry,
            context,
            max_tool_rounds,
        }
    }
}

/// Most recent non-empty assistant text in the conversation
fn last_assistant_text(messages: &[ChatMessage]) -> Option<String> {
    messages.iter().rev().find_map(|m| match m {
        ChatMessage::Assistant { content, .. } if !content.trim().is_empty() => {
            Some(content.clone())
        }
        _ => None,
    })
}

#[async_trait]
impl<M: ChatModel> Agent for ToolLoopAgent<M> {
    fn model_name(&self) -> String {
        self.model.model_name().to_string()
    }

    async fn run(&self, prompt: &str) -> Result<String, AiError> {
        let tools = self.registry.definitions();
        let mut messages = vec![
            ChatMessage::System(SYSTEM_PROMPT.to_string()),
            ChatMessage::User(prompt.to_string()),
        ];

        for round in 0..=self.max_tool_rounds {
            let response = self.model.complete(&messages, &tools).await?;

            if !response.has_tool_calls() {
                if !response.content.trim().is_empty() {
                    log::info!("[AGENT] Finished after {} tool round(s)", round);
                    return Ok(response.content);
                }
                return Ok(last_assistant_text(&messages).unwrap_or_else(|| NO_RESPONSE.to_string()));
            }

            if round == self.max_tool_rounds {
                break;
            }

            let calls = response.tool_calls.clone();
            messages.push(ChatMessage::Assistant {
                content: response.content,
                tool_calls: response.tool_calls,
            });

            // Sequential so a write followed by a read in one turn sees the write
            for call in calls {
                log::info!("[AGENT] Round {}: calling {}", round + 1, call.name);
                let result = self
                    .registry
                    .execute(&call.name, call.arguments, &self.context)
                    .await;

                if result.internal {
                    return Err(AiError::new(format!(
                        "Tool '{}' failed: {}",
                        call.name,
                        result.error.as_deref().unwrap_or("unknown error")
                    )));
                }

                messages.push(ChatMessage::Tool(ToolResponse {
                    tool_call_id: call.id,
                    content: result.to_text(),
                }));
            }
        }

        log::warn!(
            "[AGENT] Gave up after {} tool rounds without a final answer",
            self.max_tool_rounds
        );
        Err(AiError::new(format!(
            "Agent stopped after {} tool rounds without a final answer",
            self.max_tool_rounds
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::{AiResponse, ToolCall};
    use crate::notes::NoteStore;
    use crate::tools::ToolDefinition;
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use tempfile::TempDir;

    /// Replays canned turns and records what it was sent
    struct ScriptedModel {
        turns: Mutex<VecDeque<AiResponse>>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedModel {
        fn new(turns: Vec<AiResponse>) -> Self {
            Self {
                turns: Mutex::new(turns.into()),
                seen: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        fn model_name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            messages: &[ChatMessage],
            tools: &[ToolDefinition],
        ) -> Result<AiResponse, AiError> {
            assert_eq!(tools.len(), 4);
            self.seen.lock().push(messages.to_vec());
            self.turns
                .lock()
                .pop_front()
                .ok_or_else(|| AiError::new("script exhausted"))
        }
    }

    fn call(id: &str, name: &str, args: Value) -> ToolCall {
        ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments: args,
        }
    }

    fn agent(turns: Vec<AiResponse>, max_rounds: usize) -> (TempDir, ToolLoopAgent<ScriptedModel>) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(NoteStore::new(dir.path().join("notes"), None));
        let agent = ToolLoopAgent::new(
            ScriptedModel::new(turns),
            Arc::new(ToolRegistry::with_note_tools()),
            ToolContext::new(store),
            max_rounds,
        );
        (dir, agent)
    }

    fn tool_messages(messages: &[ChatMessage]) -> Vec<ToolResponse> {
        messages
            .iter()
            .filter_map(|m| match m {
                ChatMessage::Tool(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_plain_answer_without_tools() {
        let (_dir, agent) = agent(vec![AiResponse::text("Hello!")], 5);
        assert_eq!(agent.run("hi").await.unwrap(), "Hello!");

        let seen = agent.model.seen.lock();
        assert!(matches!(&seen[0][0], ChatMessage::System(s) if s.contains("note-taking")));
        assert!(matches!(&seen[0][1], ChatMessage::User(s) if s == "hi"));
    }

    #[tokio::test]
    async fn test_write_then_read_through_tools() {
        let (_dir, agent) = agent(
            vec![
                AiResponse::with_tools(
                    "",
                    vec![
                        call("1", "write_note", json!({ "filename": "shopping.txt", "content": "milk, eggs, bread" })),
                        call("2", "read_note", json!({ "filename": "shopping.txt" })),
                    ],
                ),
                AiResponse::text("Saved your shopping list: milk, eggs, bread."),
            ],
            5,
        );

        let answer = agent.run("save my shopping list").await.unwrap();
        assert_eq!(answer, "Saved your shopping list: milk, eggs, bread.");
        assert_eq!(
            agent.context.notes_store.read("shopping.txt").unwrap(),
            "milk, eggs, bread"
        );

        let seen = agent.model.seen.lock();
        let results = tool_messages(&seen[1]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].tool_call_id, "1");
        assert!(results[1].content.contains("milk, eggs, bread"));
        assert!(!results[1].content.starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_tool_errors_are_relayed_to_model() {
        let (_dir, agent) = agent(
            vec![
                AiResponse::with_tools("", vec![call("1", "read_note", json!({ "filename": "missing.txt" }))]),
                AiResponse::text("That note doesn't exist."),
            ],
            5,
        );

        assert_eq!(agent.run("read missing").await.unwrap(), "That note doesn't exist.");
        let seen = agent.model.seen.lock();
        let results = tool_messages(&seen[1]);
        assert!(results[0].content.starts_with("Error: Note 'missing.txt' not found"));
    }

    #[tokio::test]
    async fn test_empty_final_turn_falls_back() {
        let (_dir, agent) = agent(
            vec![
                AiResponse::with_tools("Let me check.", vec![call("1", "list_notes", json!({}))]),
                AiResponse::text(""),
            ],
            5,
        );
        assert_eq!(agent.run("list").await.unwrap(), "Let me check.");

        let (_dir, agent) = agent_with_empty();
        assert_eq!(agent.run("?").await.unwrap(), NO_RESPONSE);
    }

    fn agent_with_empty() -> (TempDir, ToolLoopAgent<ScriptedModel>) {
        agent(vec![AiResponse::text("   ")], 5)
    }

    #[tokio::test]
    async fn test_step_limit() {
        let looping: Vec<AiResponse> = (0..3)
            .map(|i| AiResponse::with_tools("", vec![call(&i.to_string(), "list_notes", json!({}))]))
            .collect();
        let (_dir, agent) = agent(looping, 2);

        let err = agent.run("loop forever").await.unwrap_err();
        assert!(err.message.contains("2 tool rounds"));
        assert_eq!(agent.model.seen.lock().len(), 3);
    }

    #[tokio::test]
    async fn test_internal_tool_failure_aborts_run() {
        let dir = TempDir::new().unwrap();
        // A regular file where the notes folder should be
        let root = dir.path().join("notes");
        std::fs::write(&root, "not a directory").unwrap();

        let agent = ToolLoopAgent::new(
            ScriptedModel::new(vec![
                AiResponse::with_tools(
                    "",
                    vec![call("1", "write_note", json!({ "filename": "a.txt", "content": "x" }))],
                ),
                AiResponse::text("Saved."),
            ]),
            Arc::new(ToolRegistry::with_note_tools()),
            ToolContext::new(Arc::new(NoteStore::new(root, None))),
            5,
        );

        let err = agent.run("save a note").await.unwrap_err();
        assert!(err.message.starts_with("Tool 'write_note' failed"));
        // the failure never reaches the model
        assert_eq!(agent.model.seen.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_model_error_propagates() {
        let (_dir, agent) = agent(vec![], 5);
        assert!(agent.run("hi").await.is_err());
    }
}
