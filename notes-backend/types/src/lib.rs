//! Shared wire types for the notes agent service and its HTTP clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Request Types
// =====================================================

/// Ask the notes agent to do something with the notes folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    /// Natural-language instruction, e.g. "add milk to shopping.txt"
    pub prompt: String,
}

// =====================================================
// Response Types
// =====================================================

/// Successful agent invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The agent's final text answer
    pub response: String,
}

/// Error body returned with 4xx/5xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// =====================================================
// Domain Types
// =====================================================

/// Service health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    /// RFC 3339 timestamp of process start
    pub started_at: String,
    pub model: String,
    pub notes_dir: String,
    pub note_count: usize,
    pub total_prompts: u64,
}
