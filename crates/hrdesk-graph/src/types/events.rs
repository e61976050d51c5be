use serde::{Deserialize, Serialize};

/// Progress events emitted while a graph run executes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    InitStream {
        run_id: String,
        timestamp: i64,
    },

    /// Assistant text from one LLM turn
    Message {
        content: String,
    },

    /// The LLM asked for a tool
    ToolCall {
        id: String,
        name: String,
        arguments: String,
    },

    ToolResult {
        tool_call_id: String,
        result: String,
        is_error: bool,
        duration_ms: u64,
    },

    /// One LLM turn finished
    Done {
        #[serde(skip_serializing_if = "Option::is_none")]
        finish_reason: Option<String>,
    },

    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        node_id: Option<String>,
    },

    EndStream {
        status: String,
        total_duration_ms: u64,
    },
}
