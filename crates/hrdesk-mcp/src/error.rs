use thiserror::Error;

#[derive(Error, Debug)]
pub enum McpClientError {
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("Tool '{tool}' reported an error: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Tool arguments must be a JSON object, got: {0}")]
    InvalidArguments(String),

    #[error("MCP server '{0}' is already registered")]
    DuplicateServer(String),
}
