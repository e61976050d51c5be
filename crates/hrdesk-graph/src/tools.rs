use anyhow::Result;
use async_trait::async_trait;
use hrdesk_llm::Tool;
use hrdesk_mcp::{McpToolExecutor, ToolResponse};
use serde_json::Value;

/// Source of tools for the agent loop
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Tool catalogue advertised to the LLM
    async fn llm_tools(&self) -> Result<Vec<Tool>>;

    /// Run a tool and return its textual result
    async fn execute(&self, tool_name: &str, arguments: Value) -> Result<String>;
}

#[async_trait]
impl ToolExecutor for McpToolExecutor {
    async fn llm_tools(&self) -> Result<Vec<Tool>> {
        self.get_llm_tools().await
    }

    async fn execute(&self, tool_name: &str, arguments: Value) -> Result<String> {
        let responses = self.execute_tool(tool_name, arguments).await?;
        Ok(ToolResponse::join_responses(&responses))
    }
}
