use crate::client::{McpClient, ToolInfo, ToolResponse};
use crate::error::McpClientError;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Routes tool calls to whichever connected MCP server owns the tool
#[derive(Default)]
pub struct McpToolExecutor {
    clients: RwLock<HashMap<String, Arc<McpClient>>>,
    tool_owners: RwLock<HashMap<String, String>>,
}

impl McpToolExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a server and index its tools; returns the tools it exposes
    ///
    /// When two servers expose the same tool name, the first registration wins.
    pub async fn add_server(&self, client: McpClient) -> Result<Vec<ToolInfo>> {
        let name = client.name().to_string();
        if self.clients.read().await.contains_key(&name) {
            return Err(McpClientError::DuplicateServer(name).into());
        }

        let tools = client.list_tools().await?;
        {
            let mut owners = self.tool_owners.write().await;
            for tool in &tools {
                if let Some(existing) = owners.get(&tool.name) {
                    tracing::warn!(
                        tool = %tool.name,
                        kept = %existing,
                        ignored = %name,
                        "duplicate tool name across MCP servers"
                    );
                    continue;
                }
                owners.insert(tool.name.clone(), name.clone());
            }
        }

        self.clients.write().await.insert(name, Arc::new(client));
        Ok(tools)
    }

    pub async fn client(&self, server_name: &str) -> Option<Arc<McpClient>> {
        self.clients.read().await.get(server_name).cloned()
    }

    pub async fn list_all_tools(&self) -> Result<Vec<(String, Vec<ToolInfo>)>> {
        let clients = self.clients.read().await;
        let mut all_tools = Vec::new();

        for (server_name, client) in clients.iter() {
            let tools = client.list_tools().await?;
            all_tools.push((server_name.clone(), tools));
        }

        Ok(all_tools)
    }

    pub async fn get_llm_tools(&self) -> Result<Vec<hrdesk_llm::Tool>> {
        let clients = self.clients.read().await;
        let owners = self.tool_owners.read().await;
        let mut all_tools = Vec::new();

        for (server_name, client) in clients.iter() {
            let tools = client.get_llm_tools().await?;
            all_tools.extend(
                tools
                    .into_iter()
                    .filter(|t| owners.get(t.name()) == Some(server_name)),
            );
        }

        Ok(all_tools)
    }

    pub async fn execute_tool(
        &self,
        tool_name: &str,
        arguments: serde_json::Value,
    ) -> Result<Vec<ToolResponse>> {
        let owner = self
            .tool_owners
            .read()
            .await
            .get(tool_name)
            .cloned()
            .ok_or_else(|| McpClientError::ToolNotFound(tool_name.to_string()))?;

        let client = self
            .client(&owner)
            .await
            .ok_or_else(|| McpClientError::ToolNotFound(tool_name.to_string()))?;

        client.call_tool(tool_name, arguments).await
    }

    /// Close every session that is not shared elsewhere
    pub async fn shutdown(&self) {
        let clients: Vec<_> = self.clients.write().await.drain().collect();
        self.tool_owners.write().await.clear();

        for (name, client) in clients {
            match Arc::try_unwrap(client) {
                Ok(client) => {
                    if let Err(e) = client.close().await {
                        tracing::warn!(server = %name, error = %e, "failed to close MCP session");
                    }
                }
                Err(_) => tracing::debug!(server = %name, "MCP session still in use, dropping reference"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_executor_creation() {
        let executor = McpToolExecutor::new();
        assert!(executor.list_all_tools().await.unwrap().is_empty());
        assert!(executor.get_llm_tools().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let executor = McpToolExecutor::new();
        let err = executor
            .execute_tool("missing", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Tool 'missing' not found");
    }
}
