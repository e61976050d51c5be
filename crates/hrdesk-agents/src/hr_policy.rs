use crate::runtime::AgentRuntime;
use anyhow::{Context, Result};
use hrdesk_mcp::McpClient;
use serde_json::{Map, Value};

pub const DEFAULT_QUERY: &str = "What is the policy on remote work?";

/// Spawn the HR policy server and answer `query` with its tool and prompt
pub async fn run_hr_policy_agent(
    runtime: &AgentRuntime,
    command: &str,
    args: &[String],
    query: &str,
) -> Result<String> {
    tracing::info!(%command, "starting HR policy MCP server");
    let client = McpClient::new_stdio("hr-policy", command, args.to_vec())
        .await
        .with_context(|| format!("Failed to start HR policy server '{}'", command))?;
    run_hr_policy_session(runtime, client, query).await
}

pub async fn run_hr_policy_session(
    runtime: &AgentRuntime,
    client: McpClient,
    query: &str,
) -> Result<String> {
    tracing::info!(%query, "answering HR policy query");

    let mut arguments = Map::new();
    arguments.insert("query".to_string(), Value::from(query));

    runtime.run_with_prompt(client, "get_llm_prompt", arguments).await
}
