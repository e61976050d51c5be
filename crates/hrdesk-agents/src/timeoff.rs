use crate::runtime::AgentRuntime;
use anyhow::{Context, Result};
use hrdesk_mcp::McpClient;
use serde_json::{Map, Value};

pub const DEMO_USER: &str = "Alice";

/// The balance / request / balance walkthrough
pub const DEMO_PROMPTS: [&str; 3] = [
    "What is my time off balance?",
    "File a time off request for 5 days starting from 2025-05-05",
    "What is my time off balance now?",
];

/// Answer `prompt` for `user` against the streamable-HTTP time-off server
pub async fn run_timeoff_agent(
    runtime: &AgentRuntime,
    url: &str,
    user: &str,
    prompt: &str,
) -> Result<String> {
    let client = McpClient::new_http("timeoff", url)
        .await
        .with_context(|| format!("Failed to connect to time-off server at {}", url))?;
    run_timeoff_session(runtime, client, user, prompt).await
}

pub async fn run_timeoff_session(
    runtime: &AgentRuntime,
    client: McpClient,
    user: &str,
    prompt: &str,
) -> Result<String> {
    tracing::info!(%user, %prompt, "answering prompt");

    let mut arguments = Map::new();
    arguments.insert("user".to_string(), Value::from(user));
    arguments.insert("prompt".to_string(), Value::from(prompt));

    runtime.run_with_prompt(client, "get_llm_prompt", arguments).await
}
