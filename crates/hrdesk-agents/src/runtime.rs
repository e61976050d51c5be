use crate::config::AgentsConfig;
use anyhow::{anyhow, Result};
use hrdesk_graph::{Graph, GraphConfig, GraphInput, LLMConfig, StreamEvent, ToolExecutor};
use hrdesk_llm::{ChatClient, ClientFactory, Message};
use hrdesk_mcp::{McpClient, McpToolExecutor};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Everything an agent run needs apart from its MCP session
#[derive(Clone)]
pub struct AgentRuntime {
    llm_client: Arc<dyn ChatClient>,
    llm_config: LLMConfig,
    graph_config: GraphConfig,
}

impl AgentRuntime {
    pub fn new(llm_client: Arc<dyn ChatClient>, llm_config: LLMConfig, graph_config: GraphConfig) -> Self {
        Self {
            llm_client,
            llm_config,
            graph_config,
        }
    }

    pub fn from_config(config: &AgentsConfig) -> Result<Self> {
        let provider = config.provider_config()?;
        tracing::info!(provider = ?provider.provider_type(), model = %config.llm.model, "initializing LLM client");
        let llm_client = ClientFactory::create_chat_client(provider)?;
        Ok(Self::new(llm_client, config.llm_config(), config.graph_config()))
    }

    pub fn llm_client(&self) -> &Arc<dyn ChatClient> {
        &self.llm_client
    }

    pub fn llm_config(&self) -> &LLMConfig {
        &self.llm_config
    }

    /// Fetch `prompt_name` from the server, then answer it with the server's tools
    ///
    /// The session is closed before returning.
    pub async fn run_with_prompt(
        &self,
        client: McpClient,
        prompt_name: &str,
        arguments: Map<String, Value>,
    ) -> Result<String> {
        let tools = client.list_tools().await?;
        for tool in &tools {
            tracing::info!(
                server = %client.name(),
                tool = %tool.name,
                description = tool.description.as_deref().unwrap_or(""),
                "tool loaded"
            );
        }

        let messages = client.get_prompt(prompt_name, arguments).await?;
        tracing::debug!(prompt = %prompt_name, messages = messages.len(), "prompt loaded");

        let executor = Arc::new(McpToolExecutor::new());
        executor.add_server(client).await?;

        let outcome = self.run_graph(executor.clone(), messages).await;
        executor.shutdown().await;
        outcome
    }

    /// Run the ReAct loop and return the last assistant answer
    pub async fn run_graph(&self, tools: Arc<dyn ToolExecutor>, messages: Vec<Message>) -> Result<String> {
        let graph = Graph::builder()
            .llm_client(Arc::clone(&self.llm_client))
            .tools(tools)
            .config(self.graph_config.clone())
            .build()?;

        let mut events = graph.spawn_run(GraphInput::new(messages, self.llm_config.clone()));
        let mut answer: Option<String> = None;
        let mut failure: Option<String> = None;

        while let Some(event) = events.recv().await {
            match event {
                StreamEvent::InitStream { run_id, .. } => {
                    tracing::info!(%run_id, "agent run started");
                }
                StreamEvent::Message { content } => {
                    answer = Some(content);
                }
                StreamEvent::ToolCall { name, arguments, .. } => {
                    // A turn that calls tools is not the final answer
                    answer = None;
                    tracing::info!(tool = %name, %arguments, "tool call");
                }
                StreamEvent::ToolResult {
                    result,
                    is_error,
                    duration_ms,
                    ..
                } => {
                    tracing::info!(%result, is_error, duration_ms, "tool result");
                }
                StreamEvent::Done { finish_reason } => {
                    tracing::debug!(?finish_reason, "LLM turn finished");
                }
                StreamEvent::Error { message, .. } => {
                    failure = Some(message);
                }
                StreamEvent::EndStream {
                    status,
                    total_duration_ms,
                } => {
                    tracing::info!(%status, total_duration_ms, "agent run finished");
                }
            }
        }

        if let Some(message) = failure {
            return Err(anyhow!("Agent run failed: {}", message));
        }
        answer.ok_or_else(|| anyhow!("Agent finished without an answer"))
    }
}
