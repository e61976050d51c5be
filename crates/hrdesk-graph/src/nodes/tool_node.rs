use crate::node::{EventSink, Node, NodeType};
use crate::tools::ToolExecutor;
use crate::types::{GraphState, StreamEvent};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

pub struct ToolNode {
    tools: Arc<dyn ToolExecutor>,
}

impl ToolNode {
    pub fn new(tools: Arc<dyn ToolExecutor>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl Node for ToolNode {
    async fn execute(&self, state: &mut GraphState, events: &EventSink) -> Result<()> {
        for tool_call in state.get_pending_tool_calls() {
            let start = Instant::now();
            let name = &tool_call.function.name;

            tracing::info!(run_id = %state.run_id, tool = %name, "TOOL_NODE: executing tool call");

            // Failures are fed back to the LLM as tool output
            let outcome = match tool_call.arguments_value() {
                Ok(args) => self.tools.execute(name, args).await,
                Err(e) => Err(anyhow::anyhow!("Invalid tool arguments: {}", e)),
            };

            let (result, is_error) = match outcome {
                Ok(result) => (result, false),
                Err(e) => {
                    tracing::warn!(tool = %name, error = %e, "tool call failed");
                    (format!("Tool execution failed: {}", e), true)
                }
            };

            events
                .emit(StreamEvent::ToolResult {
                    tool_call_id: tool_call.id.clone(),
                    result: result.clone(),
                    is_error,
                    duration_ms: start.elapsed().as_millis() as u64,
                })
                .await;

            state.add_tool_result(tool_call.id, result);
        }

        Ok(())
    }

    fn node_type(&self) -> NodeType {
        NodeType::Tool
    }
}
