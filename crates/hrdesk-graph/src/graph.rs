use crate::node::{EventSink, Node, NodeType};
use crate::nodes::{LLMNode, ToolNode};
use crate::router::{NextNode, Router, SimpleRouter};
use crate::tools::ToolExecutor;
use crate::types::{GraphConfig, GraphInput, GraphState, StreamEvent};
use anyhow::{anyhow, Result};
use hrdesk_llm::ChatClient;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// ReAct agent: alternates LLM turns and tool execution until the LLM answers
#[derive(Clone)]
pub struct Graph {
    llm_client: Arc<dyn ChatClient>,
    tools: Arc<dyn ToolExecutor>,
    router: Arc<dyn Router>,
    config: GraphConfig,
}

impl Graph {
    pub fn new(
        llm_client: Arc<dyn ChatClient>,
        tools: Arc<dyn ToolExecutor>,
        config: GraphConfig,
    ) -> Self {
        Self {
            llm_client,
            tools,
            router: Arc::new(SimpleRouter),
            config,
        }
    }

    pub fn builder() -> crate::builder::GraphBuilder {
        crate::builder::GraphBuilder::new()
    }

    pub(crate) fn with_router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = router;
        self
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Run to completion and return the final state
    pub async fn invoke(&self, input: GraphInput) -> Result<GraphState> {
        self.run(input, EventSink::disabled()).await
    }

    /// Run in the background, streaming progress events
    pub fn spawn_run(&self, input: GraphInput) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(1000);
        let graph = self.clone();

        tokio::spawn(async move {
            // Failures are already reported as events
            let _ = graph.run(input, EventSink::new(tx)).await;
        });

        rx
    }

    async fn run(&self, input: GraphInput, events: EventSink) -> Result<GraphState> {
        let start_time = Instant::now();
        let mut state = GraphState::from_input(input);

        events
            .emit(StreamEvent::InitStream {
                run_id: state.run_id.clone(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            })
            .await;

        let outcome = tokio::time::timeout(
            self.config.execution_timeout,
            self.execute_loop(&mut state, &events),
        )
        .await
        .unwrap_or_else(|_| {
            Err(anyhow!(
                "Execution timed out after {:?}",
                self.config.execution_timeout
            ))
        });

        // EndStream is always the last event of a run
        let status = match &outcome {
            Ok(()) => "success",
            Err(e) => {
                events
                    .emit(StreamEvent::Error {
                        message: e.to_string(),
                        node_id: None,
                    })
                    .await;
                "error"
            }
        };
        events
            .emit(StreamEvent::EndStream {
                status: status.to_string(),
                total_duration_ms: start_time.elapsed().as_millis() as u64,
            })
            .await;

        outcome.map(|()| state)
    }

    async fn execute_loop(&self, state: &mut GraphState, events: &EventSink) -> Result<()> {
        let llm_node = LLMNode::new(Arc::clone(&self.llm_client), Arc::clone(&self.tools));
        let tool_node = ToolNode::new(Arc::clone(&self.tools));

        let mut current_node = NodeType::LLM;
        let mut iteration = 0;

        loop {
            if iteration >= self.config.max_iterations {
                anyhow::bail!("Max iterations ({}) reached", self.config.max_iterations);
            }

            let node: &dyn Node = match current_node {
                NodeType::LLM => &llm_node,
                NodeType::Tool => &tool_node,
            };
            let node_start = Instant::now();
            node.execute(state, events).await?;

            tracing::debug!(
                run_id = %state.run_id,
                node = ?current_node,
                iteration,
                duration_ms = node_start.elapsed().as_millis() as u64,
                "node finished"
            );

            current_node = match self.router.next(state, current_node) {
                NextNode::LLM => NodeType::LLM,
                NextNode::Tool => NodeType::Tool,
                NextNode::End => break,
            };
            iteration += 1;
        }

        Ok(())
    }
}
