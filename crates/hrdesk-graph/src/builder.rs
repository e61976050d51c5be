use std::sync::Arc;
use anyhow::{anyhow, Result};

use hrdesk_llm::ChatClient;
use crate::graph::Graph;
use crate::router::Router;
use crate::tools::ToolExecutor;
use crate::types::GraphConfig;

/// Builder for constructing a Graph
#[derive(Default)]
pub struct GraphBuilder {
    llm_client: Option<Arc<dyn ChatClient>>,
    tools: Option<Arc<dyn ToolExecutor>>,
    router: Option<Arc<dyn Router>>,
    config: GraphConfig,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn llm_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    /// Tool source, usually an `McpToolExecutor`
    pub fn tools(mut self, tools: Arc<dyn ToolExecutor>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Graph> {
        let llm_client = self.llm_client
            .ok_or_else(|| anyhow!("LLM client is required"))?;
        let tools = self.tools
            .ok_or_else(|| anyhow!("Tool executor is required"))?;

        let graph = Graph::new(llm_client, tools, self.config);
        Ok(match self.router {
            Some(router) => graph.with_router(router),
            None => graph,
        })
    }
}
