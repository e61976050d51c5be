use crate::node::{EventSink, Node, NodeType};
use crate::tools::ToolExecutor;
use crate::types::{GraphState, StreamEvent};
use anyhow::Result;
use async_trait::async_trait;
use hrdesk_llm::{ChatClient, ChatOptions, ChatRequest, ToolChoice};
use std::sync::Arc;

pub struct LLMNode {
    client: Arc<dyn ChatClient>,
    tools: Arc<dyn ToolExecutor>,
}

impl LLMNode {
    pub fn new(client: Arc<dyn ChatClient>, tools: Arc<dyn ToolExecutor>) -> Self {
        Self { client, tools }
    }

    async fn build_request(&self, state: &GraphState) -> Result<ChatRequest> {
        let tools = self.tools.llm_tools().await?;

        let mut options = ChatOptions::new();
        if !tools.is_empty() {
            options = options.tools(tools).tool_choice(ToolChoice::auto());
        }
        if let Some(temp) = state.llm_config.temperature {
            options = options.temperature(temp);
        }
        if let Some(max_tokens) = state.llm_config.max_tokens {
            options = options.max_tokens(max_tokens);
        }

        Ok(ChatRequest::new(state.llm_config.model.clone(), state.messages.clone())
            .with_options(options))
    }
}

#[async_trait]
impl Node for LLMNode {
    async fn execute(&self, state: &mut GraphState, events: &EventSink) -> Result<()> {
        let request = self.build_request(state).await?;

        tracing::info!(
            run_id = %state.run_id,
            model = %request.model,
            messages = request.messages.len(),
            "LLM_NODE: requesting completion"
        );

        let response = self.client.chat(request).await?;

        if let Some(content) = response.content.as_deref().filter(|c| !c.is_empty()) {
            events
                .emit(StreamEvent::Message {
                    content: content.to_string(),
                })
                .await;
        }
        for call in response.tool_calls.iter().flatten() {
            events
                .emit(StreamEvent::ToolCall {
                    id: call.id.clone(),
                    name: call.function.name.clone(),
                    arguments: call.function.arguments.clone(),
                })
                .await;
        }
        events
            .emit(StreamEvent::Done {
                finish_reason: response.finish_reason.clone(),
            })
            .await;

        state.add_message(response.into_message());
        Ok(())
    }

    fn node_type(&self) -> NodeType {
        NodeType::LLM
    }
}
