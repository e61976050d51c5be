use crate::types::{GraphState, StreamEvent};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Unit of computation in the graph
#[async_trait]
pub trait Node: Send + Sync {
    /// Run the node, mutating state and emitting events
    async fn execute(&self, state: &mut GraphState, events: &EventSink) -> Result<()>;

    fn node_type(&self) -> NodeType;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    LLM,
    Tool,
}

/// Optional event channel; a missing or closed receiver is not an error
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::Sender<StreamEvent>>,
}

impl EventSink {
    pub fn new(tx: mpsc::Sender<StreamEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub async fn emit(&self, event: StreamEvent) {
        if let Some(tx) = &self.tx {
            if tx.send(event).await.is_err() {
                tracing::trace!("event receiver dropped");
            }
        }
    }
}
