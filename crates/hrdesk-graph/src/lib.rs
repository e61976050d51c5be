pub mod builder;
pub mod graph;
pub mod node;
pub mod nodes;
pub mod router;
pub mod tools;
pub mod types;

pub use builder::GraphBuilder;
pub use graph::Graph;
pub use node::{EventSink, Node, NodeType};
pub use router::{NextNode, Router, SimpleRouter};
pub use tools::ToolExecutor;
pub use types::{GraphConfig, GraphInput, GraphState, LLMConfig, StreamEvent};
