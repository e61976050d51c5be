use crate::node::NodeType;
use crate::types::GraphState;

/// Decides which node to execute next based on current state
pub trait Router: Send + Sync {
    fn next(&self, state: &GraphState, current: NodeType) -> NextNode;
}

#[derive(Debug, Clone, PartialEq)]
pub enum NextNode {
    LLM,
    Tool,
    End,
}

/// ReAct routing: LLM -> Tool (while tool calls are pending) -> LLM -> End
pub struct SimpleRouter;

impl Router for SimpleRouter {
    fn next(&self, state: &GraphState, current: NodeType) -> NextNode {
        match current {
            NodeType::LLM => {
                if state.has_pending_tool_calls() {
                    NextNode::Tool
                } else {
                    NextNode::End
                }
            }
            NodeType::Tool => NextNode::LLM,
        }
    }
}
