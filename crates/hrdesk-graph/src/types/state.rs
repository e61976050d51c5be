use crate::types::config::LLMConfig;
use hrdesk_llm::{Message, ToolCall};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct GraphState {
    pub run_id: String,
    pub messages: Vec<Message>,
    pub llm_config: LLMConfig,
}

impl GraphState {
    pub fn new(run_id: String, messages: Vec<Message>, llm_config: LLMConfig) -> Self {
        Self {
            run_id,
            messages,
            llm_config,
        }
    }

    pub fn from_input(input: GraphInput) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), input.messages, input.llm_config)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn has_pending_tool_calls(&self) -> bool {
        !self.get_pending_tool_calls().is_empty()
    }

    pub fn get_pending_tool_calls(&self) -> Vec<ToolCall> {
        self.last_message()
            .map(|message| message.tool_calls().to_vec())
            .unwrap_or_default()
    }

    pub fn add_tool_result(&mut self, tool_call_id: String, result: String) {
        self.messages.push(Message::tool_result(tool_call_id, result));
    }

    /// Text of the last assistant message
    pub fn final_answer(&self) -> Option<String> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::AI { .. } => m.text(),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInput {
    pub messages: Vec<Message>,
    pub llm_config: LLMConfig,
}

impl GraphInput {
    pub fn new(messages: Vec<Message>, llm_config: LLMConfig) -> Self {
        Self {
            messages,
            llm_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_answer_skips_tool_messages() {
        let mut state = GraphState::new("run".to_string(), vec![Message::human("hi")], LLMConfig::default());
        assert_eq!(state.final_answer(), None);

        state.add_message(Message::ai("You have 20 days."));
        state.add_tool_result("call_1".to_string(), "20".to_string());
        assert_eq!(state.final_answer().as_deref(), Some("You have 20 days."));
    }

    #[test]
    fn test_pending_tool_calls_only_from_last_message() {
        let mut state = GraphState::new("run".to_string(), vec![], LLMConfig::default());
        state.add_message(Message::ai_with_tools(None, vec![ToolCall::new("c1", "add", "{}")]));
        assert_eq!(state.get_pending_tool_calls().len(), 1);

        state.add_tool_result("c1".to_string(), "3".to_string());
        assert!(!state.has_pending_tool_calls());
    }
}
