use rmcp::{
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router, schemars,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde::Deserialize;
use std::sync::Arc;

pub const SERVER_NAME: &str = "HR-Policies-MCP-Server";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PolicyQuery {
    #[schemars(description = "Question about the HR policies")]
    pub query: String,
}

/// Answers HR policy questions from a single policy document
#[derive(Clone)]
pub struct HrPolicyServer {
    policies: Arc<str>,
    tool_router: ToolRouter<HrPolicyServer>,
    prompt_router: PromptRouter<HrPolicyServer>,
}

impl HrPolicyServer {
    pub fn new(policies: impl Into<Arc<str>>) -> Self {
        Self {
            policies: policies.into(),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }
}

pub fn hr_policy_prompt_text(query: &str) -> String {
    format!(
        "You are a helpful HR assistant.\n\
         Answer the HR policy question below using the tools provided to you.\n\
         Query: {query}"
    )
}

#[tool_router]
impl HrPolicyServer {
    #[tool(description = "Query the company HR policies; returns the policy document to answer from")]
    async fn query_policies(
        &self,
        Parameters(PolicyQuery { query }): Parameters<PolicyQuery>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(%query, "query_policies");
        Ok(CallToolResult::success(vec![Content::text(
            self.policies.to_string(),
        )]))
    }
}

#[prompt_router]
impl HrPolicyServer {
    #[prompt(
        name = "get_llm_prompt",
        description = "Generates a prompt for the LLM to answer an HR policy query"
    )]
    async fn get_llm_prompt(
        &self,
        Parameters(PolicyQuery { query }): Parameters<PolicyQuery>,
    ) -> Result<GetPromptResult, McpError> {
        tracing::info!(%query, "generating HR policy prompt");
        Ok(GetPromptResult {
            description: None,
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                hr_policy_prompt_text(&query),
            )],
        })
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for HrPolicyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some("Look up the company HR policies.".to_string()),
        }
    }
}
