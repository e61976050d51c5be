use super::datastore::TimeOffDatastore;
use crate::sanitize::clean_employee_name;
use chrono::NaiveDate;
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

pub const SERVER_NAME: &str = "Timeoff-MCP-Server";

const INVALID_NAME: &str = "Invalid employee name";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BalanceRequest {
    #[schemars(description = "Name of the employee, e.g. Alice")]
    pub employee_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TimeoffRequestArgs {
    #[schemars(description = "Name of the employee, e.g. Alice")]
    pub employee_name: String,
    #[schemars(description = "First day off, formatted YYYY-MM-DD")]
    pub start_day: String,
    #[schemars(description = "Number of days requested")]
    pub days: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TimeoffPromptArgs {
    #[schemars(description = "Employee on whose behalf the action runs")]
    pub user: String,
    #[schemars(description = "Action to execute, e.g. 'What is my time off balance?'")]
    pub prompt: String,
}

/// MCP surface over [`TimeOffDatastore`]
///
/// Tool failures are returned as text results so the calling agent can read
/// and react to them.
#[derive(Clone)]
pub struct TimeoffServer {
    store: Arc<TimeOffDatastore>,
    tool_router: ToolRouter<TimeoffServer>,
    prompt_router: PromptRouter<TimeoffServer>,
}

impl TimeoffServer {
    pub fn new(store: Arc<TimeOffDatastore>) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    pub async fn balance_message(&self, employee_name: &str) -> String {
        let Some(name) = clean_employee_name(employee_name) else {
            return INVALID_NAME.to_string();
        };

        match self.store.get_timeoff_balance(&name).await {
            Some(balance) => balance.to_string(),
            None => format!("Employee '{}' not found", name),
        }
    }

    pub async fn request_message(&self, employee_name: &str, start_day: &str, days: i64) -> String {
        let Some(name) = clean_employee_name(employee_name) else {
            return INVALID_NAME.to_string();
        };

        let Ok(date) = NaiveDate::parse_from_str(start_day.trim(), "%Y-%m-%d") else {
            return format!("Invalid start day '{}', expected YYYY-MM-DD", start_day);
        };

        match self.store.add_timeoff_request(&name, date, days).await {
            Ok(remaining) => format!(
                "Time off request filed for {}: {} day(s) starting {}. Remaining balance: {}",
                name, days, date, remaining
            ),
            Err(e) => {
                tracing::warn!(employee = %name, error = %e, "time off request rejected");
                e.to_string()
            }
        }
    }
}

pub fn timeoff_prompt_text(user: &str, prompt: &str) -> String {
    format!(
        "You are a helpful timeoff assistant.\n\
         Execute the action requested in the query using the tools provided to you.\n\
         Action: {prompt}\n\
         The tasks need to be executed in terms of the user {user}."
    )
}

#[tool_router]
impl TimeoffServer {
    #[tool(description = "Get the timeoff balance for the employee, given their name")]
    async fn get_timeoff_balance(
        &self,
        Parameters(BalanceRequest { employee_name }): Parameters<BalanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(%employee_name, "get_timeoff_balance");
        let text = self.balance_message(&employee_name).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "File a timeoff request for the employee, given their name, start day (YYYY-MM-DD) and number of days"
    )]
    async fn request_timeoff(
        &self,
        Parameters(TimeoffRequestArgs {
            employee_name,
            start_day,
            days,
        }): Parameters<TimeoffRequestArgs>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(%employee_name, %start_day, days, "request_timeoff");
        let text = self.request_message(&employee_name, &start_day, days).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[prompt_router]
impl TimeoffServer {
    #[prompt(
        name = "get_llm_prompt",
        description = "Generates a prompt for the LLM to answer the query on behalf of a user"
    )]
    async fn get_llm_prompt(
        &self,
        Parameters(TimeoffPromptArgs { user, prompt }): Parameters<TimeoffPromptArgs>,
    ) -> Result<GetPromptResult, McpError> {
        tracing::info!(%user, "generating timeoff prompt");
        Ok(GetPromptResult {
            description: None,
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                timeoff_prompt_text(&user, &prompt),
            )],
        })
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for TimeoffServer {
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
            instructions: Some(
                "Employee time-off ledger: look up balances and file time-off requests.".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> TimeoffServer {
        TimeoffServer::new(Arc::new(TimeOffDatastore::new()))
    }

    #[tokio::test]
    async fn test_balance_sanitizes_name() {
        let server = server();
        assert_eq!(server.balance_message("Alice,").await, "20");
        assert_eq!(server.balance_message("\"Bob\"").await, "15");
    }

    #[tokio::test]
    async fn test_balance_invalid_and_unknown_names() {
        let server = server();
        assert_eq!(server.balance_message("").await, "Invalid employee name");
        assert_eq!(server.balance_message("...").await, "Invalid employee name");
        assert_eq!(server.balance_message("Dave!").await, "Employee 'Dave' not found");
    }

    #[tokio::test]
    async fn test_request_files_and_reports_remaining() {
        let server = server();
        let text = server.request_message("Alice", "2025-05-05", 5).await;
        assert_eq!(
            text,
            "Time off request filed for Alice: 5 day(s) starting 2025-05-05. Remaining balance: 15"
        );
        assert_eq!(server.balance_message("Alice").await, "15");
    }

    #[tokio::test]
    async fn test_request_rejections_are_text() {
        let server = server();
        assert_eq!(
            server.request_message("Alice", "05/05/2025", 1).await,
            "Invalid start day '05/05/2025', expected YYYY-MM-DD"
        );
        assert_eq!(
            server.request_message("Charlie", "2025-05-05", 30).await,
            "Insufficient balance: requested 30 day(s), 10 available"
        );
        assert_eq!(
            server.request_message("Charlie", "2025-05-05", -2).await,
            "Number of days must be positive, got -2"
        );
        assert_eq!(server.balance_message("Charlie").await, "10");
    }

    #[test]
    fn test_prompt_text() {
        let text = timeoff_prompt_text("Alice", "What is my time off balance?");
        assert!(text.starts_with("You are a helpful timeoff assistant.\n"));
        assert!(text.contains("Action: What is my time off balance?\n"));
        assert!(text.ends_with("in terms of the user Alice."));
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, SERVER_NAME);
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
    }
}
