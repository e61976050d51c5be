use hrdesk_mcp::{McpClient, McpToolExecutor, ToolResponse};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct EchoRequest {
    text: String,
}

#[derive(Clone)]
struct EchoServer {
    tool_router: ToolRouter<EchoServer>,
}

#[tool_router]
impl EchoServer {
    fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Echo the input text")]
    async fn echo(
        &self,
        Parameters(EchoRequest { text }): Parameters<EchoRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Always reports a failure")]
    async fn fail(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::error(vec![Content::text("boom")]))
    }
}

#[tool_handler]
impl ServerHandler for EchoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

async fn connect_echo(name: &str) -> McpClient {
    let (server_io, client_io) = tokio::io::duplex(4096);
    tokio::spawn(async move {
        let running = EchoServer::new().serve(server_io).await?;
        running.waiting().await?;
        anyhow::Ok(())
    });
    McpClient::connect(name, client_io).await.unwrap()
}

#[tokio::test]
async fn test_list_and_call_tools() {
    let client = connect_echo("echo").await;

    let mut names: Vec<String> = client.list_tools().await.unwrap().into_iter().map(|t| t.name).collect();
    names.sort();
    assert_eq!(names, vec!["echo", "fail"]);

    let responses = client.call_tool("echo", json!({ "text": "hello" })).await.unwrap();
    assert_eq!(responses, vec![ToolResponse::Text { text: "hello".to_string() }]);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_tool_error_result_becomes_err() {
    let client = connect_echo("echo").await;

    let err = client.call_tool("fail", json!({})).await.unwrap_err();
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_non_object_arguments_rejected() {
    let client = connect_echo("echo").await;

    let err = client.call_tool("echo", json!([1, 2])).await.unwrap_err();
    assert!(err.to_string().contains("JSON object"));
}

#[tokio::test]
async fn test_executor_routes_by_tool_name() {
    let executor = McpToolExecutor::new();
    let tools = executor.add_server(connect_echo("echo").await).await.unwrap();
    assert_eq!(tools.len(), 2);

    let llm_tools = executor.get_llm_tools().await.unwrap();
    assert_eq!(llm_tools.len(), 2);

    let responses = executor.execute_tool("echo", json!({ "text": "routed" })).await.unwrap();
    assert_eq!(ToolResponse::join_responses(&responses), "routed");

    let duplicate = executor.add_server(connect_echo("echo").await).await;
    assert!(duplicate.is_err());

    executor.shutdown().await;
    assert!(executor.execute_tool("echo", json!({})).await.is_err());
}
