use hrdesk_mcp::{McpClient, ToolResponse};
use hrdesk_servers::{transport, TimeOffDatastore, TimeoffServer};
use rmcp::ServiceExt;
use serde_json::{json, Map, Value};
use std::sync::Arc;

async fn connect(store: Arc<TimeOffDatastore>) -> McpClient {
    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    tokio::spawn(async move {
        let running = TimeoffServer::new(store).serve(server_io).await?;
        running.waiting().await?;
        anyhow::Ok(())
    });
    McpClient::connect("timeoff", client_io).await.unwrap()
}

fn text(responses: Vec<ToolResponse>) -> String {
    ToolResponse::join_responses(&responses)
}

#[tokio::test]
async fn test_lists_both_tools() {
    let client = connect(Arc::new(TimeOffDatastore::new())).await;

    let mut names: Vec<String> = client.list_tools().await.unwrap().into_iter().map(|t| t.name).collect();
    names.sort();
    assert_eq!(names, vec!["get_timeoff_balance", "request_timeoff"]);

    let tools = client.list_tools().await.unwrap();
    let request = tools.iter().find(|t| t.name == "request_timeoff").unwrap();
    let properties = request.input_schema["properties"].as_object().unwrap();
    assert!(properties.contains_key("employee_name"));
    assert!(properties.contains_key("start_day"));
    assert!(properties.contains_key("days"));

    assert_eq!(client.list_prompts().await.unwrap(), vec!["get_llm_prompt"]);
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_alice_balance_request_balance() {
    let store = Arc::new(TimeOffDatastore::new());
    let client = connect(store.clone()).await;

    let balance = client
        .call_tool("get_timeoff_balance", json!({ "employee_name": "Alice" }))
        .await
        .unwrap();
    assert_eq!(text(balance), "20");

    let filed = client
        .call_tool(
            "request_timeoff",
            json!({ "employee_name": "Alice,", "start_day": "2025-05-05", "days": 5 }),
        )
        .await
        .unwrap();
    assert_eq!(
        text(filed),
        "Time off request filed for Alice: 5 day(s) starting 2025-05-05. Remaining balance: 15"
    );

    let balance = client
        .call_tool("get_timeoff_balance", json!({ "employee_name": "Alice" }))
        .await
        .unwrap();
    assert_eq!(text(balance), "15");
    assert_eq!(store.requests("Alice").await.unwrap().len(), 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_bad_input_is_a_readable_tool_result() {
    let client = connect(Arc::new(TimeOffDatastore::new())).await;

    let unknown = client
        .call_tool("get_timeoff_balance", json!({ "employee_name": "Zed." }))
        .await
        .unwrap();
    assert_eq!(text(unknown), "Employee 'Zed' not found");

    let empty = client
        .call_tool("get_timeoff_balance", json!({ "employee_name": "" }))
        .await
        .unwrap();
    assert_eq!(text(empty), "Invalid employee name");

    let too_many = client
        .call_tool(
            "request_timeoff",
            json!({ "employee_name": "Bob", "start_day": "2025-06-01", "days": 16 }),
        )
        .await
        .unwrap();
    assert_eq!(text(too_many), "Insufficient balance: requested 16 day(s), 15 available");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_missing_arguments_are_rejected_by_the_protocol() {
    let client = connect(Arc::new(TimeOffDatastore::new())).await;

    let result = client
        .call_tool("request_timeoff", json!({ "employee_name": "Bob" }))
        .await;
    assert!(result.is_err());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_prompt_renders_one_user_message() {
    let client = connect(Arc::new(TimeOffDatastore::new())).await;

    let mut args = Map::new();
    args.insert("user".to_string(), Value::from("Alice"));
    args.insert("prompt".to_string(), Value::from("What is my time off balance?"));

    let messages = client.get_prompt("get_llm_prompt", args).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role(), "user");

    let text = messages[0].text().unwrap();
    assert!(text.contains("Action: What is my time off balance?"));
    assert!(text.contains("in terms of the user Alice."));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_streamable_http_sessions_share_the_ledger() {
    let store = Arc::new(TimeOffDatastore::new());
    let shared = store.clone();
    let router = transport::streamable_http_router(
        move || Ok(TimeoffServer::new(shared.clone())),
        "/",
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    tokio::spawn(async move { axum::serve(listener, router).await });

    let first = McpClient::new_http("timeoff", url.clone()).await.unwrap();
    let filed = first
        .call_tool(
            "request_timeoff",
            json!({ "employee_name": "Charlie", "start_day": "2025-09-01", "days": 4 }),
        )
        .await
        .unwrap();
    assert!(text(filed).ends_with("Remaining balance: 6"));
    first.close().await.unwrap();

    let second = McpClient::new_http("timeoff", url).await.unwrap();
    let balance = second
        .call_tool("get_timeoff_balance", json!({ "employee_name": "Charlie" }))
        .await
        .unwrap();
    assert_eq!(text(balance), "6");
    second.close().await.unwrap();

    assert_eq!(store.get_timeoff_balance("Charlie").await, Some(6));
}

#[tokio::test]
async fn test_streamable_http_on_relative_mount_path() {
    let store = Arc::new(TimeOffDatastore::new());
    let router = transport::streamable_http_router(
        move || Ok(TimeoffServer::new(store.clone())),
        "mcp",
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/mcp", listener.local_addr().unwrap());
    tokio::spawn(async move { axum::serve(listener, router).await });

    let client = McpClient::new_http("timeoff", url).await.unwrap();
    let balance = client
        .call_tool("get_timeoff_balance", json!({ "employee_name": "Bob" }))
        .await
        .unwrap();
    assert_eq!(text(balance), "15");
    client.close().await.unwrap();
}
