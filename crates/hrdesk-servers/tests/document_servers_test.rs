use hrdesk_mcp::{McpClient, ToolResponse};
use hrdesk_servers::code_of_conduct::{CodeOfConductServer, RESOURCE_URI};
use hrdesk_servers::demo::DemoServer;
use hrdesk_servers::hr_policy::HrPolicyServer;
use rmcp::{RoleServer, Service, ServiceExt};
use serde_json::{json, Map, Value};

async fn connect<S>(name: &str, server: S) -> McpClient
where
    S: Service<RoleServer> + Send + 'static,
{
    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    tokio::spawn(async move {
        let running = server.serve(server_io).await?;
        running.waiting().await?;
        anyhow::Ok(())
    });
    McpClient::connect(name, client_io).await.unwrap()
}

#[tokio::test]
async fn test_hr_policy_tool_returns_document() {
    let client = connect("hr", HrPolicyServer::new("Remote work: three days per week.")).await;

    let tools = client.list_tools().await.unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "query_policies");

    let responses = client
        .call_tool("query_policies", json!({ "query": "remote work" }))
        .await
        .unwrap();
    assert_eq!(
        ToolResponse::join_responses(&responses),
        "Remote work: three days per week."
    );

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_hr_policy_prompt() {
    let client = connect("hr", HrPolicyServer::new("policy")).await;

    let mut args = Map::new();
    args.insert("query".to_string(), Value::from("What is the policy on remote work?"));
    let messages = client.get_prompt("get_llm_prompt", args).await.unwrap();

    assert_eq!(messages.len(), 1);
    assert!(messages[0].text().unwrap().ends_with("What is the policy on remote work?"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_code_of_conduct_resource() {
    let client = connect("coc", CodeOfConductServer::new("Protect customer data.")).await;

    let resources = client.list_resources().await.unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].uri, RESOURCE_URI);
    assert_eq!(resources[0].name, "code_of_conduct");
    assert_eq!(resources[0].mime_type.as_deref(), Some("text/plain"));

    let contents = client.read_resource(RESOURCE_URI).await.unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].text, "Protect customer data.");

    assert!(client.read_resource("docs://unknown").await.is_err());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_demo_add() {
    let client = connect("demo", DemoServer::new()).await;

    let sum = client.call_tool("add", json!({ "a": 2, "b": 40 })).await.unwrap();
    assert_eq!(ToolResponse::join_responses(&sum), "42");

    let saturated = client
        .call_tool("add", json!({ "a": i64::MAX, "b": 1 }))
        .await
        .unwrap();
    assert_eq!(ToolResponse::join_responses(&saturated), i64::MAX.to_string());

    client.close().await.unwrap();
}
