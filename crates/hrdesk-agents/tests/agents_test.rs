use anyhow::Result;
use async_trait::async_trait;
use hrdesk_agents::{code_of_conduct, hr_policy, timeoff, AgentRuntime};
use hrdesk_graph::{GraphConfig, LLMConfig};
use hrdesk_llm::{ChatClient, ChatRequest, ChatResponse, Message, OpenAIClient, ToolCall};
use hrdesk_mcp::McpClient;
use hrdesk_servers::code_of_conduct::CodeOfConductServer;
use hrdesk_servers::hr_policy::HrPolicyServer;
use hrdesk_servers::{TimeOffDatastore, TimeoffServer};
use rmcp::{RoleServer, Service, ServiceExt};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses and records every request
struct ScriptedClient {
    responses: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    fn new(responses: Vec<ChatResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}

fn answer(content: &str) -> ChatResponse {
    ChatResponse {
        content: Some(content.to_string()),
        tool_calls: None,
        usage: None,
        finish_reason: Some("stop".to_string()),
        raw: Value::Null,
    }
}

fn call(id: &str, name: &str, arguments: Value) -> ChatResponse {
    ChatResponse {
        content: None,
        tool_calls: Some(vec![ToolCall::new(id, name, arguments.to_string())]),
        usage: None,
        finish_reason: Some("tool_calls".to_string()),
        raw: Value::Null,
    }
}

fn runtime(client: Arc<ScriptedClient>) -> AgentRuntime {
    AgentRuntime::new(client, LLMConfig::default(), GraphConfig::default())
}

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
async fn test_timeoff_agent_files_request_through_mcp() {
    let store = Arc::new(TimeOffDatastore::new());
    let llm = ScriptedClient::new(vec![
        call(
            "call_1",
            "request_timeoff",
            json!({ "employee_name": "Alice", "start_day": "2025-05-05", "days": 5 }),
        ),
        answer("Your request is filed. You have 15 days left."),
    ]);

    let client = connect("timeoff", TimeoffServer::new(store.clone())).await;
    let response = timeoff::run_timeoff_session(
        &runtime(llm.clone()),
        client,
        "Alice",
        timeoff::DEMO_PROMPTS[1],
    )
    .await
    .unwrap();

    assert_eq!(response, "Your request is filed. You have 15 days left.");
    assert_eq!(store.get_timeoff_balance("Alice").await, Some(15));

    let requests = llm.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);

    // First turn: the server prompt plus both tools
    let prompt = requests[0].messages[0].text().unwrap();
    assert!(prompt.contains("Action: File a time off request for 5 days starting from 2025-05-05"));
    assert!(prompt.contains("in terms of the user Alice."));
    assert_eq!(requests[0].options.tools.as_ref().map(Vec::len), Some(2));

    // Second turn carries the tool result
    match requests[1].messages.last().unwrap() {
        Message::Tool { tool_call_id, content } => {
            assert_eq!(tool_call_id, "call_1");
            assert_eq!(
                content.to_plain_text(),
                "Time off request filed for Alice: 5 day(s) starting 2025-05-05. Remaining balance: 15"
            );
        }
        other => panic!("expected tool result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeoff_agent_reads_balance() {
    let llm = ScriptedClient::new(vec![
        call("call_1", "get_timeoff_balance", json!({ "employee_name": "Alice" })),
        answer("You have 20 days of time off."),
    ]);

    let client = connect("timeoff", TimeoffServer::new(Arc::new(TimeOffDatastore::new()))).await;
    let response = timeoff::run_timeoff_session(&runtime(llm.clone()), client, "Alice", timeoff::DEMO_PROMPTS[0])
        .await
        .unwrap();

    assert_eq!(response, "You have 20 days of time off.");
    let requests = llm.requests.lock().unwrap();
    assert_eq!(requests[1].messages.last().unwrap().text().as_deref(), Some("20"));
}

#[tokio::test]
async fn test_llm_failure_is_an_error() {
    let llm = ScriptedClient::new(vec![]);

    let client = connect("timeoff", TimeoffServer::new(Arc::new(TimeOffDatastore::new()))).await;
    let err = timeoff::run_timeoff_session(&runtime(llm), client, "Alice", "hi")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("script exhausted"));
}

#[tokio::test]
async fn test_hr_policy_agent_uses_policy_tool() {
    let llm = ScriptedClient::new(vec![
        call("call_1", "query_policies", json!({ "query": "remote work" })),
        answer("Up to three remote days per week."),
    ]);

    let client = connect("hr", HrPolicyServer::new("Remote work: up to three days per week.")).await;
    let response = hr_policy::run_hr_policy_session(&runtime(llm.clone()), client, hr_policy::DEFAULT_QUERY)
        .await
        .unwrap();

    assert_eq!(response, "Up to three remote days per week.");
    let requests = llm.requests.lock().unwrap();
    assert!(requests[0].messages[0]
        .text()
        .unwrap()
        .ends_with(hr_policy::DEFAULT_QUERY));
    assert_eq!(
        requests[1].messages.last().unwrap().text().as_deref(),
        Some("Remote work: up to three days per week.")
    );
}

#[tokio::test]
async fn test_code_of_conduct_answer_is_grounded_on_resource() {
    let client = connect("coc", CodeOfConductServer::new("Never copy customer data to personal devices.")).await;
    let context = code_of_conduct::first_resource_text(&client).await.unwrap();
    client.close().await.unwrap();
    assert_eq!(context, "Never copy customer data to personal devices.");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::Regex("Never copy customer data".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 1,
                "model": "gpt-4.1",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "Keep customer data on company devices." },
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let llm = OpenAIClient::new("sk-test").unwrap().with_base_url(server.url());
    let answer = code_of_conduct::answer_with_context(
        &llm,
        &LLMConfig::default(),
        &context,
        code_of_conduct::DEFAULT_QUERY,
    )
    .await
    .unwrap();

    assert_eq!(answer, "Keep customer data on company devices.");
    mock.assert_async().await;
}

#[test]
fn test_context_prompt_layout() {
    assert_eq!(
        code_of_conduct::context_prompt("CTX", "Q?"),
        "Answer the query based on the following context provided.\n Context: CTX \n query: Q?"
    );
}
