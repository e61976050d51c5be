use anyhow::{anyhow, Context, Result};
use hrdesk_graph::LLMConfig;
use hrdesk_llm::{ChatClient, ChatOptions, ChatRequest, Message};
use hrdesk_mcp::McpClient;

pub const DEFAULT_QUERY: &str = "What are the data privacy policies of the company?";

/// Spawn the code-of-conduct server and return the text of its first resource
pub async fn fetch_resource_content(command: &str, args: &[String]) -> Result<String> {
    tracing::info!(%command, "starting code-of-conduct MCP server");
    let client = McpClient::new_stdio("code-of-conduct", command, args.to_vec())
        .await
        .with_context(|| format!("Failed to start code-of-conduct server '{}'", command))?;

    let content = first_resource_text(&client).await;
    if let Err(e) = client.close().await {
        tracing::warn!(error = %e, "failed to close MCP session");
    }
    content
}

pub async fn first_resource_text(client: &McpClient) -> Result<String> {
    let resources = client.list_resources().await?;
    for resource in &resources {
        tracing::info!(
            uri = %resource.uri,
            name = %resource.name,
            mime_type = resource.mime_type.as_deref().unwrap_or(""),
            "resource available"
        );
    }

    let first = resources
        .first()
        .ok_or_else(|| anyhow!("Server '{}' exposes no resources", client.name()))?;

    let contents = client.read_resource(&first.uri).await?;
    Ok(contents
        .into_iter()
        .map(|c| c.text)
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn context_prompt(context: &str, query: &str) -> String {
    format!(
        "Answer the query based on the following context provided.\n Context: {} \n query: {}",
        context, query
    )
}

/// Single tool-less completion grounded on `context`
pub async fn answer_with_context(
    client: &dyn ChatClient,
    llm_config: &LLMConfig,
    context: &str,
    query: &str,
) -> Result<String> {
    let mut options = ChatOptions::new();
    if let Some(temp) = llm_config.temperature {
        options = options.temperature(temp);
    }
    if let Some(max_tokens) = llm_config.max_tokens {
        options = options.max_tokens(max_tokens);
    }

    let request = ChatRequest::new(
        llm_config.model.clone(),
        vec![Message::human(context_prompt(context, query))],
    )
    .with_options(options);

    let response = client.chat(request).await?;
    response
        .content
        .ok_or_else(|| anyhow!("Model returned no content"))
}
