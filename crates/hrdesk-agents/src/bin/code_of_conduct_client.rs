use anyhow::Context;
use clap::Parser;
use hrdesk_agents::{code_of_conduct, config::server_command, AgentRuntime, AgentsConfig};

#[derive(Parser)]
#[command(name = "code-of-conduct-client")]
#[command(version, about = "Answer a question from the code-of-conduct MCP resource")]
struct Cli {
    /// Question to answer
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AgentsConfig::load().context("Failed to load configuration")?;
    hrdesk_config::init_logging(&config.logging);

    let runtime = AgentRuntime::from_config(&config)?;
    let command = server_command(
        config.mcp.code_of_conduct_command.as_deref(),
        "code-of-conduct-server",
    );

    let context =
        code_of_conduct::fetch_resource_content(&command, &config.mcp.code_of_conduct_args).await?;
    tracing::info!(bytes = context.len(), "context retrieved");

    let query = if cli.query.is_empty() {
        code_of_conduct::DEFAULT_QUERY.to_string()
    } else {
        cli.query.join(" ")
    };
    println!("\nUser query: {}", query);

    let answer = code_of_conduct::answer_with_context(
        runtime.llm_client().as_ref(),
        runtime.llm_config(),
        &context,
        &query,
    )
    .await?;
    println!("\nAnswer: {}", answer);

    Ok(())
}
