use anyhow::Context;
use clap::Parser;
use hrdesk_agents::{config::server_command, hr_policy, report_error, AgentRuntime, AgentsConfig};

#[derive(Parser)]
#[command(name = "hr-policy-agent")]
#[command(version, about = "Answer HR policy questions through the HR policy MCP server")]
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
    let command = server_command(config.mcp.hr_policy_command.as_deref(), "hr-policy-server");
    let query = if cli.query.is_empty() {
        hr_policy::DEFAULT_QUERY.to_string()
    } else {
        cli.query.join(" ")
    };

    let response =
        match hr_policy::run_hr_policy_agent(&runtime, &command, &config.mcp.hr_policy_args, &query).await {
            Ok(answer) => answer,
            Err(e) => {
                report_error(&e);
                "Error".to_string()
            }
        };
    println!("\nResponse: {}", response);

    Ok(())
}
