use anyhow::Context;
use clap::Parser;
use hrdesk_agents::{report_error, timeoff, AgentRuntime, AgentsConfig};

#[derive(Parser)]
#[command(name = "timeoff-agent")]
#[command(version, about = "Answer time-off questions through the time-off MCP server")]
struct Cli {
    /// Employee the agent acts for
    #[arg(short, long, default_value = timeoff::DEMO_USER)]
    user: String,

    /// Time-off server URL, overrides mcp.timeoff_url
    #[arg(long)]
    url: Option<String>,

    /// Request to answer; runs the three-step demo when omitted
    #[arg(trailing_var_arg = true)]
    prompt: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AgentsConfig::load().context("Failed to load configuration")?;
    hrdesk_config::init_logging(&config.logging);

    let runtime = AgentRuntime::from_config(&config)?;
    let url = cli.url.unwrap_or_else(|| config.mcp.timeoff_url.clone());

    let prompts: Vec<String> = if cli.prompt.is_empty() {
        timeoff::DEMO_PROMPTS.iter().map(|p| p.to_string()).collect()
    } else {
        vec![cli.prompt.join(" ")]
    };

    for prompt in prompts {
        let response = match timeoff::run_timeoff_agent(&runtime, &url, &cli.user, &prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                report_error(&e);
                "Error".to_string()
            }
        };
        println!("\nResponse: {}", response);
    }

    Ok(())
}
