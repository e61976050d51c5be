//! HR agents built on the hrdesk MCP servers.
//!
//! - [`timeoff`]: ReAct agent over the streamable-HTTP time-off server
//! - [`hr_policy`]: ReAct agent over the stdio HR policy server
//! - [`code_of_conduct`]: resource retrieval plus a single grounded completion

pub mod code_of_conduct;
pub mod config;
pub mod hr_policy;
pub mod runtime;
pub mod timeoff;

pub use config::AgentsConfig;
pub use runtime::AgentRuntime;

/// Log an error with its full cause chain
pub fn report_error(error: &anyhow::Error) {
    tracing::error!(error = %format!("{:#}", error), "agent failed");
    for (depth, cause) in error.chain().skip(1).enumerate() {
        tracing::debug!(depth, cause = %cause, "caused by");
    }
}
