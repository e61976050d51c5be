pub mod client;
pub mod error;
pub mod executor;

pub use client::{McpClient, ResourceInfo, ResourceText, ToolInfo, ToolResponse};
pub use error::McpClientError;
pub use executor::McpToolExecutor;
