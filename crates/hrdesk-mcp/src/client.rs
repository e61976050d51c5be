use anyhow::{Context, Result};
use hrdesk_llm::Message;
use rmcp::model::{
    CallToolRequestParam, GetPromptRequestParam, PromptMessageContent, PromptMessageRole,
    RawContent, ReadResourceRequestParam, ResourceContents,
};
use rmcp::service::RunningService;
use rmcp::transport::{
    ConfigureCommandExt, IntoTransport, StreamableHttpClientTransport, TokioChildProcess,
};
use rmcp::{RoleClient, ServiceExt};
use serde_json::{Map, Value};
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::McpClientError;

/// Session with a single MCP server
///
/// Supports stdio (spawned child process) and streamable HTTP transports.
pub struct McpClient {
    server_name: String,
    service: RunningService<RoleClient, ()>,
}

impl McpClient {
    /// Spawn a local MCP server and talk to it over stdin/stdout
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn demo() -> anyhow::Result<()> {
    /// let client = hrdesk_mcp::McpClient::new_stdio(
    ///     "hr-policy",
    ///     "hr-policy-server",
    ///     Vec::<String>::new(),
    /// ).await?;
    /// # Ok(()) }
    /// ```
    pub async fn new_stdio(
        server_name: impl Into<String>,
        command: impl Into<String>,
        args: Vec<impl Into<String>>,
    ) -> Result<Self> {
        let command = command.into();
        let args: Vec<String> = args.into_iter().map(|a| a.into()).collect();

        let cmd = Command::new(&command).configure(|c| {
            for arg in &args {
                c.arg(arg);
            }
            c.stdin(Stdio::piped());
            c.stdout(Stdio::piped());
            c.stderr(Stdio::inherit());
        });

        let transport = TokioChildProcess::new(cmd)
            .with_context(|| format!("Failed to spawn MCP server '{}'", command))?;
        Self::connect(server_name, transport).await
    }

    /// Open a streamable-HTTP session, e.g. `http://localhost:8000/`
    pub async fn new_http(server_name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let transport = StreamableHttpClientTransport::from_uri(url.clone());
        Self::connect(server_name, transport)
            .await
            .with_context(|| format!("Failed to initialize MCP session with {}", url))
    }

    /// Run the MCP handshake over any client transport
    pub async fn connect<T, E, A>(server_name: impl Into<String>, transport: T) -> Result<Self>
    where
        T: IntoTransport<RoleClient, E, A> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let server_name = server_name.into();
        let service = ().serve(transport).await?;

        if let Some(info) = service.peer_info() {
            tracing::info!(
                server = %server_name,
                remote = %info.server_info.name,
                version = %info.server_info.version,
                "MCP session initialized"
            );
        }

        Ok(Self {
            server_name,
            service,
        })
    }

    pub fn name(&self) -> &str {
        &self.server_name
    }

    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
        let tools = self.service.list_all_tools().await?;

        Ok(tools
            .into_iter()
            .map(|tool| ToolInfo {
                name: tool.name.to_string(),
                description: tool.description.as_deref().map(str::to_string),
                input_schema: Value::Object((*tool.input_schema).clone()),
            })
            .collect())
    }

    /// Tool catalogue in the shape the chat API expects
    pub async fn get_llm_tools(&self) -> Result<Vec<hrdesk_llm::Tool>> {
        Ok(self
            .list_tools()
            .await?
            .into_iter()
            .map(ToolInfo::into_llm_tool)
            .collect())
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Vec<ToolResponse>> {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => return Err(McpClientError::InvalidArguments(other.to_string()).into()),
        };

        tracing::debug!(server = %self.server_name, tool = %name, "calling MCP tool");

        let result = self
            .service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments,
            })
            .await?;

        let responses: Vec<ToolResponse> = result
            .content
            .into_iter()
            .filter_map(|content| ToolResponse::from_raw(content.raw))
            .collect();

        if result.is_error.unwrap_or(false) {
            return Err(McpClientError::ToolFailed {
                tool: name.to_string(),
                message: ToolResponse::join_responses(&responses),
            }
            .into());
        }

        Ok(responses)
    }

    /// Render a server prompt into chat messages
    pub async fn get_prompt(&self, name: &str, arguments: Map<String, Value>) -> Result<Vec<Message>> {
        let result = self
            .service
            .get_prompt(GetPromptRequestParam {
                name: name.to_string(),
                arguments: Some(arguments),
            })
            .await?;

        Ok(result
            .messages
            .into_iter()
            .filter_map(|message| match message.content {
                PromptMessageContent::Text { text } => Some(match message.role {
                    PromptMessageRole::User => Message::human(text),
                    PromptMessageRole::Assistant => Message::ai(text),
                }),
                _ => None,
            })
            .collect())
    }

    pub async fn list_prompts(&self) -> Result<Vec<String>> {
        let prompts = self.service.list_all_prompts().await?;
        Ok(prompts.into_iter().map(|p| p.name).collect())
    }

    pub async fn list_resources(&self) -> Result<Vec<ResourceInfo>> {
        let resources = self.service.list_all_resources().await?;

        Ok(resources
            .into_iter()
            .map(|resource| ResourceInfo {
                uri: resource.raw.uri,
                name: resource.raw.name,
                description: resource.raw.description,
                mime_type: resource.raw.mime_type,
            })
            .collect())
    }

    pub async fn read_resource(&self, uri: &str) -> Result<Vec<ResourceText>> {
        let result = self
            .service
            .read_resource(ReadResourceRequestParam {
                uri: uri.to_string(),
            })
            .await?;

        Ok(result
            .contents
            .into_iter()
            .filter_map(|contents| match contents {
                ResourceContents::TextResourceContents { uri, mime_type, text, .. } => {
                    Some(ResourceText { uri, mime_type, text })
                }
                ResourceContents::BlobResourceContents { uri, .. } => {
                    tracing::warn!(%uri, "skipping binary resource contents");
                    None
                }
            })
            .collect())
    }

    /// End the session; for stdio servers this also stops the child process
    pub async fn close(self) -> Result<()> {
        self.service.cancel().await?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolInfo {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

impl ToolInfo {
    pub fn into_llm_tool(self) -> hrdesk_llm::Tool {
        hrdesk_llm::Tool::function(self.name, self.description, self.input_schema)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceInfo {
    pub uri: String,
    pub name: String,
    pub description: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceText {
    pub uri: String,
    pub mime_type: Option<String>,
    pub text: String,
}

/// Response from tool execution
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResponse {
    Text { text: String },
    Image { data: String, mime_type: String },
    Resource { uri: String, text: Option<String>, mime_type: Option<String> },
}

impl ToolResponse {
    fn from_raw(raw: RawContent) -> Option<Self> {
        match raw {
            RawContent::Text(content) => Some(Self::Text { text: content.text }),
            RawContent::Image(image) => Some(Self::Image {
                data: image.data,
                mime_type: image.mime_type,
            }),
            RawContent::Resource(embedded) => Some(match embedded.resource {
                ResourceContents::TextResourceContents { uri, mime_type, text, .. } => {
                    Self::Resource { uri, text: Some(text), mime_type }
                }
                ResourceContents::BlobResourceContents { uri, mime_type, .. } => {
                    Self::Resource { uri, text: None, mime_type }
                }
            }),
            _ => None,
        }
    }

    pub fn join_responses(responses: &[ToolResponse]) -> String {
        responses
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ToolResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text } => f.write_str(text),
            Self::Image { mime_type, .. } => write!(f, "[Image: {}]", mime_type),
            Self::Resource { uri, text: Some(text), .. } => write!(f, "{}\n{}", uri, text),
            Self::Resource { uri, text: None, .. } => f.write_str(uri),
        }
    }
}
