use rmcp::{
    model::*, service::RequestContext, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde_json::json;
use std::sync::Arc;

pub const SERVER_NAME: &str = "Code-Of-Conduct-MCP-Server";
pub const RESOURCE_URI: &str = "docs://code_of_conduct";
pub const RESOURCE_NAME: &str = "code_of_conduct";

/// Publishes the code-of-conduct document as a single text resource
#[derive(Clone)]
pub struct CodeOfConductServer {
    document: Arc<str>,
}

impl CodeOfConductServer {
    pub fn new(document: impl Into<Arc<str>>) -> Self {
        Self {
            document: document.into(),
        }
    }

    fn resource(&self) -> Resource {
        let mut raw = RawResource::new(RESOURCE_URI, RESOURCE_NAME);
        raw.description = Some("The company code of conduct".to_string());
        raw.mime_type = Some("text/plain".to_string());
        raw.size = u32::try_from(self.document.len()).ok();
        raw.no_annotation()
    }
}

impl ServerHandler for CodeOfConductServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_resources().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some("Read the company code of conduct as a resource.".to_string()),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        tracing::debug!("listing resources");
        Ok(ListResourcesResult {
            resources: vec![self.resource()],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        tracing::info!(%uri, "reading resource");
        if uri != RESOURCE_URI {
            return Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": uri })),
            ));
        }

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(self.document.to_string(), uri)],
        })
    }
}
