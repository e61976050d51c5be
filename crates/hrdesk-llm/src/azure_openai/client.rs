// Azure OpenAI Chat Completions client

use crate::openai::wire;
use crate::traits::{ChatClient, ChatRequest, ChatResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

/// Azure OpenAI client (HTTP direct, no SDK)
///
/// Azure differs from OpenAI in three ways:
/// - URL: `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`
/// - Auth header: `api-key` instead of `Authorization: Bearer`
/// - The deployment name travels in the request's `model` field
#[derive(Debug, Clone)]
pub struct AzureOpenAIClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_version: String,
}

impl AzureOpenAIClient {
    pub fn builder() -> AzureOpenAIClientBuilder {
        AzureOpenAIClientBuilder::default()
    }

    fn build_url(&self, deployment_name: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, deployment_name, self.api_version
        )
    }
}

#[derive(Default)]
pub struct AzureOpenAIClientBuilder {
    api_key: Option<String>,
    endpoint: Option<String>,
    api_version: Option<String>,
}

impl AzureOpenAIClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Resource base URL, e.g. "https://my-resource.openai.azure.com"
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn build(self) -> Result<AzureOpenAIClient> {
        let api_key = self.api_key.context("API key is required")?;
        let endpoint = self.endpoint.context("Endpoint is required")?;
        let api_version = self.api_version.context("API version is required")?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "api-key",
            HeaderValue::from_str(&api_key).context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(AzureOpenAIClient {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version,
        })
    }
}

#[async_trait]
impl ChatClient for AzureOpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = self.build_url(&request.model);
        let payload = wire::build_chat_payload(&request.model, false, request.messages, &request.options)?;

        tracing::debug!(deployment = %request.model, "sending Azure chat completion request");

        let builder = self.http_client.post(&url).json(&payload);
        wire::send_chat(builder, "Azure OpenAI").await
    }
}
