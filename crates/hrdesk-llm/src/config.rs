// Provider configuration and client factory

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::azure_openai::AzureOpenAIClient;
use crate::openai::OpenAIClient;
use crate::traits::ChatClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    OpenAI,
    #[serde(rename = "azure_openai")]
    AzureOpenAI,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Defaults to https://api.openai.com/v1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    pub api_key: String,
    pub endpoint: String,
    pub api_version: String,
}

impl AzureConfig {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            api_version: api_version.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI(OpenAIConfig),
    #[serde(rename = "azure_openai")]
    AzureOpenAI(AzureConfig),
}

impl ProviderConfig {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::OpenAI(OpenAIConfig::new(api_key))
    }

    /// The deployment name is passed per request as the model:
    /// ```rust,ignore
    /// let request = ChatRequest::new("my-gpt4-deployment", messages);
    /// ```
    pub fn azure_openai(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self::AzureOpenAI(AzureConfig::new(api_key, endpoint, api_version))
    }

    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::OpenAI(_) => ProviderType::OpenAI,
            Self::AzureOpenAI(_) => ProviderType::AzureOpenAI,
        }
    }
}

/// Creates chat clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_chat_client(config: ProviderConfig) -> Result<Arc<dyn ChatClient>> {
        match config {
            ProviderConfig::OpenAI(openai_config) => {
                let mut client = OpenAIClient::new(openai_config.api_key)?;
                if let Some(base_url) = openai_config.base_url {
                    client = client.with_base_url(base_url);
                }
                Ok(Arc::new(client))
            }
            ProviderConfig::AzureOpenAI(azure_config) => {
                let client = AzureOpenAIClient::builder()
                    .api_key(azure_config.api_key)
                    .endpoint(azure_config.endpoint)
                    .api_version(azure_config.api_version)
                    .build()?;
                Ok(Arc::new(client))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_config() {
        let config = ProviderConfig::openai("test-key");
        assert_eq!(config.provider_type(), ProviderType::OpenAI);
    }

    #[test]
    fn test_azure_config() {
        let config = ProviderConfig::azure_openai(
            "test-key",
            "https://my-resource.openai.azure.com",
            "2024-02-15-preview",
        );
        assert_eq!(config.provider_type(), ProviderType::AzureOpenAI);
    }

    #[test]
    fn test_tagged_deserialization() {
        let json = r#"{"type":"azure_openai","api_key":"k","endpoint":"https://x","api_version":"v"}"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.provider_type(), ProviderType::AzureOpenAI);
    }

    #[test]
    fn test_factory_builds_both_providers() {
        assert!(ClientFactory::create_chat_client(ProviderConfig::openai("k")).is_ok());
        assert!(ClientFactory::create_chat_client(ProviderConfig::azure_openai(
            "k",
            "https://my-resource.openai.azure.com",
            "2024-02-15-preview",
        ))
        .is_ok());
    }
}
