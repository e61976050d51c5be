use anyhow::{bail, Result};
use hrdesk_config::{ConfigError, LoggingConfig};
use hrdesk_graph::{GraphConfig, LLMConfig};
use hrdesk_llm::{OpenAIConfig, ProviderConfig, ProviderType};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";

/// Settings for the agent binaries
///
/// API keys are never read from files; see [`AgentsConfig::provider_config`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentsConfig {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub mcp: McpSettings,
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub provider: ProviderType,
    /// Model name, or the deployment name on Azure
    #[serde(default = "default_model")]
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderType::default(),
            model: default_model(),
            temperature: None,
            max_tokens: None,
            base_url: None,
            endpoint: None,
            api_version: None,
        }
    }
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct McpSettings {
    #[serde(default = "default_timeoff_url")]
    pub timeoff_url: String,
    /// Defaults to the `hr-policy-server` binary next to the running agent
    pub hr_policy_command: Option<String>,
    #[serde(default)]
    pub hr_policy_args: Vec<String>,
    /// Defaults to the `code-of-conduct-server` binary next to the running agent
    pub code_of_conduct_command: Option<String>,
    #[serde(default)]
    pub code_of_conduct_args: Vec<String>,
}

impl Default for McpSettings {
    fn default() -> Self {
        Self {
            timeoff_url: default_timeoff_url(),
            hr_policy_command: None,
            hr_policy_args: Vec::new(),
            code_of_conduct_command: None,
            code_of_conduct_args: Vec::new(),
        }
    }
}

fn default_timeoff_url() -> String {
    "http://localhost:8000/".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphSettings {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_max_iterations() -> usize {
    25
}

fn default_timeout_secs() -> u64 {
    300
}

impl AgentsConfig {
    /// Load from `config/` and `HRDESK_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        hrdesk_config::load_layered()
    }

    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        hrdesk_config::load_from_str(toml)
    }

    pub fn llm_config(&self) -> LLMConfig {
        LLMConfig {
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
        }
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig::new()
            .with_max_iterations(self.graph.max_iterations)
            .with_timeout(Duration::from_secs(self.graph.timeout_secs))
    }

    /// Provider settings with the API key taken from the process environment
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        self.provider_config_with(|key| std::env::var(key).ok())
    }

    pub fn provider_config_with<F>(&self, secret: F) -> Result<ProviderConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.llm.provider {
            ProviderType::OpenAI => {
                let Some(api_key) = secret(OPENAI_API_KEY) else {
                    bail!("{} environment variable is required", OPENAI_API_KEY);
                };
                let mut openai = OpenAIConfig::new(api_key);
                if let Some(base_url) = &self.llm.base_url {
                    openai = openai.with_base_url(base_url.clone());
                }
                Ok(ProviderConfig::OpenAI(openai))
            }
            ProviderType::AzureOpenAI => {
                let Some(api_key) = secret(AZURE_OPENAI_API_KEY) else {
                    bail!("{} environment variable is required", AZURE_OPENAI_API_KEY);
                };
                let Some(endpoint) = self.llm.endpoint.clone() else {
                    bail!("llm.endpoint is required for the azure_openai provider");
                };
                let Some(api_version) = self.llm.api_version.clone() else {
                    bail!("llm.api_version is required for the azure_openai provider");
                };
                Ok(ProviderConfig::azure_openai(api_key, endpoint, api_version))
            }
        }
    }
}

/// Command for a stdio server: the configured one, or `default_bin` next to
/// the current executable
pub fn server_command(configured: Option<&str>, default_bin: &str) -> String {
    if let Some(command) = configured {
        return command.to_string();
    }

    let sibling = std::env::current_exe()
        .ok()
        .map(|exe| exe.with_file_name(executable_name(default_bin)))
        .filter(|path| path.exists());

    match sibling {
        Some(path) => path.to_string_lossy().into_owned(),
        None => default_bin.to_string(),
    }
}

fn executable_name(bin: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", bin, std::env::consts::EXE_SUFFIX))
}
