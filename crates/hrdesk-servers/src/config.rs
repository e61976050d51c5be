use hrdesk_config::{ConfigError, LoggingConfig};
use serde::Deserialize;
use std::path::PathBuf;

/// Settings shared by the MCP server binaries
///
/// Every section is optional; the defaults reproduce the stock setup
/// (time-off server on `localhost:8000/`, bundled documents, in-memory ledger).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServersConfig {
    #[serde(default)]
    pub server: HttpConfig,
    #[serde(default)]
    pub timeoff: TimeoffConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
        }
    }
}

impl HttpConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeoffConfig {
    /// JSON ledger file; in-memory when unset
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentsConfig {
    pub hr_policy: Option<PathBuf>,
    pub code_of_conduct: Option<PathBuf>,
}

impl ServersConfig {
    /// Load from `config/` and `HRDESK_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        hrdesk_config::load_layered()
    }

    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        hrdesk_config::load_from_str(toml)
    }
}
