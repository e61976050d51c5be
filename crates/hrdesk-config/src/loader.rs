use config::{Config as ConfigLoader, ConfigError, Environment, File, FileFormat};
use serde::de::DeserializeOwned;

/// Prefix for environment overrides, e.g. `HRDESK_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "HRDESK";

/// Load configuration from TOML files and environment variables
///
/// Hierarchy (weakest to strongest):
/// 1. `config/default.toml`
/// 2. `config/{ENV}.toml` (ENV defaults to "dev")
/// 3. `HRDESK_<SECTION>__<KEY>` environment variables
///
/// A `.env` file in the working directory is loaded first when present.
pub fn load_layered<T: DeserializeOwned>() -> Result<T, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

    ConfigLoader::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// Parse a TOML document directly (useful for testing)
pub fn load_from_str<T: DeserializeOwned>(toml: &str) -> Result<T, ConfigError> {
    ConfigLoader::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LoggingConfig};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default)]
        logging: LoggingConfig,
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let sample: Sample = load_from_str("").unwrap();
        assert_eq!(sample.logging.level, "info");
        assert_eq!(sample.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_logging_section() {
        let sample: Sample = load_from_str(
            r#"
            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(sample.logging.level, "debug");
        assert_eq!(sample.logging.format, LogFormat::Json);
    }
}
