//! Configuration and logging bootstrap shared by the hrdesk servers and agents.

pub mod loader;
pub mod logging;

pub use config::ConfigError;
pub use loader::{load_layered, load_from_str, ENV_PREFIX};
pub use logging::{init_logging, LogFormat, LoggingConfig};
