//! MCP servers for the hrdesk agents.
//!
//! - [`timeoff`]: employee time-off ledger over streamable HTTP
//! - [`hr_policy`]: HR policy lookup tool and prompt over stdio
//! - [`code_of_conduct`]: code-of-conduct document resource over stdio
//! - [`demo`]: minimal `add` tool over stdio

pub mod code_of_conduct;
pub mod config;
pub mod demo;
pub mod documents;
pub mod error;
pub mod hr_policy;
pub mod sanitize;
pub mod timeoff;
pub mod transport;

pub use config::ServersConfig;
pub use error::DatastoreError;
pub use timeoff::{TimeOffDatastore, TimeoffServer};
