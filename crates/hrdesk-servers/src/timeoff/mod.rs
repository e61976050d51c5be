pub mod datastore;
pub mod server;

pub use datastore::{EmployeeRecord, TimeOffDatastore, TimeOffRequest};
pub use server::TimeoffServer;
