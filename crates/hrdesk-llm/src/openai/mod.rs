mod client;
pub(crate) mod wire;

pub use client::OpenAIClient;
