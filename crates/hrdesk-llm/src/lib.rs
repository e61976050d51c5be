pub mod types;
pub mod traits;
pub mod config;
pub mod openai;
pub mod azure_openai;

pub use traits::{ChatClient, ChatRequest, ChatResponse, ChatOptions, TokenUsage};
pub use config::{ClientFactory, ProviderConfig, ProviderType, OpenAIConfig, AzureConfig};
pub use openai::OpenAIClient;
pub use azure_openai::AzureOpenAIClient;
pub use types::{Message, Content, Tool, ToolCall, ToolChoice};
