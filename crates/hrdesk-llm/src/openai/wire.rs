// Chat Completions wire format, shared by the OpenAI and Azure OpenAI clients

use crate::traits::{ChatOptions, ChatResponse, TokenUsage};
use crate::types::{Content, ContentPart, Message, ToolCall};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Build the request body. Azure carries the deployment in the URL, so it passes
/// `model_in_body = false`; the name still selects the reasoning-model fields.
pub(crate) fn build_chat_payload(
    model: &str,
    model_in_body: bool,
    messages: Vec<Message>,
    options: &ChatOptions,
) -> Result<Value> {
    let converted: Vec<Value> = messages.into_iter().map(convert_message).collect();

    let mut obj = Map::new();
    if model_in_body {
        obj.insert("model".to_string(), json!(model));
    }
    obj.insert("messages".to_string(), Value::Array(converted));

    // o1 / gpt-5 reject temperature and expect max_completion_tokens
    let is_reasoning_model = is_reasoning_model(model);

    if let Some(temp) = options.temperature {
        if !is_reasoning_model {
            obj.insert("temperature".to_string(), json!(temp));
        }
    }
    if let Some(max_tokens) = options.max_tokens {
        let token_field = if is_reasoning_model {
            "max_completion_tokens"
        } else {
            "max_tokens"
        };
        obj.insert(token_field.to_string(), json!(max_tokens));
    }
    if let Some(tools) = &options.tools {
        obj.insert("tools".to_string(), serde_json::to_value(tools)?);
    }
    if let Some(tool_choice) = &options.tool_choice {
        obj.insert("tool_choice".to_string(), serde_json::to_value(tool_choice)?);
    }

    Ok(Value::Object(obj))
}

fn is_reasoning_model(model: &str) -> bool {
    let model = model.to_ascii_lowercase();
    model.starts_with("o1") || model.starts_with("gpt-5")
}

pub(crate) fn convert_message(message: Message) -> Value {
    match message {
        Message::System { content, name } => with_name(
            json!({ "role": "system", "content": convert_content(content) }),
            name,
        ),
        Message::Human { content, name } => with_name(
            json!({ "role": "user", "content": convert_content(content) }),
            name,
        ),
        Message::AI { content, tool_calls, name } => {
            let mut obj = Map::new();
            obj.insert("role".to_string(), json!("assistant"));
            // The API requires the key even when the turn is only tool calls
            obj.insert(
                "content".to_string(),
                content.map(convert_content).unwrap_or(Value::Null),
            );
            if let Some(tool_calls) = tool_calls {
                obj.insert("tool_calls".to_string(), json!(tool_calls));
            }
            with_name(Value::Object(obj), name)
        }
        Message::Tool { tool_call_id, content } => json!({
            "role": "tool",
            "tool_call_id": tool_call_id,
            "content": convert_content(content),
        }),
    }
}

fn with_name(mut value: Value, name: Option<String>) -> Value {
    if let (Some(name), Some(obj)) = (name, value.as_object_mut()) {
        obj.insert("name".to_string(), json!(name));
    }
    value
}

fn convert_content(content: Content) -> Value {
    match content {
        Content::Text(s) => json!(s),
        Content::Parts(parts) => Value::Array(
            parts
                .into_iter()
                .map(|ContentPart::Text { text }| json!({ "type": "text", "text": text }))
                .collect(),
        ),
    }
}

/// Send a prepared request and convert a 2xx body into a `ChatResponse`
pub(crate) async fn send_chat(
    request: reqwest::RequestBuilder,
    provider: &str,
) -> Result<ChatResponse> {
    let response = request.send().await.context("Failed to send request")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("{} API error ({}): {}", provider, status, error_text);
    }

    let raw: ChatCompletion = response
        .json()
        .await
        .context("Failed to parse response")?;

    let choice = raw.choices.first();
    Ok(ChatResponse {
        content: choice.and_then(|c| c.message.content.clone()),
        tool_calls: choice.and_then(|c| c.message.tool_calls.clone()),
        usage: raw.usage.as_ref().map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
        finish_reason: choice.and_then(|c| c.finish_reason.clone()),
        raw: serde_json::to_value(&raw)?,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
