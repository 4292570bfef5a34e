//! Chat relay: forwards a conversation to the Fanar endpoint, or answers from the offline mock.
//!
//! Resolution order:
//! 1. `api_url` set: POST `{ messages, options }` (bearer key when configured) and pull the reply
//!    out of whichever response shape the backend uses.
//! 2. No endpoint, `mock` set: echo the last message.
//! 3. Neither: [`RelayError::NotConfigured`].

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// One conversation turn, forwarded to the backend exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatMessage(Value);

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self(json!({ "role": role, "content": content.into() }))
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// First truthy of `content` then `text`. Non-string values come back serialized.
    pub fn text(&self) -> Option<String> {
        ["content", "text"]
            .iter()
            .filter_map(|key| self.0.get(key))
            .find(|v| truthy(v))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }
}

impl From<Value> for ChatMessage {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Per-request hints for the backend. Unknown keys are forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_rag: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    messages: &'a [ChatMessage],
    options: &'a ChatOptions,
}

/// How a relay will answer, derived from its config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMode {
    Remote,
    Mock,
    Unconfigured,
}

impl std::fmt::Display for RelayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RelayMode::Remote => "remote",
            RelayMode::Mock => "mock",
            RelayMode::Unconfigured => "unconfigured",
        })
    }
}

pub struct ChatRelay {
    config: RelayConfig,
    client: reqwest::Client,
}

impl ChatRelay {
    pub fn new(config: RelayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn mode(&self) -> RelayMode {
        match (&self.config.api_url, self.config.mock) {
            (Some(_), _) => RelayMode::Remote,
            (None, true) => RelayMode::Mock,
            (None, false) => RelayMode::Unconfigured,
        }
    }

    pub async fn send(&self, messages: &[ChatMessage], options: &ChatOptions) -> RelayResult<String> {
        tracing::debug!(mode = %self.mode(), messages = messages.len(), "chat relay send");

        let Some(url) = self.config.api_url.as_deref() else {
            if self.config.mock {
                return Ok(mock_reply(messages));
            }
            return Err(RelayError::NotConfigured);
        };

        let mut request = self
            .client
            .post(url)
            .json(&RelayPayload { messages, options });
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let res = request.send().await?;
        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Fanar backend returned an error");
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let data: Value =
            serde_json::from_str(&text).map_err(|e| RelayError::MalformedResponse(e.to_string()))?;
        Ok(extract_reply(data))
    }
}

fn mock_reply(messages: &[ChatMessage]) -> String {
    let user_text = messages
        .last()
        .and_then(ChatMessage::text)
        .unwrap_or_else(|| "hello".to_string());
    format!(
        "MOCK RESPONSE: I received your message: \"{}\". (Enable FANAR_API_URL to call a real Fanar endpoint)",
        user_text
    )
}

/// Pull the reply text out of a backend response. Shapes tried in order: chat-completion
/// `choices[0].message.content`, a flat `response` field, a bare JSON string; anything else is
/// returned serialized.
pub fn extract_reply(data: Value) -> String {
    if let Some(content) = data
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        return content.to_string();
    }

    match data.get("response") {
        Some(Value::String(s)) if !s.is_empty() => return s.clone(),
        Some(v) if !v.is_string() && truthy(v) => return v.to_string(),
        _ => {}
    }

    match data {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
