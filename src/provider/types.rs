use serde::{Deserialize, Serialize};

use super::stream::ChunkStream;

/// Provider credentials, shaped by the host's credential schema.
pub type Credentials = serde_json::Map<String, serde_json::Value>;

/// Sampling/decoding knobs (temperature, max_tokens, ...).
pub type ModelParameters = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMessageRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptMessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PromptMessage {
    fn with_role(role: PromptMessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(PromptMessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(PromptMessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(PromptMessageRole::Assistant, content)
    }
}

/// A callable tool offered to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessageTool {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON schema of the tool arguments.
    #[serde(default)]
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantPromptMessage {
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

impl AssistantPromptMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }
}

/// Token and price accounting attached to a completed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u64,
    pub prompt_unit_price: f64,
    pub prompt_price_unit: f64,
    pub prompt_price: f64,
    pub completion_tokens: u64,
    pub completion_unit_price: f64,
    pub completion_price_unit: f64,
    pub completion_price: f64,
    pub total_tokens: u64,
    pub total_price: f64,
    pub currency: String,
    /// Seconds.
    pub latency: f64,
}

impl LlmUsage {
    pub fn empty() -> Self {
        Self {
            prompt_tokens: 0,
            prompt_unit_price: 0.0,
            prompt_price_unit: 0.0,
            prompt_price: 0.0,
            completion_tokens: 0,
            completion_unit_price: 0.0,
            completion_price_unit: 0.0,
            completion_price: 0.0,
            total_tokens: 0,
            total_price: 0.0,
            currency: "USD".to_string(),
            latency: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prompt_tokens == 0
            && self.completion_tokens == 0
            && self.total_tokens == 0
            && self.total_price == 0.0
    }
}

impl Default for LlmUsage {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResultChunkDelta {
    pub index: u32,
    pub message: AssistantPromptMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<LlmUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// One incremental unit of a streamed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResultChunk {
    pub model: String,
    pub prompt_messages: Vec<PromptMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
    pub delta: LlmResultChunkDelta,
}

/// A fully assembled, non-streamed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResult {
    pub model: String,
    pub prompt_messages: Vec<PromptMessage>,
    pub message: AssistantPromptMessage,
    pub usage: LlmUsage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
}

impl LlmResult {
    pub fn content(&self) -> &str {
        &self.message.content
    }
}

/// Everything the host passes to a single generation call.
#[derive(Debug, Clone, Default)]
pub struct InvokeRequest {
    pub model: String,
    pub credentials: Credentials,
    pub prompt_messages: Vec<PromptMessage>,
    pub model_parameters: ModelParameters,
    pub tools: Option<Vec<PromptMessageTool>>,
    pub stop: Option<Vec<String>>,
    pub stream: bool,
    pub user: Option<String>,
}

#[derive(Debug)]
pub enum LlmResponse {
    Complete(LlmResult),
    Stream(ChunkStream),
}

impl LlmResponse {
    pub fn into_result(self) -> Option<LlmResult> {
        match self {
            Self::Complete(r) => Some(r),
            Self::Stream(_) => None,
        }
    }

    pub fn into_stream(self) -> Option<ChunkStream> {
        match self {
            Self::Stream(s) => Some(s),
            Self::Complete(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_usage_is_all_zero() {
        let u = LlmUsage::empty();
        assert!(u.is_empty());
        assert_eq!(u.prompt_price, 0.0);
        assert_eq!(u.completion_price, 0.0);
        assert_eq!(u.latency, 0.0);
        assert_eq!(u.currency, "USD");
    }

    #[test]
    fn prompt_message_roles_serialize_lowercase() {
        let m = PromptMessage::system("be brief");
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["role"], "system");
        assert!(v.get("name").is_none());

        let back: PromptMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(back, PromptMessage::assistant("hi"));
    }

    #[test]
    fn tool_call_kind_uses_type_key() {
        let call = ToolCall {
            id: "call_1".into(),
            kind: "function".into(),
            function: ToolCallFunction {
                name: "lookup".into(),
                arguments: "{}".into(),
            },
        };
        let v = serde_json::to_value(&call).unwrap();
        assert_eq!(v["type"], "function");
    }
}
