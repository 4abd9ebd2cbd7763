//! Data structures for the gateway's client contract and the normalized
//! provider-facing chat model.
//!
//! The client-facing types mirror the JSON accepted on the HTTP surface; the
//! chat types normalize that input into the shape the completion provider
//! consumes, so the forwarding code stays agnostic of how requests arrived.

use serde::{Deserialize, Serialize};

/// Chat role string compatible with provider semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub String);

impl Role {
    pub fn system() -> Self {
        Self("system".to_string())
    }

    pub fn user() -> Self {
        Self("user".to_string())
    }

    pub fn assistant() -> Self {
        Self("assistant".to_string())
    }
}

/// One conversational turn supplied by a client.
///
/// `role` and `content` are required and validated to be non-empty before any
/// forwarding happens. The optional `type` marker defaults to `"text"` and is
/// dropped on the wire, where part types are derived structurally.
///
/// # Examples
///
/// ```
/// # use mistral_gateway::types::Message;
/// let msg: Message = serde_json::from_str(r#"{"role": "user", "content": "Hi"}"#).unwrap();
/// assert_eq!(msg.kind, "text");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role associated with this message.
    pub role: String,
    /// Plain UTF-8 text for this turn.
    pub content: String,
    /// Content marker, currently always `"text"` for completion turns.
    #[serde(rename = "type", default = "default_message_kind")]
    pub kind: String,
}

fn default_message_kind() -> String {
    "text".to_string()
}

/// Body of `POST /completion`.
///
/// `content` is the ordered conversation to forward; `model` optionally
/// overrides the configured text tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Ordered, non-empty sequence of messages.
    pub content: Vec<Message>,
    /// Optional model identifier override.
    #[serde(default)]
    pub model: Option<String>,
}

/// One entry of an image-recognition request.
///
/// Only positions matter here: entry 0 carries the text prompt and entry 1
/// the image reference. The gateway always forwards a single user-role
/// message, so a role supplied by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMessage {
    /// Ignored; retained so callers may submit full message objects.
    #[serde(default)]
    pub role: Option<String>,
    /// Prompt text (entry 0) or image URL / base64 data URI (entry 1).
    pub content: String,
}

/// Body of `POST /image-recognition`.
///
/// # Examples
///
/// ```
/// # use mistral_gateway::types::ImageCompletionRequest;
/// let req: ImageCompletionRequest = serde_json::from_str(
///     r#"{"messages": [
///         {"content": "What's in this image?"},
///         {"content": "data:image/jpeg;base64,AAAA"}
///     ]}"#,
/// )
/// .unwrap();
/// assert_eq!(req.messages.len(), 2);
/// assert!(req.model.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCompletionRequest {
    /// At least two entries: text prompt first, image reference second.
    pub messages: Vec<ImageMessage>,
    /// Optional model identifier override.
    #[serde(default)]
    pub model: Option<String>,
}

/// Successful gateway reply for both operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionReply {
    /// First choice's message content, verbatim from the provider.
    pub response: String,
}

/// Normalized chat message forwarded to the completion provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role associated with this message.
    pub role: Role,
    /// Flat text or an ordered list of typed parts.
    pub content: ChatContent,
}

impl ChatMessage {
    /// Builds a plain-text message for the given role.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: ChatContent::Text(text.into()),
        }
    }

    /// Builds a multi-part message for the given role.
    pub fn parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self {
            role,
            content: ChatContent::Parts(parts),
        }
    }
}

/// Message content in either of the provider's two accepted shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatContent {
    /// Flat string content.
    Text(String),
    /// Ordered multimodal parts.
    Parts(Vec<ContentPart>),
}

/// Multimodal content part covering the text and image inputs the gateway
/// forwards.
///
/// # Examples
///
/// ```
/// # use mistral_gateway::types::ContentPart;
/// let part = ContentPart::ImageUrl {
///     image_url: "data:image/jpeg;base64,AAAA".to_string(),
/// };
/// let json = serde_json::to_value(&part).unwrap();
/// assert_eq!(json["type"], "image_url");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content variant.
    Text { text: String },
    /// Image reference variant, a URL or a fully formed base64 data URI
    /// passed through unmodified.
    ImageUrl { image_url: String },
}

/// Aggregated completion returned by a provider.
///
/// Carries the choices array plus optional usage and finish metadata; the
/// gateway only consumes the first choice but keeps the rest available for
/// logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Choices produced by the model, in upstream order.
    pub choices: Vec<Choice>,
    /// Effective model identifier reported by the provider.
    pub model: Option<String>,
    /// Token usage accounting.
    pub usage: Option<TokenUsage>,
    /// Metadata about the provider invocation.
    pub provider: ProviderMetadata,
}

impl Completion {
    /// Returns the first choice's message content, if any choice was produced.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

/// Individual completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Upstream array index of this choice.
    pub index: usize,
    /// Assistant message generated for this choice.
    pub message: AssistantMessage,
    /// Why the choice stopped generating.
    pub finish_reason: Option<FinishReason>,
}

/// Assistant message inside a completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// Role reported by the provider, normally `assistant`.
    pub role: Role,
    /// Generated text content.
    pub content: String,
}

/// Token usage metrics collected from the provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenUsage {
    /// prompt tokens
    pub prompt_tokens: Option<u64>,
    /// completion tokens
    pub completion_tokens: Option<u64>,
    /// Total tokens across prompt and completion.
    pub total_tokens: Option<u64>,
}

/// Why a completion stopped generating content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ModelLength,
    ToolCalls,
    Error,
    Other(String),
}

/// Provider metadata returned with each completion.
///
/// Used to correlate logs and surface endpoint information during triage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderMetadata {
    /// Provider identifier such as `mistral`.
    pub provider: String,
    /// Endpoint description or URL.
    pub endpoint: Option<String>,
}
