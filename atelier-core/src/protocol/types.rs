//! Core protocol types for the playground chat API
//!
//! This module contains the data structures exchanged with the playground
//! service. The design prioritizes:
//! - Type safety through closed enums with exhaustive matching
//! - Wire compatibility with the service's JSON shapes
//! - Leniency toward frames the client does not recognize

use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions that guide the model's behavior
    System,
    /// User input message
    User,
    /// Assistant (model) response
    Assistant,
}

/// Content of a message - plain text or an ordered list of multimodal parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Structured content parts; part order is significant and preserved
    Parts(Vec<ContentPart>),
}

/// Individual content part for multimodal messages
///
/// Serializes to the service's wire shapes:
/// `{"type":"text","text":...}`, `{"type":"image_url","image_url":{"url":...}}`,
/// `{"type":"input_audio","input_audio":{"data":...,"format":...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content part
    Text { text: String },
    /// Image reference (a URL or an embedded data URI)
    ImageUrl { image_url: ImageUrl },
    /// Inline audio payload
    InputAudio { input_audio: InputAudio },
}

/// Image URL wrapper matching the wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Inline audio payload: base64 data plus container format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAudio {
    pub data: String,
    pub format: String,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,

    /// Content of the message
    pub content: MessageContent,
}

/// Generation parameters
///
/// Defaults mirror the service's own defaults, so an explicit
/// `HyperParams::default()` and an omitted `hyper_params` field behave the
/// same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperParams {
    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Nucleus sampling parameter
    pub top_p: f32,

    /// Frequency penalty (-2.0 to 2.0)
    pub frequency_penalty: f32,

    /// Presence penalty (-2.0 to 2.0)
    pub presence_penalty: f32,
}

impl Default for HyperParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// Chat request sent to the playground service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChatRequest {
    /// Model identifier to use (opaque to this client)
    #[serde(default)]
    pub model: String,

    /// Messages in the conversation, oldest first
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyper_params: Option<HyperParams>,

    /// Requested output modalities, e.g. ["text", "image"]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<String>>,
}

/// One incremental unit of a streamed response
///
/// The wire tag is `type`; any frame this client does not recognize is kept
/// as an opaque [`StreamChunk::Other`] value rather than rejected, so
/// consumers must ignore chunks they do not understand.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamChunk {
    /// Incremental text delta
    Text { content: String },
    /// A generated image is ready at the given URL
    Image { url: String },
    /// Server-reported error, delivered in-band
    Error { content: String },
    /// Frame with an unrecognized shape, passed through untouched
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for StreamChunk {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(tag = "type", rename_all = "lowercase")]
        enum Known {
            Text { content: String },
            Image { url: String },
            Error { content: String },
        }

        let value = serde_json::Value::deserialize(deserializer)?;
        match Known::deserialize(&value) {
            Ok(Known::Text { content }) => Ok(StreamChunk::Text { content }),
            Ok(Known::Image { url }) => Ok(StreamChunk::Image { url }),
            Ok(Known::Error { content }) => Ok(StreamChunk::Error { content }),
            // Anything else that is still valid JSON is carried through for
            // the consumer to ignore or inspect.
            Err(_) => Ok(StreamChunk::Other(value)),
        }
    }
}

/// Aggregate result of the non-streaming completion path
///
/// All three sequences may be empty; absent fields deserialize to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Completion {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub audio: Vec<String>,
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Message {
    /// Create a message with explicit content
    pub fn new(role: MessageRole, content: MessageContent) -> Self {
        Self { role, content }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, MessageContent::Text(content.into()))
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, MessageContent::Text(content.into()))
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, MessageContent::Text(content.into()))
    }
}

impl ChatRequest {
    /// Create a new chat request with model and messages
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            hyper_params: None,
            modalities: None,
        }
    }

    /// Set generation parameters
    pub fn with_hyper_params(mut self, params: HyperParams) -> Self {
        self.hyper_params = Some(params);
        self
    }

    /// Set the requested output modalities
    pub fn with_modalities(mut self, modalities: Vec<String>) -> Self {
        self.modalities = Some(modalities);
        self
    }
}

impl MessageContent {
    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(s) => s.is_empty(),
            MessageContent::Parts(parts) => parts.is_empty(),
        }
    }

    /// Get text representation, if the content is plain text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s.as_str()),
            MessageContent::Parts(_) => None,
        }
    }
}

impl Completion {
    /// True when the completion carries no content at all
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.images.is_empty() && self.audio.is_empty()
    }
}
