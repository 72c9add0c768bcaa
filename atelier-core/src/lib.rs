//! Atelier Core Library
//!
//! Client-side core for a multimodal LLM playground: the typed chat
//! protocol, multimodal request assembly, incremental decoding of streamed
//! responses, and an HTTP client for the playground service.

pub mod capabilities;
pub mod client;
pub mod config;
pub mod media;
pub mod protocol;

pub use capabilities::{Modality, ModelCapabilities, ModelCategory};
pub use client::models::{CategorizedModels, ModelInfo, ModelPricing, ModelsResponse};
pub use client::{
    ChatOutcome, ChunkStream, ClientError, ClientResult, PlaygroundApi, PlaygroundClient,
    SseDecoder, StreamCollector,
};
pub use config::{ClientConfig, ConfigError, SecretString};
pub use media::{Attachment, MediaError, MediaKind};
pub use protocol::{
    build_content, ChatRequest, Completion, ContentPart, Conversation, HyperParams, Message,
    MessageContent, MessageRole, StreamChunk,
};

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
