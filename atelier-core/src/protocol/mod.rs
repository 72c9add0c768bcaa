//! Protocol module for playground request/response structures
//!
//! This module defines the wire data model shared with the playground
//! service and the assembly logic that turns user input plus attachments
//! into outgoing message content. The structures are designed to be:
//! - Type-safe and serializable
//! - Exhaustively matchable (closed sums for parts and chunks)
//! - Lenient toward frames the client does not recognize

pub mod assembly;
pub mod types;

pub use assembly::{build_content, Conversation, DEFAULT_HISTORY_WINDOW};
pub use types::{
    ChatRequest, Completion, ContentPart, HyperParams, ImageUrl, InputAudio, Message,
    MessageContent, MessageRole, StreamChunk,
};
