//! Assembly of outgoing message content from text and media attachments
//!
//! This is the request-side half of the protocol: given free text and an
//! ordered list of attachments, produce the content value the service
//! expects. The mapping is deliberately lenient - an audio attachment whose
//! data URL does not look like inline base64 audio is dropped rather than
//! rejected, so a partially unusable input still produces a usable request.

use crate::media::{Attachment, MediaKind};
use crate::protocol::types::{
    ContentPart, ImageUrl, InputAudio, Message, MessageContent, MessageRole,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Number of prior turns included when building a request from a conversation
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Inline audio data URLs must carry a base64 payload with an explicit format
static AUDIO_DATA_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:audio/(\w+);base64,(.+)$").unwrap());

/// Build message content from free text and ordered attachments
///
/// With no attachments the content is the plain text string, even when the
/// text is empty. Otherwise the content is an ordered parts list: a text
/// part first (only if the text is non-empty), then one part per attachment
/// in attachment order:
///
/// - image: an `image_url` part carrying the data URL verbatim
/// - audio: an `input_audio` part with the base64 payload and format
///   extracted from the data URL; a URL that does not match the inline
///   audio shape drops the part silently
/// - video: an `image_url` part with the same data URL (some backends accept
///   a representative frame in place of true video input)
///
/// Pure and synchronous; deterministic given its inputs.
pub fn build_content(text: &str, attachments: &[Attachment]) -> MessageContent {
    if attachments.is_empty() {
        return MessageContent::Text(text.to_owned());
    }

    let mut parts = Vec::with_capacity(attachments.len() + 1);

    if !text.is_empty() {
        parts.push(ContentPart::Text {
            text: text.to_owned(),
        });
    }

    for attachment in attachments {
        match attachment.kind {
            MediaKind::Image | MediaKind::Video => {
                parts.push(ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: attachment.data_url.clone(),
                    },
                });
            }
            MediaKind::Audio => match AUDIO_DATA_URL.captures(&attachment.data_url) {
                Some(caps) => {
                    parts.push(ContentPart::InputAudio {
                        input_audio: InputAudio {
                            data: caps[2].to_string(),
                            format: caps[1].to_string(),
                        },
                    });
                }
                None => {
                    debug!(
                        "Dropping audio attachment '{}': data URL is not inline base64 audio",
                        attachment.filename
                    );
                }
            },
        }
    }

    MessageContent::Parts(parts)
}

/// One prior exchange turn held by a [`Conversation`]
#[derive(Debug, Clone, PartialEq)]
struct Turn {
    role: MessageRole,
    text: String,
    attachments: Vec<Attachment>,
}

/// Conversation state used to assemble full request message lists
///
/// Holds an optional system prompt and the prior turns of the exchange.
/// [`Conversation::request_messages`] produces the `messages` vector for a
/// new user input: the system prompt first (when non-empty), then the most
/// recent turns up to the history window, then the new user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    system_prompt: Option<String>,
    turns: Vec<Turn>,
    window: usize,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Create an empty conversation with the default history window
    pub fn new() -> Self {
        Self {
            system_prompt: None,
            turns: Vec::new(),
            window: DEFAULT_HISTORY_WINDOW,
        }
    }

    /// Set the system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Override the number of prior turns included in requests
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Record a completed user turn
    pub fn push_user(&mut self, text: impl Into<String>, attachments: Vec<Attachment>) {
        self.turns.push(Turn {
            role: MessageRole::User,
            text: text.into(),
            attachments,
        });
    }

    /// Record a completed assistant turn
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: MessageRole::Assistant,
            text: text.into(),
            attachments: Vec::new(),
        });
    }

    /// Number of recorded turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turns have been recorded
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Forget all recorded turns, keeping the system prompt
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Build the full message list for a new user input
    pub fn request_messages(&self, text: &str, attachments: &[Attachment]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len().min(self.window) + 2);

        if let Some(prompt) = &self.system_prompt {
            if !prompt.is_empty() {
                messages.push(Message::system(prompt.clone()));
            }
        }

        let start = self.turns.len().saturating_sub(self.window);
        for turn in &self.turns[start..] {
            let content = if turn.attachments.is_empty() {
                MessageContent::Text(turn.text.clone())
            } else {
                build_content(&turn.text, &turn.attachments)
            };
            messages.push(Message::new(turn.role, content));
        }

        messages.push(Message::new(
            MessageRole::User,
            build_content(text, attachments),
        ));

        messages
    }
}
