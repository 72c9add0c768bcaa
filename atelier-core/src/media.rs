//! Media attachments and data-URL encoding
//!
//! The playground carries uploaded media inline as `data:` URLs. This module
//! detects the media kind from a MIME type, enforces per-kind size limits,
//! and base64-encodes raw bytes into the data-URL form the request assembly
//! consumes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of media a model can receive alongside text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    /// Detect the media kind from a MIME type
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let prefix = content_type.split('/').next().unwrap_or("");
        match prefix {
            "image" => Some(MediaKind::Image),
            "audio" => Some(MediaKind::Audio),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }

    /// Wire name of this kind
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }

    /// Maximum accepted payload size for this kind, in bytes
    pub fn max_size_bytes(self) -> u64 {
        match self {
            MediaKind::Image => 10 * 1024 * 1024,
            MediaKind::Audio => 20 * 1024 * 1024,
            MediaKind::Video => 50 * 1024 * 1024,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while preparing an attachment
#[derive(Debug, Error)]
pub enum MediaError {
    /// MIME type is not image/*, audio/* or video/*
    #[error("unsupported media type: {content_type}")]
    UnsupportedType { content_type: String },

    /// Payload exceeds the per-kind size limit
    #[error("'{filename}' exceeds the {limit_mb} MB limit for {kind} attachments")]
    TooLarge {
        filename: String,
        kind: MediaKind,
        limit_mb: u64,
    },
}

/// A media item attached to a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Detected media kind
    pub kind: MediaKind,

    /// `data:<mime>;base64,<payload>` URL carried verbatim into the request
    pub data_url: String,

    /// Original filename, for diagnostics and previews
    pub filename: String,

    /// Raw payload size in bytes before encoding
    pub size: u64,
}

impl Attachment {
    /// Encode raw bytes into an attachment
    ///
    /// Detects the kind from the MIME type and enforces the per-kind size
    /// limit before encoding.
    pub fn from_bytes(
        filename: impl Into<String>,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<Self, MediaError> {
        let filename = filename.into();
        let kind = MediaKind::from_mime(content_type).ok_or_else(|| MediaError::UnsupportedType {
            content_type: content_type.to_string(),
        })?;

        let size = bytes.len() as u64;
        if size > kind.max_size_bytes() {
            return Err(MediaError::TooLarge {
                filename,
                kind,
                limit_mb: kind.max_size_bytes() / (1024 * 1024),
            });
        }

        let data_url = format!("data:{};base64,{}", content_type, STANDARD.encode(bytes));
        Ok(Self {
            kind,
            data_url,
            filename,
            size,
        })
    }

    /// Wrap an already-encoded data URL
    pub fn from_data_url(kind: MediaKind, data_url: impl Into<String>) -> Self {
        Self {
            kind,
            data_url: data_url.into(),
            filename: String::new(),
            size: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("image/png", Some(MediaKind::Image); "png is image")]
    #[test_case("image/webp", Some(MediaKind::Image); "webp is image")]
    #[test_case("audio/wav", Some(MediaKind::Audio); "wav is audio")]
    #[test_case("video/mp4", Some(MediaKind::Video); "mp4 is video")]
    #[test_case("application/pdf", None; "pdf is unsupported")]
    #[test_case("", None; "empty is unsupported")]
    fn detects_kind_from_mime(content_type: &str, expected: Option<MediaKind>) {
        assert_eq!(MediaKind::from_mime(content_type), expected);
    }

    #[test]
    fn encodes_bytes_into_data_url() {
        let attachment = Attachment::from_bytes("clip.wav", "audio/wav", b"ABC").unwrap();
        assert_eq!(attachment.kind, MediaKind::Audio);
        assert_eq!(attachment.data_url, "data:audio/wav;base64,QUJD");
        assert_eq!(attachment.filename, "clip.wav");
        assert_eq!(attachment.size, 3);
    }

    #[test]
    fn rejects_unsupported_mime() {
        let err = Attachment::from_bytes("doc.pdf", "application/pdf", b"%PDF").unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedType { .. }));
    }

    #[test]
    fn rejects_oversized_payload() {
        let bytes = vec![0u8; (MediaKind::Image.max_size_bytes() + 1) as usize];
        let err = Attachment::from_bytes("big.png", "image/png", &bytes).unwrap_err();
        match err {
            MediaError::TooLarge { kind, limit_mb, .. } => {
                assert_eq!(kind, MediaKind::Image);
                assert_eq!(limit_mb, 10);
            }
            other => panic!("Expected TooLarge, got: {:?}", other),
        }
    }
}
