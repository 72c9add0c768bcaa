//! Streaming support for chat responses
//!
//! The service frames streamed responses as server-sent events, one JSON
//! chunk per `data: ` line, terminated by a `data: [DONE]` sentinel. The
//! decoder here is a single-owner accumulator: one carry-over buffer per
//! active stream, never shared. Malformed frames are skipped, not fatal;
//! termination by sentinel and by connection close look the same to the
//! consumer.

use crate::protocol::{Completion, StreamChunk};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::warn;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// A lazy sequence of decoded stream chunks
pub type ChunkStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

/// Incremental decoder for the event-stream framing
///
/// Bytes are buffered until a full `\n`-terminated line is available, so a
/// line (or a multi-byte UTF-8 character) split across network reads is
/// reassembled before decoding. The decoded chunk sequence is therefore
/// independent of where read boundaries fall.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    /// Create a fresh decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the `[DONE]` sentinel has been observed
    ///
    /// A finished decoder ignores all further input.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one network read and collect the chunks it completes
    ///
    /// The trailing incomplete line fragment is retained for the next feed
    /// and never yielded early. On the sentinel, decoding stops immediately
    /// and the rest of the buffer is discarded without error.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamChunk> {
        let mut chunks = Vec::new();
        if self.done {
            return chunks;
        }

        self.buffer.extend_from_slice(bytes);

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);

            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            let payload = payload.trim();

            if payload == DONE_SENTINEL {
                self.done = true;
                self.buffer.clear();
                break;
            }

            match serde_json::from_str::<StreamChunk>(payload) {
                Ok(chunk) => chunks.push(chunk),
                Err(e) => {
                    // Log parsing error but continue the stream
                    warn!("Failed to parse stream chunk: {}", e);
                }
            }
        }

        chunks
    }
}

/// Decode a raw byte stream into a lazy chunk stream
///
/// Suspends at each read boundary and resumes when more bytes arrive. The
/// stream ends at the sentinel, at end-of-input, or at a mid-stream read
/// error - the three are indistinguishable to the consumer. Once ended, no
/// further reads are attempted; dropping the stream releases the transport.
pub fn decode_chunks<S>(stream: S) -> ChunkStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    let state = (Box::pin(stream), SseDecoder::new(), VecDeque::new());

    Box::pin(futures::stream::unfold(
        state,
        |(mut stream, mut decoder, mut pending)| async move {
            loop {
                if let Some(chunk) = pending.pop_front() {
                    return Some((chunk, (stream, decoder, pending)));
                }
                if decoder.is_done() {
                    return None;
                }
                match stream.next().await {
                    Some(Ok(bytes)) => pending.extend(decoder.feed(&bytes)),
                    Some(Err(e)) => {
                        warn!("Stream read failed, ending stream: {}", e);
                        return None;
                    }
                    None => return None,
                }
            }
        },
    ))
}

/// Folds a chunk sequence into an aggregate result
///
/// Text deltas are concatenated in arrival order and image URLs collected;
/// in-band error chunks are kept aside, and unrecognized chunks are ignored.
#[derive(Debug, Default)]
pub struct StreamCollector {
    text: String,
    images: Vec<String>,
    errors: Vec<String>,
}

impl StreamCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one chunk
    pub fn push(&mut self, chunk: &StreamChunk) {
        match chunk {
            StreamChunk::Text { content } => self.text.push_str(content),
            StreamChunk::Image { url } => self.images.push(url.clone()),
            StreamChunk::Error { content } => self.errors.push(content.clone()),
            StreamChunk::Other(_) => {}
        }
    }

    /// Accumulated text so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Image URLs seen so far
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// In-band errors seen so far
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Finish collection, producing the aggregate completion
    pub fn into_completion(self) -> Completion {
        Completion {
            text: self.text,
            images: self.images,
            audio: Vec::new(),
        }
    }
}
