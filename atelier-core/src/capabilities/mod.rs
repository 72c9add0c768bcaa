//! Model capability taxonomy
//!
//! Playground models advertise the modalities they accept and produce as
//! plain strings. This module turns those advertisements into typed
//! capability sets and derives the classification the catalog UI groups
//! models by.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A content kind a model accepts as input or produces as output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Audio,
    Video,
}

impl Modality {
    /// Parse a wire modality string; unknown strings yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Modality::Text),
            "image" => Some(Modality::Image),
            "audio" => Some(Modality::Audio),
            "video" => Some(Modality::Video),
            _ => None,
        }
    }

    /// Wire name of this modality
    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Audio => "audio",
            Modality::Video => "video",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input and output modality sets for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    /// Modalities the model accepts
    pub input: HashSet<Modality>,

    /// Modalities the model can generate
    pub output: HashSet<Modality>,
}

impl Default for ModelCapabilities {
    fn default() -> Self {
        Self::text_only()
    }
}

impl ModelCapabilities {
    /// Text-in, text-out capabilities
    pub fn text_only() -> Self {
        let mut input = HashSet::new();
        input.insert(Modality::Text);

        let mut output = HashSet::new();
        output.insert(Modality::Text);

        Self { input, output }
    }

    /// Build capabilities from advertised modality strings
    ///
    /// Unknown strings are skipped. A model that advertises nothing usable
    /// on either side falls back to text for that side.
    pub fn from_modalities(input: &[String], output: &[String]) -> Self {
        let mut parsed_input: HashSet<Modality> =
            input.iter().filter_map(|m| Modality::parse(m)).collect();
        let mut parsed_output: HashSet<Modality> =
            output.iter().filter_map(|m| Modality::parse(m)).collect();

        if parsed_input.is_empty() {
            parsed_input.insert(Modality::Text);
        }
        if parsed_output.is_empty() {
            parsed_output.insert(Modality::Text);
        }

        Self {
            input: parsed_input,
            output: parsed_output,
        }
    }

    /// Check if a specific input modality is supported
    pub fn supports_input(&self, modality: Modality) -> bool {
        self.input.contains(&modality)
    }

    /// Check if a specific output modality is supported
    pub fn supports_output(&self, modality: Modality) -> bool {
        self.output.contains(&modality)
    }

    /// True for models that generate images but cannot stream text
    ///
    /// Such models must use the atomic completion path instead of the
    /// incremental stream.
    pub fn generation_only(&self) -> bool {
        self.supports_output(Modality::Image) && !self.supports_output(Modality::Text)
    }

    /// Output modalities as wire strings, in a stable order
    pub fn output_modalities(&self) -> Vec<String> {
        [Modality::Text, Modality::Image, Modality::Audio, Modality::Video]
            .into_iter()
            .filter(|m| self.output.contains(m))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Catalog grouping derived from a model's capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelCategory {
    Text,
    Vision,
    ImageGeneration,
    Audio,
}

impl ModelCategory {
    /// Classify a model by its capabilities
    ///
    /// Image output wins over everything else, then audio on either side,
    /// then visual input, then plain text.
    pub fn for_capabilities(capabilities: &ModelCapabilities) -> Self {
        if capabilities.supports_output(Modality::Image) {
            return ModelCategory::ImageGeneration;
        }
        if capabilities.supports_input(Modality::Audio) || capabilities.supports_output(Modality::Audio)
        {
            return ModelCategory::Audio;
        }
        if capabilities.supports_input(Modality::Image) || capabilities.supports_input(Modality::Video)
        {
            return ModelCategory::Vision;
        }
        ModelCategory::Text
    }

    /// Wire name used by the catalog search endpoint
    pub fn as_str(self) -> &'static str {
        match self {
            ModelCategory::Text => "text",
            ModelCategory::Vision => "vision",
            ModelCategory::ImageGeneration => "image_generation",
            ModelCategory::Audio => "audio",
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
