//! Model catalog wire types
//!
//! These shapes match the catalog endpoints of the playground service. The
//! service formats each model with its advertised modalities and pricing;
//! missing modality lists default to text, mirroring the service's own
//! fallback.

use crate::capabilities::{ModelCapabilities, ModelCategory};
use serde::{Deserialize, Serialize};

fn default_modalities() -> Vec<String> {
    vec!["text".to_string()]
}

/// Per-token pricing advertised for a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelPricing {
    #[serde(default)]
    pub prompt: String,

    #[serde(default)]
    pub completion: String,
}

/// One model in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Opaque model identifier, e.g. "openai/gpt-4o"
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub context_length: Option<u64>,

    #[serde(default)]
    pub max_completion_tokens: Option<u64>,

    /// Modalities the model accepts, as wire strings
    #[serde(default = "default_modalities")]
    pub input_modalities: Vec<String>,

    /// Modalities the model can generate, as wire strings
    #[serde(default = "default_modalities")]
    pub output_modalities: Vec<String>,

    /// Combined modality label, e.g. "text+image->text"
    #[serde(default)]
    pub modality: Option<String>,

    #[serde(default)]
    pub pricing: Option<ModelPricing>,

    /// Generation parameters the model accepts
    #[serde(default)]
    pub supported_parameters: Vec<String>,
}

impl ModelInfo {
    /// Typed capability sets extracted from the advertised modalities
    pub fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::from_modalities(&self.input_modalities, &self.output_modalities)
    }

    /// Catalog grouping for this model
    pub fn category(&self) -> ModelCategory {
        ModelCategory::for_capabilities(&self.capabilities())
    }
}

/// Models grouped by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CategorizedModels {
    #[serde(default)]
    pub text: Vec<ModelInfo>,

    #[serde(default)]
    pub vision: Vec<ModelInfo>,

    #[serde(default)]
    pub image_generation: Vec<ModelInfo>,

    #[serde(default)]
    pub audio: Vec<ModelInfo>,
}

/// Response of the catalog listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelsResponse {
    #[serde(default)]
    pub categorized: CategorizedModels,

    #[serde(default)]
    pub all: Vec<ModelInfo>,
}

/// Response of the catalog search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}
