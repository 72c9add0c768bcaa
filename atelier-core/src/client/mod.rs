//! HTTP client for the playground service
//!
//! This module implements the transport layer of the client core:
//! - Streamed chat over server-sent events
//! - The atomic completion path for generation-only models
//! - Model catalog lookups
//! - Request ID generation and correlation
//!
//! Transport failures (non-success status, send failure) are hard errors
//! reported once, before any output; everything that goes wrong inside a
//! healthy stream is absorbed by the decoder.

mod error;
pub mod models;
pub mod streaming;

pub use error::{ClientError, ClientResult};
pub use streaming::{decode_chunks, ChunkStream, SseDecoder, StreamCollector};

use crate::capabilities::{ModelCapabilities, ModelCategory};
use crate::config::{ClientConfig, ConfigError};
use crate::protocol::{ChatRequest, Completion};
use async_trait::async_trait;
use error::api_error_message;
use models::{ModelInfo, ModelsResponse, SearchResponse};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Default user agent
const USER_AGENT: &str = "atelier/0.1.0";

/// API call kinds and their endpoint paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    ChatStream,
    ChatComplete,
    Models,
    ModelSearch,
    Health,
}

impl CallKind {
    /// Get the endpoint path for this call kind
    fn endpoint(self) -> &'static str {
        match self {
            CallKind::ChatStream => "/api/chat/stream",
            CallKind::ChatComplete => "/api/chat/complete",
            CallKind::Models => "/api/models/",
            CallKind::ModelSearch => "/api/models/search",
            CallKind::Health => "/health",
        }
    }
}

/// Outcome of a capability-routed chat call
pub enum ChatOutcome {
    /// Incremental delivery; render chunks as they arrive
    Streamed(ChunkStream),
    /// Atomic delivery from the completion path
    Completed(Completion),
}

/// Operations the playground service exposes to clients
///
/// The trait is the seam for substituting test doubles; the real
/// implementation is [`PlaygroundClient`].
#[async_trait]
pub trait PlaygroundApi: Send + Sync {
    /// Start a streamed chat exchange
    ///
    /// A transport failure is reported here, before any chunk is yielded;
    /// the returned stream itself never errors.
    async fn chat_stream(&self, request: &ChatRequest) -> ClientResult<ChunkStream>;

    /// Run a single non-streaming chat exchange
    async fn chat_complete(&self, request: &ChatRequest) -> ClientResult<Completion>;

    /// Route a chat call by model capabilities
    ///
    /// Generation-only models (image out, no text out) cannot stream and go
    /// through the completion path; everything else streams.
    async fn chat(
        &self,
        request: &ChatRequest,
        capabilities: &ModelCapabilities,
    ) -> ClientResult<ChatOutcome> {
        if capabilities.generation_only() {
            Ok(ChatOutcome::Completed(self.chat_complete(request).await?))
        } else {
            Ok(ChatOutcome::Streamed(self.chat_stream(request).await?))
        }
    }

    /// Fetch the categorized model catalog
    async fn list_models(&self) -> ClientResult<ModelsResponse>;

    /// Search the catalog by free text and optional category
    async fn search_models(
        &self,
        query: &str,
        category: Option<ModelCategory>,
    ) -> ClientResult<Vec<ModelInfo>>;

    /// Fetch a single model by id
    async fn model_info(&self, model_id: &str) -> ClientResult<ModelInfo>;

    /// Check service reachability
    async fn health_check(&self) -> ClientResult<()>;
}

/// Client for the playground service with a pooled HTTP connection
pub struct PlaygroundClient {
    config: ClientConfig,
    http: Client,
}

impl PlaygroundClient {
    /// Create a new client from a validated configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| ConfigError::Invalid {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { config, http })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the full URL for a call kind
    fn endpoint_url(&self, call_kind: CallKind) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            call_kind.endpoint()
        )
    }

    /// Attach correlation and auth headers
    fn apply_headers(&self, builder: RequestBuilder, request_id: Uuid) -> RequestBuilder {
        let mut builder = builder.header("X-Request-ID", request_id.to_string());
        if let Some(api_key) = &self.config.api_key {
            builder = builder.header(
                "Authorization",
                format!("Bearer {}", api_key.expose_secret()),
            );
        }
        builder
    }

    /// Surface a non-success status as the one hard error of the exchange
    async fn ensure_success(response: Response, request_id: Uuid) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            "Request failed with status {} [request_id: {}]",
            status, request_id
        );
        Err(ClientError::Api {
            status: status.as_u16(),
            message: api_error_message(status, &body),
        })
    }

    /// Send a request and parse the JSON response body
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        request_id: Uuid,
    ) -> ClientResult<T> {
        let response = self
            .apply_headers(builder, request_id)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?;
        let response = Self::ensure_success(response, request_id).await?;

        let body = response.text().await.map_err(ClientError::from)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PlaygroundApi for PlaygroundClient {
    async fn chat_stream(&self, request: &ChatRequest) -> ClientResult<ChunkStream> {
        let request_id = Uuid::new_v4();
        let url = self.endpoint_url(CallKind::ChatStream);
        info!(
            "Starting streamed chat with model {} [request_id: {}]",
            request.model, request_id
        );
        debug!("Request URL: {} [request_id: {}]", url, request_id);

        // No total timeout here: a stream lives until it terminates or the
        // consumer abandons it.
        let response = self
            .apply_headers(self.http.post(&url), request_id)
            .json(request)
            .send()
            .await?;
        let response = Self::ensure_success(response, request_id).await?;

        Ok(streaming::decode_chunks(response.bytes_stream()))
    }

    async fn chat_complete(&self, request: &ChatRequest) -> ClientResult<Completion> {
        let request_id = Uuid::new_v4();
        let url = self.endpoint_url(CallKind::ChatComplete);
        info!(
            "Requesting completion from model {} [request_id: {}]",
            request.model, request_id
        );
        debug!("Request URL: {} [request_id: {}]", url, request_id);

        self.send_json(self.http.post(&url).json(request), request_id)
            .await
    }

    async fn list_models(&self) -> ClientResult<ModelsResponse> {
        let request_id = Uuid::new_v4();
        let url = self.endpoint_url(CallKind::Models);
        debug!("Request URL: {} [request_id: {}]", url, request_id);

        self.send_json(self.http.get(&url), request_id).await
    }

    async fn search_models(
        &self,
        query: &str,
        category: Option<ModelCategory>,
    ) -> ClientResult<Vec<ModelInfo>> {
        let request_id = Uuid::new_v4();
        let url = self.endpoint_url(CallKind::ModelSearch);
        debug!("Request URL: {} [request_id: {}]", url, request_id);

        let mut params: Vec<(&str, &str)> = Vec::new();
        if !query.is_empty() {
            params.push(("q", query));
        }
        if let Some(category) = category {
            params.push(("category", category.as_str()));
        }

        let response: SearchResponse = self
            .send_json(self.http.get(&url).query(&params), request_id)
            .await?;
        Ok(response.models)
    }

    async fn model_info(&self, model_id: &str) -> ClientResult<ModelInfo> {
        let request_id = Uuid::new_v4();
        // Model ids contain slashes; the service routes them as a raw path.
        let url = format!(
            "{}/api/models/{}",
            self.config.base_url.trim_end_matches('/'),
            model_id
        );
        debug!("Request URL: {} [request_id: {}]", url, request_id);

        let value: serde_json::Value = self.send_json(self.http.get(&url), request_id).await?;

        // The service answers unknown ids with a 200 error body.
        if value.get("error").is_some() {
            return Err(ClientError::ModelNotFound(model_id.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    async fn health_check(&self) -> ClientResult<()> {
        let request_id = Uuid::new_v4();
        let url = self.endpoint_url(CallKind::Health);

        let response = self
            .apply_headers(self.http.get(&url), request_id)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?;
        Self::ensure_success(response, request_id).await?;
        Ok(())
    }
}
