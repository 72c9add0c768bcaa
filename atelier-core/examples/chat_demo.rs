//! Chat demo - request assembly and stream decoding end to end
//!
//! Builds a multimodal request the way a UI would, shows the exact wire
//! body, then decodes a canned event-stream transcript. If a playground
//! service is reachable (set ATELIER_BASE_URL), it also runs a health check
//! and lists a few models.
//!
//! Run with: cargo run --example chat_demo

use anyhow::Result;
use atelier_core::{
    Attachment, ChatRequest, ClientConfig, Conversation, HyperParams, PlaygroundApi,
    PlaygroundClient, SseDecoder, StreamCollector,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Assemble a request with an attached image, exactly as the UI does.
    let image = Attachment::from_bytes("pixel.png", "image/png", &[0x89, 0x50, 0x4e, 0x47])?;

    let mut conversation = Conversation::new().with_system_prompt("You are a helpful assistant.");
    conversation.push_user("hi", vec![]);
    conversation.push_assistant("Hello! How can I help?");

    let request = ChatRequest::new(
        "openai/gpt-4o",
        conversation.request_messages("What is in this picture?", &[image]),
    )
    .with_hyper_params(HyperParams::default())
    .with_modalities(vec!["text".to_string()]);

    println!("Request body:");
    println!("{}", serde_json::to_string_pretty(&request)?);

    // Decode a canned transcript the way the live stream is decoded.
    let transcript = concat!(
        "data: {\"type\":\"text\",\"content\":\"A single \"}\n\n",
        "data: {\"type\":\"text\",\"content\":\"dark pixel.\"}\n\n",
        "data: [DONE]\n\n",
    );

    let mut decoder = SseDecoder::new();
    let mut collector = StreamCollector::new();
    for chunk in decoder.feed(transcript.as_bytes()) {
        collector.push(&chunk);
    }
    println!("\nDecoded transcript: {:?}", collector.text());

    // Talk to a real service when one is configured.
    let client = PlaygroundClient::new(ClientConfig::from_env()?)?;
    match client.health_check().await {
        Ok(()) => {
            let catalog = client.list_models().await?;
            println!("\nService is up; {} models available", catalog.all.len());
            for model in catalog.all.iter().take(5) {
                println!("  {} [{}]", model.id, model.category());
            }
        }
        Err(e) => {
            println!("\nNo playground service reachable ({}); skipping live calls", e);
        }
    }

    Ok(())
}
