//! Generation traits.

use crate::{ChatRequest, ChatResponse, VideoArtifact, VideoRequest};
use async_trait::async_trait;
use clapper_error::ClapperResult;

/// A backend that turns a prompt into a video clip.
///
/// Implementations handle submission, waiting and download; callers receive
/// the finished bytes.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Generate a clip for the request.
    async fn generate_video(&self, request: &VideoRequest) -> ClapperResult<VideoArtifact>;

    /// Provider name (e.g., "gemini", "dry-run").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "veo-3.0-generate-preview").
    fn model_name(&self) -> &str;
}

/// A chat model used for prompt work.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a single-turn chat.
    async fn chat(&self, request: &ChatRequest) -> ClapperResult<ChatResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}
