//! A video generator that performs no I/O.

use async_trait::async_trait;
use clapper_error::ClapperResult;
use clapper_interface::{VideoArtifact, VideoGenerator, VideoRequest};
use tracing::info;

/// Accepts every request and returns an empty clip.
///
/// Dry runs still build and validate the full request, so mistakes in
/// prompts or reference images show up before anything is spent.
#[derive(Debug, Clone)]
pub struct DryRunVideoGenerator {
    model: String,
}

impl DryRunVideoGenerator {
    /// Generator reporting `model` as its model name.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

#[async_trait]
impl VideoGenerator for DryRunVideoGenerator {
    async fn generate_video(&self, request: &VideoRequest) -> ClapperResult<VideoArtifact> {
        info!(request = %request.summary(), "Dry run, skipping video generation");
        Ok(VideoArtifact::mp4(Vec::new(), None))
    }

    fn provider_name(&self) -> &'static str {
        "dry-run"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
