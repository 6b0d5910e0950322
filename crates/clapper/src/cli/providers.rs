//! Provider clients built from project configuration.

use clapper_error::ClapperResult;
use clapper_models::{GeminiVeoClient, OpenAiClient, RetryOverrides};
use clapper_pipeline::{LlmSession, Project};
use std::time::Duration;
use tracing::{info, warn};

/// Gemini Veo client configured from the `generation` section.
pub fn veo_client(project: &Project) -> ClapperResult<GeminiVeoClient> {
    let generation = &project.config().generation;
    Ok(GeminiVeoClient::new(&generation.model)?
        .with_base_url(&generation.api_base_url)
        .with_poll_interval(Duration::from_secs(generation.poll_interval_secs))
        .with_max_wait(Duration::from_secs(generation.max_wait_secs)))
}

/// Tracked chat session, or `None` when no OpenAI key is available.
pub fn llm_session(project: &Project) -> Option<LlmSession<OpenAiClient>> {
    let llm = &project.config().llm;
    match OpenAiClient::new(&llm.model) {
        Ok(client) => {
            let client = client
                .with_base_url(&llm.api_base_url)
                .with_retry_overrides(RetryOverrides {
                    max_retries: Some(llm.max_retries),
                    ..RetryOverrides::default()
                });
            info!(model = %llm.model, "LLM enhancement enabled");
            Some(LlmSession::new(client, project.layout(), project.config()))
        }
        Err(e) => {
            warn!(error = %e, "LLM enhancement unavailable, using templates");
            None
        }
    }
}
