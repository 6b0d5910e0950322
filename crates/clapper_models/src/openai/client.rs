//! OpenAI chat client.

use super::dto::{ChatCompletionRequest, ChatCompletionResponse};
use crate::{RetryOverrides, retry_with_backoff};
use async_trait::async_trait;
use clapper_error::{ClapperResult, OpenAiError, OpenAiErrorKind};
use clapper_interface::{ChatRequest, ChatResponse, TextGenerator};
use reqwest::Client;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryOverrides,
}

impl OpenAiClient {
    /// Client authenticated with `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiErrorKind::MissingApiKey`] when the variable is unset or empty.
    pub fn new(model: impl Into<String>) -> ClapperResult<Self> {
        Self::from_lookup(model, |key| std::env::var(key).ok())
    }

    /// Client whose API key comes from `lookup("OPENAI_API_KEY")`.
    pub fn from_lookup(
        model: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ClapperResult<Self> {
        let api_key = lookup("OPENAI_API_KEY").unwrap_or_default();
        Self::with_api_key(api_key, model)
    }

    /// Client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> ClapperResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OpenAiError::new(OpenAiErrorKind::MissingApiKey).into());
        }
        let client = Client::builder()
            .build()
            .map_err(|e| OpenAiError::new(OpenAiErrorKind::Request(e.to_string())))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            retry: RetryOverrides::default(),
        })
    }

    /// Point at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the retry schedule.
    pub fn with_retry_overrides(mut self, retry: RetryOverrides) -> Self {
        self.retry = retry;
        self
    }

    /// Send one completion request, retrying transient failures.
    #[instrument(skip(self, body), fields(model = %body.model, max_tokens = body.max_tokens))]
    pub async fn complete(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let url = format!("{}/chat/completions", self.base_url);

        retry_with_backoff(self.retry, || {
            let request = self
                .client
                .post(url.clone())
                .bearer_auth(self.api_key.clone())
                .json(body);
            async move { send(request).await }
        })
        .await
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<ChatCompletionResponse, OpenAiError> {
    let response = request
        .send()
        .await
        .map_err(|e| OpenAiError::new(OpenAiErrorKind::Request(e.to_string())))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), message = %message, "OpenAI API error");
        return Err(OpenAiError::new(OpenAiErrorKind::Api {
            status: status.as_u16(),
            message,
        }));
    }

    response
        .json()
        .await
        .map_err(|e| OpenAiError::new(OpenAiErrorKind::Parse(e.to_string())))
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn chat(&self, request: &ChatRequest) -> ClapperResult<ChatResponse> {
        let body = ChatCompletionRequest::from_chat(&self.model, request);
        let response = self.complete(&body).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OpenAiError::new(OpenAiErrorKind::EmptyResponse))?;

        debug!(
            input_tokens = response.usage.prompt_tokens,
            output_tokens = response.usage.completion_tokens,
            "OpenAI completion received"
        );

        let model = if response.model.is_empty() {
            self.model.clone()
        } else {
            response.model
        };

        Ok(ChatResponse {
            content: choice.message.content.trim().to_string(),
            usage: response.usage.into(),
            model,
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
