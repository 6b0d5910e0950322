//! Gemini Veo REST client.

use super::dto::{Operation, PredictRequest, VideoSource};
use crate::{RetryOverrides, retry_with_backoff};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clapper_error::{ClapperResult, GeminiError, GeminiErrorKind, RetryableError};
use clapper_interface::{VideoArtifact, VideoGenerator, VideoRequest};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Floor for the poll interval; shorter values are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

type GeminiResult<T> = Result<T, GeminiError>;

/// Veo client over the Gemini REST API.
///
/// # Examples
///
/// ```no_run
/// use clapper_models::GeminiVeoClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiVeoClient::new("veo-3.0-generate-preview")?
///     .with_poll_interval(Duration::from_secs(15))
///     .with_max_wait(Duration::from_secs(600));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeminiVeoClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    poll_interval: Duration,
    max_wait: Duration,
    retry: RetryOverrides,
}

impl GeminiVeoClient {
    /// Client authenticated with `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] when the variable is unset or empty.
    #[instrument(skip_all, fields(model = %model.as_ref()))]
    pub fn new(model: impl AsRef<str>) -> ClapperResult<Self> {
        Self::from_lookup(model, |key| std::env::var(key).ok())
    }

    /// Client whose API key comes from `lookup("GEMINI_API_KEY")`.
    pub fn from_lookup(
        model: impl AsRef<str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ClapperResult<Self> {
        let api_key = lookup("GEMINI_API_KEY").unwrap_or_default();
        Self::with_api_key(api_key, model)
    }

    /// Client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, model: impl AsRef<str>) -> ClapperResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }
        let client = Client::builder()
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.as_ref().trim_start_matches("models/").to_string(),
            poll_interval: Duration::from_secs(15),
            max_wait: Duration::from_secs(600),
            retry: RetryOverrides::default(),
        })
    }

    /// Point at a different API root (no trailing slash needed).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Time between operation polls, at least [`MIN_POLL_INTERVAL`].
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        if poll_interval < MIN_POLL_INTERVAL {
            warn!(
                requested_ms = poll_interval.as_millis() as u64,
                "Poll interval too short, using the minimum"
            );
        }
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Longest time to wait for an operation.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Override the retry schedule.
    pub fn with_retry_overrides(mut self, retry: RetryOverrides) -> Self {
        self.retry = retry;
        self
    }

    /// Start a generation and return the pending operation.
    #[instrument(skip(self, body), fields(model = %self.model))]
    pub async fn submit(&self, body: &PredictRequest) -> GeminiResult<Operation> {
        let url = format!("{}/models/{}:predictLongRunning", self.base_url, self.model);
        debug!(url = %url, "Submitting Veo generation");

        let operation: Operation = retry_with_backoff(self.retry, || {
            let request = self
                .client
                .post(url.clone())
                .header(API_KEY_HEADER, self.api_key.clone())
                .json(body);
            async move { send_json(request).await }
        })
        .await?;

        info!(operation = %operation.name, "Veo operation started");
        Ok(operation)
    }

    /// Fetch the current state of an operation.
    #[instrument(skip(self))]
    pub async fn poll(&self, operation_name: &str) -> GeminiResult<Operation> {
        let url = format!("{}/{}", self.base_url, operation_name.trim_start_matches('/'));
        let request = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.clone());
        send_json(request).await
    }

    /// Poll until the operation finishes or `max_wait` elapses.
    ///
    /// Transient poll failures are logged and polling continues.
    #[instrument(skip(self, operation), fields(operation = %operation.name))]
    pub async fn wait_for(&self, operation: Operation) -> GeminiResult<Operation> {
        let mut current = operation;
        let started = tokio::time::Instant::now();

        while !current.done {
            let waited = started.elapsed();
            if waited >= self.max_wait {
                return Err(GeminiError::new(GeminiErrorKind::Timeout {
                    operation: current.name,
                    waited_secs: waited.as_secs(),
                }));
            }
            tokio::time::sleep(self.poll_interval).await;
            let waited = started.elapsed();

            match self.poll(&current.name).await {
                Ok(next) => current = next,
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, waited_secs = waited.as_secs(), "Polling error, will keep waiting");
                }
                Err(e) => return Err(e),
            }
            debug!(done = current.done, waited_secs = waited.as_secs(), "Polled Veo operation");
        }

        if let Some(failure) = &current.error {
            error!(code = failure.code, message = %failure.message, "Veo operation failed");
            return Err(GeminiError::new(GeminiErrorKind::OperationFailed(format!(
                "{} (code {})",
                failure.message, failure.code
            ))));
        }
        Ok(current)
    }

    /// Fetch the clip of a finished operation.
    #[instrument(skip(self, operation), fields(operation = %operation.name))]
    pub async fn download(&self, operation: &Operation) -> GeminiResult<Vec<u8>> {
        match operation.video_source() {
            Some(VideoSource::Uri(uri)) => {
                retry_with_backoff(self.retry, || {
                    let request = self
                        .client
                        .get(uri.clone())
                        .header(API_KEY_HEADER, self.api_key.clone());
                    async move { send_bytes(request).await }
                })
                .await
            }
            Some(VideoSource::Inline(encoded)) => STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string()))),
            None => Err(GeminiError::new(GeminiErrorKind::NoVideo(
                operation.name.clone(),
            ))),
        }
    }
}

#[async_trait]
impl VideoGenerator for GeminiVeoClient {
    #[instrument(skip(self, request), fields(model = %self.model, duration = request.duration_secs()))]
    async fn generate_video(&self, request: &VideoRequest) -> ClapperResult<VideoArtifact> {
        let body = PredictRequest::from(request);
        let operation = self.submit(&body).await?;
        let finished = self.wait_for(operation).await?;
        let bytes = self.download(&finished).await?;
        info!(size = bytes.len(), operation = %finished.name, "Veo clip downloaded");
        Ok(VideoArtifact::mp4(bytes, Some(finished.name)))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

async fn send(request: reqwest::RequestBuilder) -> GeminiResult<reqwest::Response> {
    let response = request
        .send()
        .await
        .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), message = %message, "Gemini API error");
        return Err(GeminiError::new(GeminiErrorKind::HttpError {
            status_code: status.as_u16(),
            message,
        }));
    }
    Ok(response)
}

async fn send_json(request: reqwest::RequestBuilder) -> GeminiResult<Operation> {
    send(request)
        .await?
        .json()
        .await
        .map_err(|e| GeminiError::new(GeminiErrorKind::InvalidResponse(e.to_string())))
}

async fn send_bytes(request: reqwest::RequestBuilder) -> GeminiResult<Vec<u8>> {
    let bytes = send(request)
        .await?
        .bytes()
        .await
        .map_err(|e| GeminiError::new(GeminiErrorKind::Download(e.to_string())))?;
    Ok(bytes.to_vec())
}
