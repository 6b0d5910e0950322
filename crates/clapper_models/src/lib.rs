//! Provider clients for Clapper.
//!
//! - [`GeminiVeoClient`]: Veo video generation over the Gemini REST API
//! - [`OpenAiClient`]: chat completions for prompt enhancement
//! - [`DryRunVideoGenerator`]: a [`VideoGenerator`](clapper_interface::VideoGenerator)
//!   that never leaves the process
//!
//! Every network call is wrapped in [`retry_with_backoff`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dry_run;
mod gemini;
mod openai;
mod retry;

pub use dry_run::DryRunVideoGenerator;
pub use gemini::{
    GeminiVeoClient, GenerateVideoResponse, GeneratedSample, GeneratedVideo, InlineImage,
    MIN_POLL_INTERVAL, Operation, OperationError, OperationResponse, PredictInstance,
    PredictParameters, PredictRequest, VideoSource,
};
pub use openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAiClient,
    OpenAiUsage,
};
pub use retry::{RetryOverrides, retry_with_backoff};
