//! Veo video generation through the Gemini REST API.
//!
//! Generation is a long-running operation:
//!
//! 1. `POST {base}/models/{model}:predictLongRunning` returns an operation name
//! 2. `GET {base}/{operation}` is polled until `done`
//! 3. The finished operation points at the clip, which is downloaded

mod client;
mod dto;

pub use client::{GeminiVeoClient, MIN_POLL_INTERVAL};
pub use dto::{
    GenerateVideoResponse, GeneratedSample, GeneratedVideo, InlineImage, Operation,
    OperationError, OperationResponse, PredictInstance, PredictParameters, PredictRequest,
    VideoSource,
};
