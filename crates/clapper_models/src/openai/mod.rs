//! OpenAI chat completions.

mod client;
mod dto;

pub use client::OpenAiClient;
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAiUsage,
};
