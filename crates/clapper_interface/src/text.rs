//! Chat request and response types.

use serde::{Deserialize, Serialize};

/// A single-turn chat request.
///
/// ```
/// use clapper_interface::ChatRequest;
///
/// let request = ChatRequest::new("Enhance this prompt: storm wall")
///     .with_system_prompt("You are a cinematographer")
///     .with_max_tokens(200)
///     .with_temperature(0.6);
/// assert_eq!(request.max_tokens, Some(200));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Optional system instructions
    pub system_prompt: Option<String>,
    /// User message
    pub prompt: String,
    /// Completion budget, `None` for the sender's default
    pub max_tokens: Option<u32>,
    /// Sampling temperature, `None` for the sender's default
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Request that leaves budget and temperature to the sender.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set the system prompt.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Set the completion budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Token counts reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub input_tokens: u64,
    /// Completion tokens
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Sum of both directions.
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A completed chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant message text
    pub content: String,
    /// Token counts
    pub usage: TokenUsage,
    /// Model that answered
    pub model: String,
}
