//! Individual configuration sections.

use clapper_core::{LlmPricing, Resolution, VideoPricing};
use serde::{Deserialize, Serialize};

/// Video generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Veo model identifier
    pub model: String,
    /// Default output resolution
    pub resolution: Resolution,
    /// Default clip length in seconds
    pub duration_secs: u32,
    /// Aspect ratio passed to the model
    pub aspect_ratio: String,
    /// Seconds between operation polls
    pub poll_interval_secs: u64,
    /// Seconds to wait for an operation before giving up
    pub max_wait_secs: u64,
    /// Seconds to sleep between batch submissions
    pub batch_delay_secs: u64,
    /// Negative prompt sent with every request when non-empty
    #[serde(default)]
    pub negative_prompt: String,
    /// Gemini REST base URL
    pub api_base_url: String,
}

/// Rates used for cost estimates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Per-second video rates
    #[serde(default)]
    pub video: VideoPricing,
    /// Per-million-token chat rates
    #[serde(default)]
    pub llm: LlmPricing,
}

/// Chat model settings for prompt enhancement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat model identifier
    pub model: String,
    /// Default sampling temperature
    pub temperature: f32,
    /// Default completion budget
    pub max_tokens: u32,
    /// Attempts before a failing call is reported
    pub max_retries: usize,
    /// Whether responses are cached on disk
    pub cache_enabled: bool,
    /// OpenAI-compatible base URL
    pub api_base_url: String,
}

/// Midjourney prompt settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidjourneyConfig {
    /// Style words appended to every template
    pub style_suffix: String,
    /// Use style-reference parameters instead of the standard ones
    #[serde(default)]
    pub style_reference: bool,
    /// Standard generation parameters
    pub parameters: String,
    /// Parameters for the style-reference workflow
    pub style_reference_parameters: String,
}

impl MidjourneyConfig {
    /// The parameter string for the configured workflow.
    pub fn active_parameters(&self) -> &str {
        if self.style_reference {
            &self.style_reference_parameters
        } else {
            &self.parameters
        }
    }
}

/// Limits applied to files brought into the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Lowercase extensions without the dot
    pub allowed_extensions: Vec<String>,
    /// Largest accepted file
    pub max_file_size_mb: u64,
}

impl SafetyConfig {
    /// Whether `extension` (with or without a dot, any case) is allowed.
    pub fn allows_extension(&self, extension: &str) -> bool {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        self.allowed_extensions.iter().any(|a| a.eq_ignore_ascii_case(&ext))
    }

    /// Maximum file size in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Per-scene creative settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Short description of the scene
    #[serde(default)]
    pub description: String,
    /// Style words used by prompt templates
    #[serde(default)]
    pub style_descriptors: Vec<String>,
    /// Prompts submitted by batch generation
    #[serde(default)]
    pub default_prompts: Vec<String>,
}

impl SceneConfig {
    /// Description, or the first default prompt when the description is empty.
    pub fn base_description(&self) -> &str {
        if self.description.is_empty() {
            self.default_prompts.first().map(String::as_str).unwrap_or("")
        } else {
            &self.description
        }
    }

    /// Whether a style descriptor is present.
    pub fn has_descriptor(&self, descriptor: &str) -> bool {
        self.style_descriptors.iter().any(|d| d == descriptor)
    }
}
