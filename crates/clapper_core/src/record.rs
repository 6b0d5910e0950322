//! Ledger record shapes.

use crate::{Resolution, SceneName, TakeNumber};
use serde::{Deserialize, Serialize};

/// Where a clip came from.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClipSource {
    /// Generated through the Gemini API
    #[default]
    Gemini,
    /// Downloaded by hand from the web UI and imported
    Web,
}

/// One line of the take ledger.
///
/// Records are appended and never rewritten. Optional fields absent from
/// older lines deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeRecord {
    /// RFC 3339 local time the take was recorded
    pub timestamp: String,
    /// Scene the take belongs to
    pub scene: SceneName,
    /// Take number within the scene
    pub take: TakeNumber,
    /// Prompt text sent to the model
    pub prompt: String,
    /// Model identifier
    pub model: String,
    /// Output resolution
    pub resolution: Resolution,
    /// Clip duration in seconds
    pub duration: u32,
    /// Estimated cost in USD
    #[serde(default)]
    pub cost_estimate: f64,
    /// Clip filename inside the exports directory
    pub filename: String,
    /// Size of the stored clip
    #[serde(default)]
    pub file_size_bytes: u64,
    /// SHA-256 of the stored clip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,
    /// Styleframe used to condition the generation
    #[serde(default)]
    pub reference_image: Option<String>,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Generated or imported
    #[serde(default)]
    pub source: ClipSource,
    /// Remote long-running operation name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Quality label
    #[serde(default = "default_quality")]
    pub quality: String,
}

fn default_quality() -> String {
    "high".to_string()
}

/// One line of the LLM usage ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmUsageRecord {
    /// RFC 3339 local time of the call
    pub timestamp: String,
    /// Model that served the call
    pub model: String,
    /// Prompt tokens
    pub input_tokens: u64,
    /// Completion tokens
    pub output_tokens: u64,
    /// Prompt cost in USD
    pub input_cost: f64,
    /// Completion cost in USD
    pub output_cost: f64,
    /// Call cost in USD
    pub total_cost: f64,
    /// Running total across the ledger including this call
    pub cumulative_cost: f64,
}
