//! Cost estimation for video generation and LLM calls.

use crate::Resolution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Round a dollar amount to six decimal places, as stored in ledgers.
pub fn round_cost(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Per-second video generation rates in USD.
///
/// # Examples
///
/// ```
/// use clapper_core::{Resolution, VideoPricing};
///
/// let pricing = VideoPricing::default();
/// assert_eq!(pricing.estimate(Resolution::P720, 8), 0.3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct VideoPricing {
    /// Rate for 720p output
    #[serde(rename = "720p", default = "default_720p")]
    per_second_720p: f64,
    /// Rate for 1080p output
    #[serde(rename = "1080p", default = "default_1080p")]
    per_second_1080p: f64,
    /// Rate for 4K output
    #[serde(rename = "4k", default = "default_4k")]
    per_second_4k: f64,
}

fn default_720p() -> f64 {
    0.0375
}

fn default_1080p() -> f64 {
    0.075
}

fn default_4k() -> f64 {
    0.15
}

impl Default for VideoPricing {
    fn default() -> Self {
        Self {
            per_second_720p: default_720p(),
            per_second_1080p: default_1080p(),
            per_second_4k: default_4k(),
        }
    }
}

impl VideoPricing {
    /// Construct explicit rates.
    pub fn new(per_second_720p: f64, per_second_1080p: f64, per_second_4k: f64) -> Self {
        Self {
            per_second_720p,
            per_second_1080p,
            per_second_4k,
        }
    }

    /// Rate per second for a resolution.
    pub fn rate(&self, resolution: Resolution) -> f64 {
        match resolution {
            Resolution::P720 => self.per_second_720p,
            Resolution::P1080 => self.per_second_1080p,
            Resolution::P4k => self.per_second_4k,
        }
    }

    /// Estimated cost of a clip.
    pub fn estimate(&self, resolution: Resolution, duration_secs: u32) -> f64 {
        round_cost(self.rate(resolution) * f64::from(duration_secs))
    }
}

/// Per-million-token rates for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRates {
    /// USD per million input tokens
    pub input: f64,
    /// USD per million output tokens
    pub output: f64,
}

/// Cost breakdown of a single LLM call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LlmCost {
    /// Cost of prompt tokens
    pub input: f64,
    /// Cost of completion tokens
    pub output: f64,
    /// Sum of both
    pub total: f64,
}

/// Token pricing table for chat models.
///
/// Unknown models are priced at the fallback model's rates.
///
/// ```
/// use clapper_core::LlmPricing;
///
/// let pricing = LlmPricing::default();
/// let cost = pricing.cost("gpt-4o-mini", 1_000_000, 1_000_000);
/// assert_eq!(cost.total, 0.75);
///
/// let unknown = pricing.cost("some-new-model", 1_000_000, 0);
/// assert_eq!(unknown.input, 0.15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct LlmPricing {
    /// Model whose rates apply to unknown models
    #[serde(default = "default_fallback_model")]
    fallback_model: String,
    /// Rates keyed by model name
    #[serde(default = "default_model_rates")]
    models: BTreeMap<String, ModelRates>,
}

fn default_fallback_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_model_rates() -> BTreeMap<String, ModelRates> {
    BTreeMap::from([
        (
            "gpt-4o-mini".to_string(),
            ModelRates {
                input: 0.15,
                output: 0.60,
            },
        ),
        (
            "gpt-4o".to_string(),
            ModelRates {
                input: 2.50,
                output: 10.00,
            },
        ),
    ])
}

impl Default for LlmPricing {
    fn default() -> Self {
        Self {
            fallback_model: default_fallback_model(),
            models: default_model_rates(),
        }
    }
}

impl LlmPricing {
    /// Construct a pricing table.
    pub fn new(fallback_model: impl Into<String>, models: BTreeMap<String, ModelRates>) -> Self {
        Self {
            fallback_model: fallback_model.into(),
            models,
        }
    }

    /// Rates for a model, falling back to the fallback model, then to zero.
    pub fn rates(&self, model: &str) -> ModelRates {
        self.models
            .get(model)
            .or_else(|| self.models.get(&self.fallback_model))
            .copied()
            .unwrap_or(ModelRates {
                input: 0.0,
                output: 0.0,
            })
    }

    /// Cost of a call, each component rounded to six decimals.
    pub fn cost(&self, model: &str, input_tokens: u64, output_tokens: u64) -> LlmCost {
        let rates = self.rates(model);
        let input = input_tokens as f64 / 1_000_000.0 * rates.input;
        let output = output_tokens as f64 / 1_000_000.0 * rates.output;
        LlmCost {
            input: round_cost(input),
            output: round_cost(output),
            total: round_cost(input + output),
        }
    }
}
