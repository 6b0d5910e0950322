//! Chat calls with response caching and cost tracking.

use chrono::Local;
use clapper_config::PipelineConfig;
use clapper_core::{
    LlmPricing, LlmUsageRecord, ProjectLayout, parse_numbered_list, round_cost,
};
use clapper_error::ClapperResult;
use clapper_interface::{ChatRequest, TextGenerator};
use clapper_storage::{JsonlLedger, ResponseCache};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A completed (or cached) chat call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResult {
    /// Response text
    pub content: String,
    /// Prompt tokens
    pub input_tokens: u64,
    /// Completion tokens
    pub output_tokens: u64,
    /// Sum of both
    pub total_tokens: u64,
    /// Cost of the call in USD
    pub cost: f64,
    /// Model the call was priced for
    pub model: String,
    /// RFC 3339 time of the call
    pub timestamp: String,
    /// Served from the response cache
    #[serde(skip)]
    pub cached: bool,
}

/// Totals over the usage ledger.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct UsageStats {
    /// Prompt tokens
    pub total_input_tokens: u64,
    /// Completion tokens
    pub total_output_tokens: u64,
    /// Sum of both
    pub total_tokens: u64,
    /// Spend in USD, rounded to 4 decimals
    pub total_cost: f64,
    /// Ledgered calls
    pub requests: usize,
}

/// Result of comparing two consecutive prompts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuityAnalysis {
    /// Model commentary
    pub analysis: String,
    /// Earlier prompt
    pub previous: String,
    /// Later prompt
    pub next: String,
    /// Cost of the call in USD
    pub cost: f64,
}

/// A [`TextGenerator`] wrapped with a response cache and a usage ledger.
///
/// Every call that reaches the provider appends an [`LlmUsageRecord`] to
/// `02_prompts/llm_ledger.jsonl`. Cache hits are free and not ledgered.
pub struct LlmSession<T: TextGenerator> {
    generator: T,
    cache: ResponseCache,
    ledger: JsonlLedger<LlmUsageRecord>,
    pricing: LlmPricing,
    max_tokens: u32,
    temperature: f32,
}

impl<T: TextGenerator> LlmSession<T> {
    /// Session for a project, honouring `llm.cache_enabled`.
    ///
    /// Requests that leave `max_tokens` or `temperature` unset get
    /// `llm.max_tokens` and `llm.temperature`.
    pub fn new(generator: T, layout: &ProjectLayout, config: &PipelineConfig) -> Self {
        Self::with_parts(
            generator,
            ResponseCache::new(layout.llm_cache_dir(), config.llm.cache_enabled),
            JsonlLedger::new(layout.llm_ledger()),
            config.pricing.llm.clone(),
        )
        .with_request_defaults(config.llm.max_tokens, config.llm.temperature)
    }

    /// Session from explicit parts, with a 500 token budget and 0.7 temperature
    /// for requests that do not set their own.
    pub fn with_parts(
        generator: T,
        cache: ResponseCache,
        ledger: JsonlLedger<LlmUsageRecord>,
        pricing: LlmPricing,
    ) -> Self {
        Self {
            generator,
            cache,
            ledger,
            pricing,
            max_tokens: 500,
            temperature: 0.7,
        }
    }

    /// Budget and temperature for requests that leave them unset.
    pub fn with_request_defaults(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Wrapped provider.
    pub fn generator(&self) -> &T {
        &self.generator
    }

    /// Response cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Complete `request`, consulting the cache first when `use_cache` is set.
    #[instrument(skip(self, request), fields(model = %self.generator.model_name()))]
    pub async fn generate(&self, request: &ChatRequest, use_cache: bool) -> ClapperResult<LlmResult> {
        let max_tokens = request.max_tokens.unwrap_or(self.max_tokens);
        let temperature = request.temperature.unwrap_or(self.temperature);
        let request = request
            .clone()
            .with_max_tokens(max_tokens)
            .with_temperature(temperature);
        let model = self.generator.model_name().to_string();
        let key = ResponseCache::key(
            &request.prompt,
            request.system_prompt.as_deref(),
            &model,
            temperature,
            max_tokens,
        )?;

        if use_cache {
            if let Some(mut hit) = self.cache.get::<LlmResult>(&key).await {
                debug!(key = %key, "Using cached response");
                hit.cached = true;
                return Ok(hit);
            }
        }

        debug!(max_tokens, temperature, "Sending chat request");
        let response = self.generator.chat(&request).await?;
        let cost = self.track_usage(
            &model,
            response.usage.input_tokens,
            response.usage.output_tokens,
        )
        .await?;

        let result = LlmResult {
            content: response.content,
            input_tokens: response.usage.input_tokens,
            output_tokens: response.usage.output_tokens,
            total_tokens: response.usage.total(),
            cost,
            model,
            timestamp: Local::now().to_rfc3339(),
            cached: false,
        };

        if use_cache {
            self.cache.put(&key, &result).await?;
        }
        Ok(result)
    }

    async fn track_usage(&self, model: &str, input_tokens: u64, output_tokens: u64) -> ClapperResult<f64> {
        let cost = self.pricing.cost(model, input_tokens, output_tokens);
        let previous: f64 = self
            .ledger
            .read_all()
            .await?
            .iter()
            .map(|r| r.total_cost)
            .sum();

        let record = LlmUsageRecord {
            timestamp: Local::now().to_rfc3339(),
            model: model.to_string(),
            input_tokens,
            output_tokens,
            input_cost: cost.input,
            output_cost: cost.output,
            total_cost: cost.total,
            cumulative_cost: round_cost(previous + cost.total),
        };
        self.ledger.append(&record).await?;

        info!(
            input_tokens,
            output_tokens,
            cost = cost.total,
            cumulative = record.cumulative_cost,
            "LLM usage recorded"
        );
        Ok(cost.total)
    }

    /// Totals over every ledgered call.
    pub async fn usage_stats(&self) -> ClapperResult<UsageStats> {
        let records = self.ledger.read_all().await?;
        let mut stats = UsageStats {
            requests: records.len(),
            ..UsageStats::default()
        };
        let mut cost = 0.0;
        for record in &records {
            stats.total_input_tokens += record.input_tokens;
            stats.total_output_tokens += record.output_tokens;
            cost += record.total_cost;
        }
        stats.total_tokens = stats.total_input_tokens + stats.total_output_tokens;
        stats.total_cost = (cost * 10_000.0).round() / 10_000.0;
        Ok(stats)
    }

    /// Up to `count` variations of `base`, varying the `kind` aspect
    /// (e.g., "mood", "camera", "creative").
    #[instrument(skip(self, base))]
    pub async fn generate_variations(&self, base: &str, count: usize, kind: &str) -> ClapperResult<Vec<String>> {
        let system = format!(
            "You are a cinematic prompt specialist for AI animation generation.\n\
             Generate {count} {kind} variations of the given prompt.\n\n\
             Guidelines:\n\
             - Maintain the core subject and scene\n\
             - Vary the {kind} aspects\n\
             - Use professional cinematography language\n\
             - Keep prompts concise and clear\n\
             - Avoid text or writing in scenes\n\n\
             Return only the variations as a numbered list."
        );
        let request = ChatRequest::new(format!(
            "Original prompt: {base}\n\nGenerate {count} variations:"
        ))
        .with_system_prompt(system)
        .with_max_tokens(1000)
        .with_temperature(0.8);

        let response = self.generate(&request, true).await?;
        let mut variations = parse_numbered_list(&response.content);
        variations.truncate(count);
        debug!(parsed = variations.len(), "Parsed variations");
        Ok(variations)
    }

    /// Rewrite `base` with cinematic detail.
    #[instrument(skip(self, base))]
    pub async fn enhance_prompt(
        &self,
        base: &str,
        style: &str,
        scene_type: Option<&str>,
        mood: Option<&str>,
        camera_work: bool,
    ) -> ClapperResult<String> {
        let system = format!(
            "You are a cinematic prompt specialist for stylized animation.\n\
             Enhance prompts with rich visual details while maintaining clarity.\n\n\
             Style: {style}\n\
             Scene Type: {}\n\
             Mood: {}\n\
             Include Camera Work: {camera_work}\n\n\
             Guidelines:\n\
             - Add specific visual details (lighting, atmosphere, composition)\n\
             - Use professional cinematography terms\n\
             - Maintain original subject and action\n\
             - Keep under 100 words\n\
             - Avoid text or writing in scenes",
            scene_type.unwrap_or("general"),
            mood.unwrap_or("dramatic"),
        );
        let request = ChatRequest::new(format!("Enhance this prompt: {base}"))
            .with_system_prompt(system)
            .with_max_tokens(200)
            .with_temperature(0.6);

        Ok(self.generate(&request, true).await?.content.trim().to_string())
    }

    /// Comment on visual and narrative continuity between two prompts.
    #[instrument(skip(self, previous, next))]
    pub async fn analyze_continuity(&self, previous: &str, next: &str) -> ClapperResult<ContinuityAnalysis> {
        let system = "You are a continuity specialist for animation production.\n\
             Analyze scene transitions for visual and narrative continuity.\n\n\
             Provide:\n\
             1. Visual continuity issues (lighting, color, style)\n\
             2. Narrative flow assessment\n\
             3. Suggested adjustments\n\
             4. Transition recommendations";
        let request = ChatRequest::new(format!(
            "Previous scene: {previous}\nNext scene: {next}\n\nAnalyze continuity and suggest improvements."
        ))
        .with_system_prompt(system)
        .with_max_tokens(500)
        .with_temperature(0.5);

        let response = self.generate(&request, true).await?;
        Ok(ContinuityAnalysis {
            analysis: response.content,
            previous: previous.to_string(),
            next: next.to_string(),
            cost: response.cost,
        })
    }
}
