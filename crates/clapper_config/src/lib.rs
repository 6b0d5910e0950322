//! Pipeline configuration for Clapper.
//!
//! Configuration is layered with the `config` crate. Later sources override
//! earlier ones:
//!
//! 1. Bundled defaults (`pipeline_config.yaml` shipped with this crate)
//! 2. User defaults in `~/.config/clapper/pipeline_config.yaml`
//! 3. The project file `config/pipeline_config.yaml`
//! 4. An explicit `--config` file
//! 5. Environment variables such as `CLAPPER__LLM__MODEL=gpt-4o`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pipeline;
mod sections;

pub use pipeline::{DEFAULT_CONFIG, PipelineConfig};
pub use sections::{
    GenerationConfig, LlmConfig, MidjourneyConfig, PricingConfig, SafetyConfig, SceneConfig,
};
