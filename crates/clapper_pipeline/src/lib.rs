//! Production workflows for Clapper.
//!
//! Each workflow is a thin orchestration over the storage and provider
//! crates:
//!
//! - [`TakeGenerator`]: one numbered take of a scene, ledgered on success
//! - [`BatchRunner`]: sequential takes over configured default prompts
//! - [`LlmSession`]: cached, cost-tracked chat calls
//! - [`PromptEnhancer`]: Veo and Midjourney prompt enrichment
//! - [`MidjourneyPrompts`]: start/end styleframe prompt templates
//! - [`StatusReport`] and [`HealthCheck`]: project inspection
//!
//! # Example
//!
//! ```rust,no_run
//! use clapper_config::PipelineConfig;
//! use clapper_core::SceneName;
//! use clapper_models::DryRunVideoGenerator;
//! use clapper_pipeline::{Project, TakeGenerator, TakeResult, TakeSpec};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let project = Project::open(".", None)?;
//! let generator = DryRunVideoGenerator::new(&project.config().generation.model);
//! let takes = TakeGenerator::new(generator, &project);
//!
//! let scene: SceneName = "opening_storm".parse()?;
//! let spec = TakeSpec::new(scene, "Storm wall over the plains").with_dry_run(true);
//! if let TakeResult::Planned(plan) = takes.run(&spec).await? {
//!     println!("would write {}", plan.filename);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod enhancer;
mod health;
mod midjourney;
mod project;
mod session;
mod status;
mod take;

pub use batch::{BatchFailure, BatchReport, BatchRunner};
pub use enhancer::{
    ContinuityReport, MidjourneyPrompt, PromptEnhancer, SceneVariation, TransitionSuggestion,
    VariationKind, VeoMetadata, VeoPrompt,
};
pub use health::{CheckResult, HealthCheck, HealthReport, HealthStatus};
pub use midjourney::{FramePrompts, MidjourneyPrompts};
pub use project::{InitReport, Project};
pub use session::{ContinuityAnalysis, LlmResult, LlmSession, UsageStats};
pub use status::{AssetCounts, JobState, JobStatus, StatusReport};
pub use take::{TakeGenerator, TakeOutcome, TakePlan, TakeResult, TakeSpec};
