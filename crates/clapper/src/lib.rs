//! Clapper - a production pipeline for AI-generated film clips.
//!
//! Clapper keeps a film project's generated assets in order: Midjourney
//! styleframes, Gemini Veo takes, the append-only take ledger, and prompts
//! enriched by an OpenAI chat model. This crate re-exports the workspace
//! crates and hosts the `clapper` binary.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clapper::{GeminiVeoClient, Project, TakeGenerator, TakeResult, TakeSpec};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let project = Project::open(".", None)?;
//! let client = GeminiVeoClient::new(&project.config().generation.model)?;
//! let takes = TakeGenerator::new(client, &project);
//!
//! let spec = TakeSpec::new("opening_storm".parse()?, "A wall of storm clouds rolls in");
//! if let TakeResult::Generated(outcome) = takes.run(&spec).await? {
//!     println!("Saved {}", outcome.path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `clapper_error` - Error types
//! - `clapper_core` - Scene names, take numbers, pricing, ledger records, project layout
//! - `clapper_config` - Layered YAML configuration
//! - `clapper_interface` - `VideoGenerator` and `TextGenerator` traits
//! - `clapper_storage` - Ledgers, styleframe and clip libraries, response cache
//! - `clapper_models` - Gemini Veo and OpenAI clients
//! - `clapper_pipeline` - Take generation, batches, prompt enhancement, reports

pub use clapper_config::*;
pub use clapper_core::*;
pub use clapper_error::*;
pub use clapper_interface::*;
pub use clapper_models::{DryRunVideoGenerator, GeminiVeoClient, OpenAiClient, RetryOverrides};
pub use clapper_pipeline::*;
pub use clapper_storage::*;

mod telemetry;

pub use telemetry::{LogFormat, init_logging};
