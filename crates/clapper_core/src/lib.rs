//! Core domain types for the Clapper film production pipeline.
//!
//! This crate holds the vocabulary every other crate shares: scene names,
//! take numbers, frame types, ledger records, naming conventions and pricing.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod frame;
mod layout;
mod pricing;
mod record;
mod resolution;
mod scene;
mod take;
mod text;

pub use frame::{FrameType, styleframe_filename};
pub use layout::ProjectLayout;
pub use pricing::{LlmCost, LlmPricing, ModelRates, VideoPricing, round_cost};
pub use record::{ClipSource, LlmUsageRecord, TakeRecord};
pub use resolution::Resolution;
pub use scene::SceneName;
pub use take::{TakeNumber, next_take, parse_take_number, take_filename};
pub use text::parse_numbered_list;

/// Timestamp layout used in every generated filename.
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
