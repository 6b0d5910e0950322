//! Provider traits for Clapper.
//!
//! Video and text generation are reached only through [`VideoGenerator`] and
//! [`TextGenerator`], so workflows can run against real providers, the dry-run
//! generator, or test doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod text;
mod traits;
mod video;

pub use text::{ChatRequest, ChatResponse, TokenUsage};
pub use traits::{TextGenerator, VideoGenerator};
pub use video::{ReferenceImage, VideoArtifact, VideoRequest, VideoRequestBuilder};
