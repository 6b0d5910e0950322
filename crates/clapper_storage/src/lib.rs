//! Ledgers and file libraries for the Clapper pipeline.
//!
//! Everything here is plain files under the project root:
//!
//! - **JSONL ledgers**: append-only, one JSON record per line, tolerant reads
//! - **Styleframe library**: Midjourney images sorted by scene and frame type
//! - **Clip library**: generated or imported clips named by scene and take
//! - **Response cache**: LLM responses keyed by a hash of the request
//!
//! # Example
//!
//! ```rust
//! use clapper_core::{ProjectLayout, SceneName};
//! use clapper_storage::TakeLedger;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = ProjectLayout::new("/tmp/storm-film");
//! let ledger = TakeLedger::new(&layout);
//! let scene: SceneName = "opening_storm".parse()?;
//! let next = ledger.next_take(&scene, &layout.exports_dir()).await?;
//! println!("next take: {}", next);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod clips;
mod files;
mod jsonl;
mod styleframes;
mod takes;

pub use cache::ResponseCache;
pub use clips::{ClipLibrary, StoredClip, scan_takes};
pub use files::{sha256_bytes, sha256_file, write_atomic};
pub use jsonl::JsonlLedger;
pub use styleframes::{StyleframeEntry, StyleframeLibrary, StyleframeMetadata};
pub use takes::TakeLedger;
