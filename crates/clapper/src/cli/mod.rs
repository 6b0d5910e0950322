//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the clapper binary.

mod commands;
pub mod enhance;
mod generate;
pub mod ledger;
mod project;
mod providers;
pub mod styleframe;

pub use commands::{
    CacheCommands, Cli, ClipCommands, Commands, EnhanceCommands, LedgerCommands, OutputFormat,
    StyleframeCommands,
};
pub use generate::{batch, generate, import_clip};
pub use project::{clear_cache, health, init, status};

