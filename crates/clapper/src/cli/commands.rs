//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use clapper::LogFormat;
use clapper_core::{FrameType, Resolution, SceneName, TakeNumber};
use clapper_pipeline::VariationKind;
use std::path::PathBuf;

/// Clapper - production pipeline for AI-generated film clips
#[derive(Parser, Debug)]
#[command(name = "clapper")]
#[command(about = "Production pipeline for Gemini Veo takes, Midjourney styleframes and prompt enhancement", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    pub project_root: PathBuf,

    /// Extra configuration file layered over the project config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the project directories and default configuration
    Init,

    /// Generate one take with Gemini Veo
    Generate {
        /// Prompt describing the clip
        prompt: String,

        /// Scene the take belongs to
        #[arg(long)]
        scene: SceneName,

        /// Take number (next free take when omitted)
        #[arg(long)]
        take: Option<TakeNumber>,

        /// Image conditioning the first frame
        #[arg(long)]
        image: Option<PathBuf>,

        /// Notes stored in the ledger
        #[arg(long, default_value = "")]
        notes: String,

        /// Clip length in seconds
        #[arg(long)]
        duration: Option<u32>,

        /// Output resolution (720p, 1080p, 4k)
        #[arg(long)]
        resolution: Option<Resolution>,

        /// Show the request and cost without calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate takes for every default prompt of the configured scenes
    Batch {
        /// Restrict the batch to these scenes
        #[arg(long = "scene")]
        scenes: Vec<SceneName>,

        /// Show the plans without calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// Midjourney styleframe management
    #[command(subcommand)]
    Styleframe(StyleframeCommands),

    /// Manually downloaded clips
    #[command(subcommand)]
    Clip(ClipCommands),

    /// Take ledger queries
    #[command(subcommand)]
    Ledger(LedgerCommands),

    /// Prompt enhancement
    #[command(subcommand)]
    Enhance(EnhanceCommands),

    /// LLM response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Project status report
    Status {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Pre-flight checks (exits with status 1 when critical)
    Health {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// Styleframe subcommands
#[derive(Subcommand, Debug)]
pub enum StyleframeCommands {
    /// Copy an image into the styleframe library
    Organize {
        /// Image to organize
        image: PathBuf,

        /// Scene the frame belongs to
        scene: SceneName,

        /// Frame role (start, end, reference)
        frame_type: FrameType,

        /// What the frame shows
        #[arg(long, default_value = "")]
        description: String,

        /// Midjourney prompt that produced the frame
        #[arg(long)]
        prompt: Option<String>,
    },

    /// List organized styleframes
    List {
        /// Only this scene
        #[arg(long)]
        scene: Option<SceneName>,
    },

    /// Start and end frame prompts for Midjourney
    Prompts {
        /// Scene
        scene: SceneName,

        /// Scene description
        description: String,

        /// Write the prompts to 02_prompts/midjourney
        #[arg(long)]
        save: bool,
    },

    /// Print the best reference image for a scene
    GetRef {
        /// Scene
        scene: SceneName,

        /// Preferred frame type
        #[arg(long = "type", default_value = "start")]
        frame_type: FrameType,
    },
}

/// Clip subcommands
#[derive(Subcommand, Debug)]
pub enum ClipCommands {
    /// Copy a downloaded clip into the exports directory and ledger it
    Import {
        /// Clip file
        file: PathBuf,

        /// Scene the clip belongs to
        #[arg(long)]
        scene: SceneName,

        /// Prompt used to generate the clip
        #[arg(long)]
        prompt: String,

        /// Take number (next free take when omitted)
        #[arg(long)]
        take: Option<TakeNumber>,

        /// Notes stored in the ledger
        #[arg(long, default_value = "")]
        notes: String,
    },
}

/// Ledger subcommands
#[derive(Subcommand, Debug)]
pub enum LedgerCommands {
    /// Prompts used for a scene
    Prompts {
        /// Scene
        #[arg(long)]
        scene: SceneName,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Take counts per scene
    Scenes,
}

/// Enhancement subcommands
#[derive(Subcommand, Debug)]
pub enum EnhanceCommands {
    /// Add motion and pacing cues to a video prompt
    Veo {
        /// Base description
        description: String,

        /// Scene
        #[arg(long)]
        scene: SceneName,

        /// Clip length in seconds
        #[arg(long)]
        duration: Option<u32>,

        /// Camera movement
        #[arg(long)]
        camera: Option<String>,

        /// Mood
        #[arg(long)]
        mood: Option<String>,

        /// Template enrichment only
        #[arg(long)]
        no_llm: bool,

        /// Write the result to 02_prompts/enhanced
        #[arg(long)]
        save: bool,
    },

    /// Simple, detailed and artistic Midjourney prompts
    Midjourney {
        /// Base description
        description: String,

        /// Scene
        #[arg(long)]
        scene: SceneName,

        /// Frame role (start, end, reference)
        #[arg(long, default_value = "start")]
        frame: FrameType,

        /// Template enrichment only
        #[arg(long)]
        no_llm: bool,

        /// Write the result to 02_prompts/enhanced
        #[arg(long)]
        save: bool,
    },

    /// Variations of a configured scene
    Variations {
        /// Scene
        #[arg(long)]
        scene: SceneName,

        /// Number of variations
        #[arg(long, default_value = "3")]
        count: usize,

        /// What to vary (mood, camera, time, weather, creative)
        #[arg(long, default_value = "mood")]
        kind: VariationKind,
    },

    /// Check consecutive prompts for continuity problems
    Continuity {
        /// Prompts in sequence order
        #[arg(required = true, num_args = 2..)]
        prompts: Vec<String>,
    },
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Delete every cached LLM response
    Clear,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    #[default]
    Human,
    /// JSON format
    Json,
}
