//! Conventional project directory layout.

use crate::{FrameType, SceneName};
use std::path::{Path, PathBuf};

/// Paths of a film project rooted at one directory.
///
/// ```
/// use clapper_core::ProjectLayout;
///
/// let layout = ProjectLayout::new("/films/storm");
/// assert!(layout.ledger().ends_with("02_prompts/ledger.jsonl"));
/// assert!(layout.exports_dir().ends_with("04_flow_exports"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Directories `clapper init` creates and the health check expects.
    pub const DIRECTORIES: [&'static str; 7] = [
        "00_docs",
        "01_styleframes_midjourney",
        "02_prompts",
        "04_flow_exports",
        "05_audio",
        "06_final_cut",
        "config",
    ];

    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every conventional directory as an absolute path.
    pub fn directories(&self) -> Vec<PathBuf> {
        Self::DIRECTORIES.iter().map(|d| self.root.join(d)).collect()
    }

    /// Documentation directory.
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join("00_docs")
    }

    /// Styleframe root.
    pub fn styleframes_dir(&self) -> PathBuf {
        self.root.join("01_styleframes_midjourney")
    }

    /// Directory for one scene's frames of a given type.
    pub fn styleframe_scene_dir(&self, frame_type: FrameType, scene: &SceneName) -> PathBuf {
        self.styleframes_dir()
            .join(frame_type.directory())
            .join(scene.as_str())
    }

    /// Styleframe metadata document.
    pub fn styleframes_metadata(&self) -> PathBuf {
        self.styleframes_dir().join("styleframes_metadata.json")
    }

    /// Prompt directory.
    pub fn prompts_dir(&self) -> PathBuf {
        self.root.join("02_prompts")
    }

    /// Take ledger.
    pub fn ledger(&self) -> PathBuf {
        self.prompts_dir().join("ledger.jsonl")
    }

    /// LLM usage ledger.
    pub fn llm_ledger(&self) -> PathBuf {
        self.prompts_dir().join("llm_ledger.jsonl")
    }

    /// Saved enhanced prompts.
    pub fn enhanced_prompts_dir(&self) -> PathBuf {
        self.prompts_dir().join("enhanced")
    }

    /// Saved Midjourney prompt templates.
    pub fn midjourney_prompts_dir(&self) -> PathBuf {
        self.prompts_dir().join("midjourney")
    }

    /// Clip exports.
    pub fn exports_dir(&self) -> PathBuf {
        self.root.join("04_flow_exports")
    }

    /// Audio assets.
    pub fn audio_dir(&self) -> PathBuf {
        self.root.join("05_audio")
    }

    /// Final cuts.
    pub fn final_cut_dir(&self) -> PathBuf {
        self.root.join("06_final_cut")
    }

    /// Configuration directory.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Project pipeline configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("pipeline_config.yaml")
    }

    /// LLM response cache.
    pub fn llm_cache_dir(&self) -> PathBuf {
        self.root.join(".llm_cache")
    }

    /// Environment file.
    pub fn env_file(&self) -> PathBuf {
        self.root.join(".env")
    }
}
