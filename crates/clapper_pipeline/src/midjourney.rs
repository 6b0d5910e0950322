//! Start/end frame prompt templates for Midjourney.

use crate::Project;
use chrono::{Local, NaiveDateTime};
use clapper_config::{MidjourneyConfig, SceneConfig};
use clapper_core::{ProjectLayout, SceneName};
use clapper_error::ClapperResult;
use clapper_storage::write_atomic;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, instrument};

const FALLBACK_STYLE: &str = "epic cinematic";

/// Prompts for the first and last frame of a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FramePrompts {
    /// Opening styleframe
    pub start_frame: String,
    /// Closing styleframe
    pub end_frame: String,
}

/// Template-based styleframe prompts.
#[derive(Debug, Clone)]
pub struct MidjourneyPrompts {
    layout: ProjectLayout,
    scenes: BTreeMap<String, SceneConfig>,
    midjourney: MidjourneyConfig,
}

impl MidjourneyPrompts {
    /// Templates for a project.
    pub fn new(project: &Project) -> Self {
        Self {
            layout: project.layout().clone(),
            scenes: project.config().scenes.clone(),
            midjourney: project.config().midjourney.clone(),
        }
    }

    /// Start and end prompts for `scene`.
    ///
    /// Each prompt reads `{description} {framing} {style keywords} {style
    /// suffix} {parameters}`; empty parts are left out.
    pub fn for_scene(&self, scene: &SceneName, description: &str) -> FramePrompts {
        let keywords = self
            .scenes
            .get(scene.as_str())
            .filter(|c| !c.style_descriptors.is_empty())
            .map(|c| c.style_descriptors.join(" "))
            .unwrap_or_else(|| FALLBACK_STYLE.to_string());

        let build = |framing: &str| {
            [
                description.trim(),
                framing,
                keywords.as_str(),
                self.midjourney.style_suffix.trim(),
                self.midjourney.parameters.trim(),
            ]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
        };

        FramePrompts {
            start_frame: build("establishing shot"),
            end_frame: build("closer detailed view"),
        }
    }

    /// Plain-text rendering for copy and paste.
    pub fn render(scene: &SceneName, prompts: &FramePrompts, generated: NaiveDateTime) -> String {
        format!(
            "Midjourney Prompts for {scene}\n{}\nGenerated: {}\n\nStart Frame:\n{}\n\nEnd Frame:\n{}\n",
            "=".repeat(50),
            generated.format("%Y-%m-%d %H:%M:%S"),
            prompts.start_frame,
            prompts.end_frame,
        )
    }

    /// Write the prompts to `02_prompts/midjourney/{scene}_prompts.txt`,
    /// replacing any earlier file for the scene.
    #[instrument(skip(self, prompts), fields(scene = %scene))]
    pub async fn save(&self, scene: &SceneName, prompts: &FramePrompts) -> ClapperResult<PathBuf> {
        let path = self
            .layout
            .midjourney_prompts_dir()
            .join(format!("{scene}_prompts.txt"));
        let text = Self::render(scene, prompts, Local::now().naive_local());
        write_atomic(&path, text.as_bytes()).await?;
        info!(path = %path.display(), "Saved Midjourney prompts");
        Ok(path)
    }
}
