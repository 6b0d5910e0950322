//! Veo and Midjourney prompt enrichment.
//!
//! Every operation works without a chat model by falling back to
//! template-based enrichment; with an [`LlmSession`] the model rewrites the
//! prompt instead.

use crate::{LlmSession, Project};
use chrono::Local;
use clapper_config::{MidjourneyConfig, SceneConfig};
use clapper_core::{FrameType, ProjectLayout, SceneName, parse_numbered_list};
use clapper_error::{ClapperResult, JsonError, PipelineError, PipelineErrorKind};
use clapper_interface::{ChatRequest, TextGenerator};
use clapper_storage::write_atomic;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

const MOODS: [&str; 5] = ["heroic", "desperate", "mystical", "ominous", "triumphant"];
const CAMERAS: [&str; 5] = [
    "aerial wide",
    "close up intense",
    "tracking action",
    "slow reveal",
    "orbiting",
];

/// Provenance of an enhanced Veo prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VeoMetadata {
    /// Scene
    pub scene: SceneName,
    /// Clip length in seconds
    pub duration: u32,
    /// Camera movement worked into the prompt
    pub camera_movement: String,
    /// Requested mood
    pub mood: Option<String>,
    /// RFC 3339 time of enhancement
    pub timestamp: String,
}

/// An enhanced Veo prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VeoPrompt {
    /// Prompt to submit
    pub prompt: String,
    /// The original description
    pub simple: String,
    /// Same as `prompt`
    pub detailed: String,
    /// LLM cost in USD, when a model was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Provenance
    pub metadata: VeoMetadata,
}

/// Midjourney prompt variants with parameters appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MidjourneyPrompt {
    /// Closest to the description
    pub simple: String,
    /// With style descriptors and framing
    pub detailed: String,
    /// Most stylized
    pub artistic: String,
    /// "V7_STYLE_REFERENCES" or "STANDARD"
    pub workflow: String,
    /// Midjourney parameters appended to every variant
    pub parameters: String,
    /// Workflow hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Aspect varied by [`PromptEnhancer::scene_variations`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VariationKind {
    /// Emotional tone
    #[default]
    Mood,
    /// Camera work
    Camera,
    /// Time of day
    Time,
    /// Weather
    Weather,
    /// Anything goes
    Creative,
}

/// One variation of a scene, ready for both tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneVariation {
    /// 1-based index
    pub variation: usize,
    /// What was varied
    pub kind: VariationKind,
    /// Varied description
    pub prompt: String,
    /// Start-frame Midjourney prompt
    pub midjourney: MidjourneyPrompt,
    /// Veo prompt
    pub veo: VeoPrompt,
}

/// Suggested fix for one transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionSuggestion {
    /// e.g. "Scene 1 to 2"
    pub transition: String,
    /// Text following the model's "suggest"
    pub suggestion: String,
}

/// Continuity findings over a prompt sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContinuityReport {
    /// Summary line
    pub analysis: String,
    /// Flagged inconsistencies
    pub issues: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<TransitionSuggestion>,
    /// Prompts analyzed
    pub prompt_count: usize,
}

/// Enriches prompts for Veo and Midjourney, optionally through a chat model.
pub struct PromptEnhancer<T: TextGenerator> {
    layout: ProjectLayout,
    scenes: BTreeMap<String, SceneConfig>,
    midjourney: MidjourneyConfig,
    default_duration: u32,
    session: Option<LlmSession<T>>,
}

impl<T: TextGenerator> PromptEnhancer<T> {
    /// Enhancer for a project; `session` enables LLM mode.
    pub fn new(project: &Project, session: Option<LlmSession<T>>) -> Self {
        let config = project.config();
        Self {
            layout: project.layout().clone(),
            scenes: config.scenes.clone(),
            midjourney: config.midjourney.clone(),
            default_duration: config.generation.duration_secs,
            session,
        }
    }

    /// Whether a chat model is available.
    pub fn has_llm(&self) -> bool {
        self.session.is_some()
    }

    /// The chat session, if any.
    pub fn session(&self) -> Option<&LlmSession<T>> {
        self.session.as_ref()
    }

    fn scene_config(&self, scene: &SceneName) -> Option<&SceneConfig> {
        self.scenes.get(scene.as_str())
    }

    /// Camera movement implied by a scene's style descriptors.
    pub fn default_camera(&self, scene: &SceneName) -> &'static str {
        match self.scene_config(scene) {
            Some(config) if config.has_descriptor("action") => "tracking shot following action",
            Some(config) if config.has_descriptor("massive") => "dramatic pull back reveal",
            _ => "slow push in",
        }
    }

    /// Add motion and pacing cues to a description.
    ///
    /// Manual mode appends the cues; LLM mode asks the model to rewrite the
    /// description around them.
    #[instrument(skip(self, base), fields(scene = %scene))]
    pub async fn enhance_veo_prompt(
        &self,
        base: &str,
        scene: &SceneName,
        duration: u32,
        camera: Option<&str>,
        mood: Option<&str>,
        use_llm: bool,
    ) -> ClapperResult<VeoPrompt> {
        let camera = camera
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_camera(scene).to_string());

        let mut elements = vec![
            format!("{duration} second clip"),
            camera.clone(),
            "smooth motion".to_string(),
            "cinematic pacing".to_string(),
        ];
        if let Some(mood) = mood {
            elements.push(format!("{mood} atmosphere"));
        }

        let (prompt, cost) = match self.session.as_ref().filter(|_| use_llm) {
            Some(session) => {
                let system = format!(
                    "You are a video prompt specialist for AI video generation.\n\
                     Create prompts for smooth, cinematic {duration}-second clips.\n\n\
                     Scene: {scene}\n\
                     Mood: {}\n\n\
                     Guidelines:\n\
                     - Describe motion and progression\n\
                     - Include camera movement\n\
                     - Specify lighting changes\n\
                     - Maintain visual continuity\n\
                     - Focus on smooth, realistic motion",
                    mood.unwrap_or("dramatic")
                );
                let request = ChatRequest::new(format!(
                    "Enhance this video prompt: {base}\nElements: {}",
                    elements.join(", ")
                ))
                .with_system_prompt(system)
                .with_max_tokens(200)
                .with_temperature(0.6);

                let response = session.generate(&request, true).await?;
                let text = response.content.trim().to_string();
                if text.is_empty() {
                    return Err(PipelineError::new(PipelineErrorKind::LlmOutput(
                        "empty video prompt".to_string(),
                    ))
                    .into());
                }
                (text, Some(response.cost))
            }
            None => (format!("{base}, {}", elements.join(", ")), None),
        };

        debug!(prompt = %prompt, "Enhanced Veo prompt");
        Ok(VeoPrompt {
            detailed: prompt.clone(),
            prompt,
            simple: base.to_string(),
            cost,
            metadata: VeoMetadata {
                scene: scene.clone(),
                duration,
                camera_movement: camera,
                mood: mood.map(str::to_string),
                timestamp: Local::now().to_rfc3339(),
            },
        })
    }

    /// Build simple, detailed and artistic Midjourney prompts for a frame.
    #[instrument(skip(self, base), fields(scene = %scene, frame_type = %frame_type))]
    pub async fn enhance_midjourney_prompt(
        &self,
        base: &str,
        scene: &SceneName,
        frame_type: FrameType,
        use_llm: bool,
    ) -> ClapperResult<MidjourneyPrompt> {
        let descriptors = self
            .scene_config(scene)
            .map(|c| c.style_descriptors.clone())
            .unwrap_or_default();

        // Style-reference runs take their look from the attached images.
        let style_reference = self.midjourney.style_reference;
        let base_prompt = if style_reference || self.midjourney.style_suffix.trim().is_empty() {
            base.to_string()
        } else {
            format!("{base}, {}", self.midjourney.style_suffix)
        };

        let (simple, detailed, artistic) = match self.session.as_ref().filter(|_| use_llm) {
            Some(session) => {
                let system = format!(
                    "You are a Midjourney prompt specialist for stylized animation.\n\n\
                     Scene: {scene}\n\
                     Frame Type: {frame_type}\n\
                     Style Keywords: {}\n\n\
                     Guidelines:\n\
                     - Use clear, descriptive language\n\
                     - Avoid abstract concepts\n\
                     - Include specific visual details\n\
                     - No text or writing in scenes\n\
                     - Focus on composition and mood",
                    descriptors.join(", ")
                );
                let request =
                    ChatRequest::new(format!("Create 3 prompt variations for: {base_prompt}"))
                        .with_system_prompt(system)
                        .with_max_tokens(400)
                        .with_temperature(0.7);

                let response = session.generate(&request, true).await?;
                let mut variations = parse_numbered_list(&response.content).into_iter();
                let simple = variations.next().unwrap_or_else(|| base_prompt.clone());
                let detailed = variations
                    .next()
                    .unwrap_or_else(|| format!("{simple}, detailed environment"));
                let artistic = variations
                    .next()
                    .unwrap_or_else(|| format!("{simple}, painterly style"));
                (simple, detailed, artistic)
            }
            None => {
                let mut detailed = base_prompt.clone();
                if !descriptors.is_empty() {
                    let take = descriptors.len().min(2);
                    detailed.push_str(&format!(", {}", descriptors[..take].join(", ")));
                }
                match frame_type {
                    FrameType::Start => detailed.push_str(", establishing shot"),
                    FrameType::End => detailed.push_str(", concluding moment"),
                    FrameType::Reference => {}
                }
                let artistic = format!("{detailed}, artistic composition");
                (base_prompt, detailed, artistic)
            }
        };

        let parameters = self.midjourney.active_parameters().trim().to_string();
        let with_parameters = |prompt: String| {
            if parameters.is_empty() {
                prompt
            } else {
                format!("{prompt} {parameters}")
            }
        };

        Ok(MidjourneyPrompt {
            simple: with_parameters(simple),
            detailed: with_parameters(detailed),
            artistic: with_parameters(artistic),
            workflow: if style_reference {
                "V7_STYLE_REFERENCES"
            } else {
                "STANDARD"
            }
            .to_string(),
            note: style_reference
                .then(|| "Attach the previous clip and the start frame as style references".to_string()),
            parameters,
        })
    }

    /// Up to `count` variations of a configured scene, each with Midjourney
    /// and Veo prompts. Without a chat model at most five built-in
    /// modifiers are used.
    #[instrument(skip(self), fields(scene = %scene))]
    pub async fn scene_variations(
        &self,
        scene: &SceneName,
        count: usize,
        kind: VariationKind,
    ) -> ClapperResult<Vec<SceneVariation>> {
        let config = self.scene_config(scene).ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::UnknownScene(scene.to_string()))
        })?;
        let base = config.base_description().to_string();

        let prompts: Vec<String> = match &self.session {
            Some(session) => {
                session
                    .generate_variations(&base, count, &kind.to_string())
                    .await?
            }
            None => {
                let modifiers = match kind {
                    VariationKind::Mood => &MOODS,
                    _ => &CAMERAS,
                };
                modifiers
                    .iter()
                    .take(count.min(modifiers.len()))
                    .map(|modifier| format!("{base}, {modifier}"))
                    .collect()
            }
        };

        let mut variations = Vec::with_capacity(prompts.len());
        for (index, prompt) in prompts.into_iter().enumerate() {
            let midjourney = self
                .enhance_midjourney_prompt(&prompt, scene, FrameType::Start, false)
                .await?;
            let veo = self
                .enhance_veo_prompt(&prompt, scene, self.default_duration, None, None, false)
                .await?;
            variations.push(SceneVariation {
                variation: index + 1,
                kind,
                prompt,
                midjourney,
                veo,
            });
        }
        info!(count = variations.len(), "Scene variations built");
        Ok(variations)
    }

    /// Check each consecutive pair of prompts for continuity problems.
    #[instrument(skip(self, prompts), fields(count = prompts.len()))]
    pub async fn analyze_sequence(&self, prompts: &[String]) -> ClapperResult<ContinuityReport> {
        let Some(session) = &self.session else {
            return Ok(ContinuityReport {
                analysis: "LLM not available for continuity analysis".to_string(),
                issues: Vec::new(),
                suggestions: Vec::new(),
                prompt_count: prompts.len(),
            });
        };

        let mut issues = Vec::new();
        let mut suggestions = Vec::new();
        for (index, pair) in prompts.windows(2).enumerate() {
            let (from, to) = (index + 1, index + 2);
            let result = session.analyze_continuity(&pair[0], &pair[1]).await?;
            let lower = result.analysis.to_ascii_lowercase();

            if lower.contains("lighting") {
                issues.push(format!("Lighting inconsistency between scenes {from} and {to}"));
            }
            if lower.contains("color") {
                issues.push(format!("Color palette shift between scenes {from} and {to}"));
            }
            if lower.contains("style") {
                issues.push(format!("Style inconsistency between scenes {from} and {to}"));
            }
            if let Some(position) = lower.rfind("suggest") {
                suggestions.push(TransitionSuggestion {
                    transition: format!("Scene {from} to {to}"),
                    suggestion: result.analysis[position + "suggest".len()..]
                        .trim()
                        .to_string(),
                });
            }
        }

        Ok(ContinuityReport {
            analysis: "Continuity check complete".to_string(),
            issues,
            suggestions,
            prompt_count: prompts.len(),
        })
    }

    /// Write `value` to `02_prompts/enhanced/{scene}_enhanced_prompts.json`.
    #[instrument(skip(self, value), fields(scene = %scene))]
    pub async fn save(&self, scene: &SceneName, value: &impl Serialize) -> ClapperResult<PathBuf> {
        let path = self
            .layout
            .enhanced_prompts_dir()
            .join(format!("{scene}_enhanced_prompts.json"));
        let json = serde_json::to_vec_pretty(value)
            .map_err(|e| JsonError::new("enhanced prompts", e))?;
        write_atomic(&path, &json).await?;
        info!(path = %path.display(), "Saved enhanced prompts");
        Ok(path)
    }
}
