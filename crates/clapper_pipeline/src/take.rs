//! Generating one take of a scene.

use crate::Project;
use chrono::{DateTime, Local};
use clapper_config::GenerationConfig;
use clapper_core::{
    ClipSource, Resolution, SceneName, TakeNumber, TakeRecord, VideoPricing, take_filename,
};
use clapper_error::{
    ClapperResult, PipelineError, PipelineErrorKind, StorageError, StorageErrorKind,
};
use clapper_interface::{ReferenceImage, VideoGenerator, VideoRequest};
use clapper_storage::{ClipLibrary, TakeLedger};
use derive_getters::Getters;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// What to generate.
///
/// ```
/// use clapper_core::SceneName;
/// use clapper_pipeline::TakeSpec;
///
/// let scene: SceneName = "bridge_run".parse().unwrap();
/// let spec = TakeSpec::new(scene, "Soldiers sprint with the bridge")
///     .with_duration_secs(6u32)
///     .with_notes("wider lens")
///     .with_dry_run(true);
/// assert_eq!(spec.duration_secs(), &Some(6));
/// assert!(spec.take().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct TakeSpec {
    /// Scene the take belongs to
    #[setters(skip)]
    scene: SceneName,
    /// Prompt text
    #[setters(skip)]
    prompt: String,
    /// Explicit take number; the next free one when absent
    take: Option<TakeNumber>,
    /// Image conditioning the first frame
    reference_image: Option<PathBuf>,
    /// Free-form notes for the ledger
    notes: String,
    /// Override of the configured clip length
    duration_secs: Option<u32>,
    /// Override of the configured resolution
    resolution: Option<Resolution>,
    /// Build and price the request without calling the provider
    dry_run: bool,
}

impl TakeSpec {
    /// Spec with configured defaults for everything but scene and prompt.
    pub fn new(scene: SceneName, prompt: impl Into<String>) -> Self {
        Self {
            scene,
            prompt: prompt.into(),
            take: None,
            reference_image: None,
            notes: String::new(),
            duration_secs: None,
            resolution: None,
            dry_run: false,
        }
    }
}

/// A dry run: everything that would have been submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakePlan {
    /// Scene
    pub scene: SceneName,
    /// Resolved take number
    pub take: TakeNumber,
    /// Filename the clip would be stored under
    pub filename: String,
    /// Request description without image bytes
    pub request: serde_json::Value,
    /// Estimated cost in USD
    pub cost_estimate: f64,
}

/// A generated and ledgered take.
#[derive(Debug, Clone, PartialEq)]
pub struct TakeOutcome {
    /// Where the clip was stored
    pub path: PathBuf,
    /// Ledger line that was appended
    pub record: TakeRecord,
}

/// Result of [`TakeGenerator::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum TakeResult {
    /// Dry run, nothing written
    Planned(TakePlan),
    /// Clip stored and ledgered
    Generated(TakeOutcome),
}

/// Turns a [`TakeSpec`] into a stored clip and a ledger line.
pub struct TakeGenerator<G: VideoGenerator> {
    generator: G,
    generation: GenerationConfig,
    pricing: VideoPricing,
    ledger: TakeLedger,
    clips: ClipLibrary,
}

impl<G: VideoGenerator> TakeGenerator<G> {
    /// Generator writing into `project`.
    pub fn new(generator: G, project: &Project) -> Self {
        let config = project.config();
        Self {
            generator,
            generation: config.generation.clone(),
            pricing: config.pricing.video.clone(),
            ledger: TakeLedger::new(project.layout()),
            clips: ClipLibrary::new(project.layout(), config.safety.clone()),
        }
    }

    /// Wrapped provider.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Take ledger.
    pub fn ledger(&self) -> &TakeLedger {
        &self.ledger
    }

    /// Clip library.
    pub fn clips(&self) -> &ClipLibrary {
        &self.clips
    }

    /// Run the spec stamped with the current local time.
    pub async fn run(&self, spec: &TakeSpec) -> ClapperResult<TakeResult> {
        self.run_at(spec, Local::now()).await
    }

    /// Run the spec stamped with `now`.
    ///
    /// # Errors
    ///
    /// Fails when the reference image is missing or unreadable, the request
    /// is invalid, or the provider fails. Nothing is written for a failed take.
    #[instrument(skip(self, spec, now), fields(scene = %spec.scene, dry_run = spec.dry_run))]
    pub async fn run_at(&self, spec: &TakeSpec, now: DateTime<Local>) -> ClapperResult<TakeResult> {
        let take = match spec.take {
            Some(take) => take,
            None => {
                self.ledger
                    .next_take(&spec.scene, self.clips.exports_dir())
                    .await?
            }
        };
        let filename = take_filename(&spec.scene, take, now.naive_local());
        let duration = spec.duration_secs.unwrap_or(self.generation.duration_secs);
        let resolution = spec.resolution.unwrap_or(self.generation.resolution);

        let reference_image = match &spec.reference_image {
            Some(path) if !path.is_file() => {
                return Err(PipelineError::new(PipelineErrorKind::ReferenceImageNotFound(
                    path.display().to_string(),
                ))
                .into());
            }
            Some(path) => Some(ReferenceImage::from_path(path)?),
            None => None,
        };

        let negative_prompt = Some(self.generation.negative_prompt.clone())
            .filter(|p| !p.trim().is_empty());
        let request = VideoRequest::builder()
            .prompt(spec.prompt.clone())
            .model(self.generation.model.clone())
            .duration_secs(duration)
            .resolution(resolution)
            .aspect_ratio(self.generation.aspect_ratio.clone())
            .negative_prompt(negative_prompt)
            .reference_image(reference_image)
            .build()?;
        let cost_estimate = self.pricing.estimate(resolution, duration);

        if spec.dry_run {
            info!(take = %take, filename = %filename, cost = cost_estimate, "Dry run planned");
            return Ok(TakeResult::Planned(TakePlan {
                scene: spec.scene.clone(),
                take,
                filename,
                request: request.summary(),
                cost_estimate,
            }));
        }

        if self.clips.exists(&filename).await {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists(
                self.clips.exports_dir().join(&filename).display().to_string(),
            ))
            .into());
        }

        info!(
            take = %take,
            provider = self.generator.provider_name(),
            duration,
            resolution = %resolution,
            "Submitting take"
        );
        let artifact = self.generator.generate_video(&request).await?;
        let stored = self
            .clips
            .store_generated(&spec.scene, take, now.naive_local(), &artifact.bytes)
            .await?;

        let record = TakeRecord {
            timestamp: now.to_rfc3339(),
            scene: spec.scene.clone(),
            take,
            prompt: spec.prompt.clone(),
            model: self.generation.model.clone(),
            resolution,
            duration,
            cost_estimate,
            filename: stored.filename.clone(),
            file_size_bytes: stored.size_bytes,
            file_hash: Some(stored.sha256.clone()),
            reference_image: spec
                .reference_image
                .as_ref()
                .map(|p| p.display().to_string()),
            notes: spec.notes.clone(),
            source: ClipSource::Gemini,
            operation: artifact.operation,
            quality: "high".to_string(),
        };
        self.ledger.append(&record).await?;

        info!(path = %stored.path.display(), take = %take, "Take stored");
        Ok(TakeResult::Generated(TakeOutcome {
            path: stored.path,
            record,
        }))
    }

    /// Ledger a clip that was downloaded by hand.
    ///
    /// The clip is copied into the exports directory under the take's
    /// filename and a [`ClipSource::Web`] record is appended.
    #[instrument(skip(self, spec, source), fields(scene = %spec.scene))]
    pub async fn import(&self, spec: &TakeSpec, source: impl AsRef<std::path::Path>) -> ClapperResult<TakeOutcome> {
        let now = Local::now();
        let take = match spec.take {
            Some(take) => take,
            None => {
                self.ledger
                    .next_take(&spec.scene, self.clips.exports_dir())
                    .await?
            }
        };
        let duration = spec.duration_secs.unwrap_or(self.generation.duration_secs);
        let resolution = spec.resolution.unwrap_or(self.generation.resolution);

        let stored = self
            .clips
            .import(source, &spec.scene, take, now.naive_local())
            .await?;
        let record = TakeRecord {
            timestamp: now.to_rfc3339(),
            scene: spec.scene.clone(),
            take,
            prompt: spec.prompt.clone(),
            model: self.generation.model.clone(),
            resolution,
            duration,
            cost_estimate: self.pricing.estimate(resolution, duration),
            filename: stored.filename.clone(),
            file_size_bytes: stored.size_bytes,
            file_hash: Some(stored.sha256.clone()),
            reference_image: None,
            notes: spec.notes.clone(),
            source: ClipSource::Web,
            operation: None,
            quality: "high".to_string(),
        };
        self.ledger.append(&record).await?;

        info!(path = %stored.path.display(), take = %take, "Imported clip ledgered");
        Ok(TakeOutcome {
            path: stored.path,
            record,
        })
    }
}
