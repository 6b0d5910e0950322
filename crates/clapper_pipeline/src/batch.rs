//! Sequential generation over configured default prompts.

use crate::{Project, TakeGenerator, TakeResult, TakeSpec};
use clapper_config::SceneConfig;
use clapper_core::{SceneName, TakeNumber};
use clapper_error::{ClapperResult, PipelineError, PipelineErrorKind};
use clapper_interface::VideoGenerator;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{error, info, instrument};

/// A take that failed inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// Scene
    pub scene: SceneName,
    /// Prompt that failed
    pub prompt: String,
    /// Rendered error
    pub error: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    /// Takes that were generated (or planned, for dry runs)
    pub completed: Vec<TakeResult>,
    /// Takes that failed
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Submissions attempted.
    pub fn attempted(&self) -> usize {
        self.completed.len() + self.failures.len()
    }

    /// Whether every take succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs one take per default prompt, one at a time.
pub struct BatchRunner<G: VideoGenerator> {
    takes: TakeGenerator<G>,
    scenes: BTreeMap<String, SceneConfig>,
    delay: Duration,
}

impl<G: VideoGenerator> BatchRunner<G> {
    /// Runner over the project's configured scenes, pausing
    /// `generation.batch_delay_secs` between submissions.
    pub fn new(takes: TakeGenerator<G>, project: &Project) -> Self {
        Self {
            takes,
            scenes: project.config().scenes.clone(),
            delay: Duration::from_secs(project.config().generation.batch_delay_secs),
        }
    }

    /// Override the pause between submissions.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Underlying take generator.
    pub fn takes(&self) -> &TakeGenerator<G> {
        &self.takes
    }

    /// (scene, prompt) pairs the batch would submit.
    ///
    /// An empty `scenes` selects every configured scene that has default
    /// prompts.
    ///
    /// # Errors
    ///
    /// Fails when a requested scene is not configured or has no default
    /// prompts, or when nothing at all would be submitted.
    pub fn jobs(&self, scenes: &[SceneName]) -> ClapperResult<Vec<(SceneName, String)>> {
        let mut jobs = Vec::new();
        if scenes.is_empty() {
            for (name, config) in &self.scenes {
                let Ok(scene) = SceneName::new(name.as_str()) else {
                    continue;
                };
                jobs.extend(
                    config
                        .default_prompts
                        .iter()
                        .map(|prompt| (scene.clone(), prompt.clone())),
                );
            }
            if jobs.is_empty() {
                return Err(
                    PipelineError::new(PipelineErrorKind::NoPrompts("any scene".to_string()))
                        .into(),
                );
            }
            return Ok(jobs);
        }

        for scene in scenes {
            let config = self.scenes.get(scene.as_str()).ok_or_else(|| {
                PipelineError::new(PipelineErrorKind::UnknownScene(scene.to_string()))
            })?;
            if config.default_prompts.is_empty() {
                return Err(
                    PipelineError::new(PipelineErrorKind::NoPrompts(scene.to_string())).into(),
                );
            }
            jobs.extend(
                config
                    .default_prompts
                    .iter()
                    .map(|prompt| (scene.clone(), prompt.clone())),
            );
        }
        Ok(jobs)
    }

    /// Submit every job in order. Individual failures are logged and
    /// collected rather than aborting the batch.
    ///
    /// Dry runs write nothing, so take numbers are handed out here: each
    /// planned job for a scene gets the number after the previous plan's.
    #[instrument(skip(self, scenes), fields(requested = scenes.len()))]
    pub async fn run(&self, scenes: &[SceneName], dry_run: bool) -> ClapperResult<BatchReport> {
        let jobs = self.jobs(scenes)?;
        let total = jobs.len();
        let mut report = BatchReport::default();
        let mut planned: BTreeMap<SceneName, TakeNumber> = BTreeMap::new();

        for (index, (scene, prompt)) in jobs.into_iter().enumerate() {
            if index > 0 && !dry_run && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            info!(job = index + 1, total, scene = %scene, "Batch submission");

            let mut spec = TakeSpec::new(scene.clone(), prompt.clone()).with_dry_run(dry_run);
            if dry_run {
                let take = match planned.get(&scene) {
                    Some(take) => *take,
                    None => {
                        self.takes
                            .ledger()
                            .next_take(&scene, self.takes.clips().exports_dir())
                            .await?
                    }
                };
                planned.insert(scene.clone(), take.next());
                spec = spec.with_take(take);
            }
            match self.takes.run(&spec).await {
                Ok(result) => report.completed.push(result),
                Err(e) => {
                    error!(scene = %scene, error = %e, "Batch take failed");
                    report.failures.push(BatchFailure {
                        scene,
                        prompt,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            completed = report.completed.len(),
            failed = report.failures.len(),
            "Batch finished"
        );
        Ok(report)
    }
}
