//! Project status: jobs from the ledger, asset counts, scene coverage.

use crate::Project;
use chrono::Local;
use clapper_core::round_cost;
use clapper_error::{ClapperResult, JsonError};
use clapper_storage::{ClipLibrary, StyleframeLibrary, TakeLedger};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::instrument;

/// Whether a ledgered take's clip is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobState {
    /// Clip present in the exports directory
    Completed,
    /// Ledgered but the clip file is gone
    Missing,
}

/// One ledgered take.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatus {
    /// `{scene}_take{NN}`
    pub job_id: String,
    /// Scene
    pub scene: String,
    /// Take number
    pub take: u32,
    /// Ledger timestamp
    pub timestamp: String,
    /// Clip filename
    pub filename: String,
    /// File state
    pub state: JobState,
    /// Ledgered cost estimate
    pub cost: f64,
}

/// File counts per project area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AssetCounts {
    /// Organized styleframes
    pub styleframes: usize,
    /// Take ledger lines
    pub ledger_entries: usize,
    /// Clips in the exports directory
    pub exports: usize,
    /// Audio files
    pub audio: usize,
    /// Final cut files
    pub final_cuts: usize,
}

impl AssetCounts {
    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.styleframes + self.ledger_entries + self.exports + self.audio + self.final_cuts
    }
}

/// Snapshot of a project's progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    /// RFC 3339 time of the snapshot
    pub generated_at: String,
    /// Every ledgered take
    pub jobs: Vec<JobStatus>,
    /// Takes whose clip exists
    pub completed: usize,
    /// Takes whose clip is missing
    pub missing: usize,
    /// Sum of ledgered cost estimates in USD
    pub total_cost: f64,
    /// File counts
    pub assets: AssetCounts,
    /// Ledgered takes per scene
    pub scenes: BTreeMap<String, usize>,
    /// Configured scenes without a single take
    pub scenes_without_takes: Vec<String>,
    /// Share of configured scenes with at least one take
    pub completion_percent: f64,
}

impl StatusReport {
    /// Inspect the project.
    #[instrument(skip(project), fields(root = %project.layout().root().display()))]
    pub async fn collect(project: &Project) -> ClapperResult<Self> {
        let layout = project.layout();
        let config = project.config();
        let ledger = TakeLedger::new(layout);
        let clips = ClipLibrary::new(layout, config.safety.clone());
        let styleframes = StyleframeLibrary::new(layout.clone(), config.safety.clone());

        let records = ledger.entries().await?;
        let mut jobs = Vec::with_capacity(records.len());
        for record in &records {
            let state = if clips.exists(&record.filename).await {
                JobState::Completed
            } else {
                JobState::Missing
            };
            jobs.push(JobStatus {
                job_id: format!("{}_take{}", record.scene, record.take),
                scene: record.scene.to_string(),
                take: record.take.get(),
                timestamp: record.timestamp.clone(),
                filename: record.filename.clone(),
                state,
                cost: record.cost_estimate,
            });
        }
        let completed = jobs.iter().filter(|j| j.state == JobState::Completed).count();

        let assets = AssetCounts {
            styleframes: styleframes.count().await?,
            ledger_entries: ledger.count().await?,
            exports: clips.count().await?,
            audio: count_files(&layout.audio_dir()).await,
            final_cuts: count_files(&layout.final_cut_dir()).await,
        };

        let scenes = ledger.scene_take_counts().await?;
        let configured: Vec<&String> = config.scenes.keys().collect();
        let scenes_without_takes: Vec<String> = configured
            .iter()
            .filter(|name| !scenes.contains_key(name.as_str()))
            .map(|name| name.to_string())
            .collect();
        let completion_percent = if configured.is_empty() {
            0.0
        } else {
            let covered = configured.len() - scenes_without_takes.len();
            (covered as f64 / configured.len() as f64 * 1000.0).round() / 10.0
        };

        Ok(Self {
            generated_at: Local::now().to_rfc3339(),
            missing: jobs.len() - completed,
            completed,
            total_cost: round_cost(records.iter().map(|r| r.cost_estimate).sum()),
            jobs,
            assets,
            scenes,
            scenes_without_takes,
            completion_percent,
        })
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> ClapperResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new("status report", e).into())
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Status Report")?;
        writeln!(
            f,
            "Video jobs: {} completed, {} missing",
            self.completed, self.missing
        )?;
        writeln!(f, "Total cost: ${:.2}", self.total_cost)?;
        writeln!(f, "Assets: {} total files", self.assets.total())?;
        writeln!(f, "  Styleframes:    {}", self.assets.styleframes)?;
        writeln!(f, "  Ledger entries: {}", self.assets.ledger_entries)?;
        writeln!(f, "  Exports:        {}", self.assets.exports)?;
        writeln!(f, "  Audio:          {}", self.assets.audio)?;
        writeln!(f, "  Final cuts:     {}", self.assets.final_cuts)?;

        if !self.scenes.is_empty() {
            writeln!(f, "Takes per scene:")?;
            for (scene, takes) in &self.scenes {
                writeln!(f, "  {scene}: {takes}")?;
            }
        }
        if !self.scenes_without_takes.is_empty() {
            writeln!(f, "Scenes without takes: {}", self.scenes_without_takes.join(", "))?;
        }
        write!(f, "Completion: {:.1}%", self.completion_percent)
    }
}

async fn count_files(dir: &Path) -> usize {
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return 0;
    };
    let mut count = 0;
    while let Ok(Some(entry)) = entries.next_entry().await {
        if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
            count += 1;
        }
    }
    count
}
