//! The take ledger.

use crate::{JsonlLedger, scan_takes};
use clapper_core::{ProjectLayout, SceneName, TakeNumber, TakeRecord, next_take};
use clapper_error::ClapperResult;
use std::collections::BTreeMap;
use std::path::Path;

/// `02_prompts/ledger.jsonl`: one [`TakeRecord`] per generated or imported take.
#[derive(Debug, Clone)]
pub struct TakeLedger {
    inner: JsonlLedger<TakeRecord>,
}

impl TakeLedger {
    /// Ledger for a project.
    pub fn new(layout: &ProjectLayout) -> Self {
        Self::at(layout.ledger())
    }

    /// Ledger at an explicit path.
    pub fn at(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            inner: JsonlLedger::new(path),
        }
    }

    /// Ledger file location.
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Append a take.
    pub async fn append(&self, record: &TakeRecord) -> ClapperResult<()> {
        self.inner.append(record).await
    }

    /// Every readable record.
    pub async fn entries(&self) -> ClapperResult<Vec<TakeRecord>> {
        self.inner.read_all().await
    }

    /// Number of ledger lines.
    pub async fn count(&self) -> ClapperResult<usize> {
        self.inner.count().await
    }

    /// Records for one scene, ordered by take.
    pub async fn entries_for_scene(&self, scene: &SceneName) -> ClapperResult<Vec<TakeRecord>> {
        let mut entries: Vec<_> = self
            .entries()
            .await?
            .into_iter()
            .filter(|r| &r.scene == scene)
            .collect();
        entries.sort_by_key(|r| r.take);
        Ok(entries)
    }

    /// Number of recorded takes per scene.
    pub async fn scene_take_counts(&self) -> ClapperResult<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for record in self.entries().await? {
            *counts.entry(record.scene.to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Sum of cost estimates.
    pub async fn total_cost(&self) -> ClapperResult<f64> {
        Ok(self.entries().await?.iter().map(|r| r.cost_estimate).sum())
    }

    /// Next take for a scene, considering both the ledger and clip files
    /// already in `exports_dir`.
    #[tracing::instrument(skip(self, exports_dir), fields(scene = %scene))]
    pub async fn next_take(
        &self,
        scene: &SceneName,
        exports_dir: &Path,
    ) -> ClapperResult<TakeNumber> {
        let recorded = self
            .entries()
            .await?
            .into_iter()
            .filter(|r| &r.scene == scene)
            .map(|r| r.take);
        let on_disk = scan_takes(exports_dir, scene).await?;
        let take = next_take(recorded.chain(on_disk));
        tracing::debug!(take = %take, "Resolved next take");
        Ok(take)
    }
}
