//! A film project: its directory layout plus loaded configuration.

use clapper_config::PipelineConfig;
use clapper_core::ProjectLayout;
use clapper_error::{ClapperResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Layout and configuration of one project root.
#[derive(Debug, Clone)]
pub struct Project {
    layout: ProjectLayout,
    config: PipelineConfig,
}

/// What `init` changed on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitReport {
    /// Directories that did not exist before
    pub created_dirs: Vec<PathBuf>,
    /// Whether the default configuration file was written
    pub config_written: bool,
}

impl Project {
    /// Project from already loaded parts.
    pub fn new(layout: ProjectLayout, config: PipelineConfig) -> Self {
        Self { layout, config }
    }

    /// Load the configuration for `root`, layering `explicit_config` on top
    /// when given.
    pub fn open(root: impl AsRef<Path>, explicit_config: Option<&Path>) -> ClapperResult<Self> {
        let root = root.as_ref();
        let config = PipelineConfig::load(root, explicit_config)?;
        Ok(Self::new(ProjectLayout::new(root), config))
    }

    /// Directory layout.
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Loaded configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Create the conventional directories and write the default
    /// configuration if none exists. Existing files are never overwritten.
    #[instrument(skip(root), fields(root = %root.as_ref().display()))]
    pub async fn init(root: impl AsRef<Path>) -> ClapperResult<InitReport> {
        let layout = ProjectLayout::new(root.as_ref());
        let mut report = InitReport::default();

        for dir in layout.directories() {
            if tokio::fs::try_exists(&dir).await.unwrap_or(false) {
                continue;
            }
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
            report.created_dirs.push(dir);
        }

        report.config_written = PipelineConfig::write_default(layout.config_file())?;
        info!(
            created = report.created_dirs.len(),
            config_written = report.config_written,
            "Project initialized"
        );
        Ok(report)
    }
}
