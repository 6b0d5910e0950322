//! Layered loading of the pipeline configuration.

use crate::{GenerationConfig, LlmConfig, MidjourneyConfig, PricingConfig, SafetyConfig, SceneConfig};
use clapper_core::{ProjectLayout, SceneName};
use clapper_error::{
    ClapperError, ClapperResult, ConfigError, ConfigErrorKind, StorageError, StorageErrorKind,
};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Bundled default configuration, also written by `clapper init`.
pub const DEFAULT_CONFIG: &str = include_str!("../pipeline_config.yaml");

const PLACEHOLDER_PROJECT_ID: &str = "your-project-id";

/// Complete pipeline configuration.
///
/// # Examples
///
/// ```
/// use clapper_config::PipelineConfig;
///
/// let config = PipelineConfig::bundled().unwrap();
/// assert_eq!(config.generation.duration_secs, 8);
/// assert!(config.is_placeholder_project());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Google Cloud project, informational only
    #[serde(default)]
    pub gcp_project_id: String,
    /// Storage bucket, informational only
    #[serde(default)]
    pub gcs_bucket: String,
    /// Vertex region, informational only
    #[serde(default)]
    pub vertex_region: String,
    /// Video generation settings
    pub generation: GenerationConfig,
    /// Cost estimate rates
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Chat model settings
    pub llm: LlmConfig,
    /// Midjourney template settings
    pub midjourney: MidjourneyConfig,
    /// File intake limits
    pub safety: SafetyConfig,
    /// Scenes keyed by name
    #[serde(default)]
    pub scenes: BTreeMap<String, SceneConfig>,
}

impl PipelineConfig {
    /// Only the bundled defaults.
    pub fn bundled() -> ClapperResult<Self> {
        build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Yaml)))
    }

    /// Load configuration from a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ClapperResult<Self> {
        debug!("Loading configuration from file");
        let config = build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Yaml))
                .add_source(File::from(path.as_ref()).format(FileFormat::Yaml)),
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration for a project with the full precedence chain.
    ///
    /// ```no_run
    /// use clapper_config::PipelineConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = PipelineConfig::load(".", None)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(project_root: impl AsRef<Path>, explicit: Option<&Path>) -> ClapperResult<Self> {
        Self::load_with_env(project_root, explicit, None)
    }

    /// Like [`PipelineConfig::load`] but reads overrides from `env` instead of the
    /// process environment when given.
    #[instrument(skip(project_root, env), fields(root = %project_root.as_ref().display()))]
    pub fn load_with_env(
        project_root: impl AsRef<Path>,
        explicit: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> ClapperResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > project > home > bundled");

        let layout = ProjectLayout::new(project_root.as_ref());
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Yaml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/clapper/pipeline_config.yaml");
            builder = builder.add_source(
                File::from(home_config)
                    .format(FileFormat::Yaml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            File::from(layout.config_file())
                .format(FileFormat::Yaml)
                .required(false),
        );

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::new(ConfigErrorKind::MissingFile(
                    path.display().to_string(),
                ))
                .into());
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
        }

        builder = builder.add_source(
            Environment::with_prefix("CLAPPER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = build(builder)?;
        config.validate()?;
        Ok(config)
    }

    /// Settings for a scene, if configured.
    pub fn scene(&self, scene: &SceneName) -> Option<&SceneConfig> {
        self.scenes.get(scene.as_str())
    }

    /// Configured scene names that pass validation.
    pub fn scene_names(&self) -> Vec<SceneName> {
        self.scenes
            .keys()
            .filter_map(|name| SceneName::new(name.as_str()).ok())
            .collect()
    }

    /// True when the project id is empty or still the template placeholder.
    pub fn is_placeholder_project(&self) -> bool {
        self.gcp_project_id.trim().is_empty() || self.gcp_project_id == PLACEHOLDER_PROJECT_ID
    }

    /// Check numeric settings for values the pipeline cannot work with.
    pub fn validate(&self) -> ClapperResult<()> {
        let generation = &self.generation;
        if generation.duration_secs == 0 {
            return Err(ConfigError::invalid("generation.duration_secs", "must be positive").into());
        }
        if generation.poll_interval_secs == 0 {
            return Err(
                ConfigError::invalid("generation.poll_interval_secs", "must be positive").into(),
            );
        }
        if generation.max_wait_secs < generation.poll_interval_secs {
            return Err(ConfigError::invalid(
                "generation.max_wait_secs",
                format!(
                    "{} is shorter than poll_interval_secs ({})",
                    generation.max_wait_secs, generation.poll_interval_secs
                ),
            )
            .into());
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::invalid(
                "llm.temperature",
                format!("{} is outside [0, 2]", self.llm.temperature),
            )
            .into());
        }
        Ok(())
    }

    /// Write the bundled defaults to `path` unless a file is already there.
    ///
    /// Returns whether the file was written.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn write_default(path: impl AsRef<Path>) -> ClapperResult<bool> {
        let path = path.as_ref();
        if path.exists() {
            debug!("Configuration already present, leaving it untouched");
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
        std::fs::write(path, DEFAULT_CONFIG).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        info!("Wrote default configuration");
        Ok(true)
    }
}

fn build(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> ClapperResult<PipelineConfig> {
    builder
        .build()
        .map_err(|e| ClapperError::from(ConfigError::new(ConfigErrorKind::Build(e.to_string()))))?
        .try_deserialize()
        .map_err(|e| ClapperError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string()))))
}
