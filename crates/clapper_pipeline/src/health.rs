//! Pre-flight checks for a project.

use chrono::Local;
use clapper_config::PipelineConfig;
use clapper_core::ProjectLayout;
use clapper_error::{ClapperResult, JsonError};
use serde::Serialize;
use std::fmt;
use tracing::{instrument, warn};

/// Severity, ordered from best to worst.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    /// Nothing to do
    Healthy,
    /// Usable, with reduced features
    Warning,
    /// The pipeline cannot run
    Critical,
}

/// One named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Check name
    pub name: String,
    /// Outcome
    pub status: HealthStatus,
    /// Human-readable detail
    pub message: String,
}

impl CheckResult {
    fn new(name: &str, status: HealthStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
        }
    }
}

/// All check results plus the overall status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// RFC 3339 time of the check
    pub timestamp: String,
    /// Worst status among the checks
    pub status: HealthStatus,
    /// Individual results
    pub checks: Vec<CheckResult>,
}

impl HealthReport {
    /// Whether any check is critical.
    pub fn is_critical(&self) -> bool {
        self.status == HealthStatus::Critical
    }

    /// Result of the named check.
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> ClapperResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new("health report", e).into())
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline health: {}", self.status)?;
        for check in &self.checks {
            writeln!(f, "  [{:<8}] {}: {}", check.status, check.name, check.message)?;
        }
        Ok(())
    }
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Checks directories, API keys and configuration of a project.
pub struct HealthCheck {
    layout: ProjectLayout,
    env: EnvLookup,
}

impl HealthCheck {
    /// Check against the process environment.
    pub fn new(layout: ProjectLayout) -> Self {
        Self::with_env(layout, |key| std::env::var(key).ok())
    }

    /// Check with a custom environment lookup.
    pub fn with_env(
        layout: ProjectLayout,
        env: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            layout,
            env: Box::new(env),
        }
    }

    fn has_env(&self, key: &str) -> bool {
        (self.env)(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Run every check.
    #[instrument(skip(self), fields(root = %self.layout.root().display()))]
    pub async fn run(&self) -> HealthReport {
        let mut checks = Vec::new();

        let mut missing = Vec::new();
        for name in ProjectLayout::DIRECTORIES {
            if !tokio::fs::try_exists(self.layout.root().join(name))
                .await
                .unwrap_or(false)
            {
                missing.push(name);
            }
        }
        checks.push(if missing.is_empty() {
            CheckResult::new("directories", HealthStatus::Healthy, "All directories present")
        } else {
            CheckResult::new(
                "directories",
                HealthStatus::Warning,
                format!("Missing: {}", missing.join(", ")),
            )
        });

        checks.push(self.key_check("gemini_api_key", "GEMINI_API_KEY", "video generation"));
        checks.push(self.key_check("openai_api_key", "OPENAI_API_KEY", "LLM prompt enhancement"));
        checks.push(self.config_check());

        let status = checks
            .iter()
            .map(|c| c.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);
        if status != HealthStatus::Healthy {
            warn!(status = %status, "Health check found problems");
        }

        HealthReport {
            timestamp: Local::now().to_rfc3339(),
            status,
            checks,
        }
    }

    fn key_check(&self, name: &str, variable: &str, feature: &str) -> CheckResult {
        if self.has_env(variable) {
            CheckResult::new(name, HealthStatus::Healthy, format!("{variable} set"))
        } else {
            CheckResult::new(
                name,
                HealthStatus::Warning,
                format!("{variable} not set, {feature} unavailable"),
            )
        }
    }

    fn config_check(&self) -> CheckResult {
        let path = self.layout.config_file();
        if !path.is_file() {
            return CheckResult::new(
                "config",
                HealthStatus::Critical,
                format!("No config file at {}", path.display()),
            );
        }
        match PipelineConfig::from_file(&path) {
            Ok(config) if config.is_placeholder_project() => CheckResult::new(
                "config",
                HealthStatus::Warning,
                "Config needs update: gcp_project_id is still a placeholder",
            ),
            Ok(_) => CheckResult::new("config", HealthStatus::Healthy, "Configured"),
            Err(e) => CheckResult::new("config", HealthStatus::Critical, format!("Invalid config: {e}")),
        }
    }
}
