//! Project setup and reporting commands.

use clapper_core::ProjectLayout;
use clapper_error::ClapperResult;
use clapper_pipeline::{HealthCheck, Project, StatusReport};
use clapper_storage::ResponseCache;
use std::path::Path;

use super::OutputFormat;

/// Create directories and the default configuration.
pub async fn init(root: &Path) -> ClapperResult<()> {
    let report = Project::init(root).await?;
    for dir in &report.created_dirs {
        println!("Created {}", dir.display());
    }
    let config = ProjectLayout::new(root).config_file();
    if report.config_written {
        println!("Wrote default configuration to {}", config.display());
    } else {
        println!("Kept existing configuration at {}", config.display());
    }
    Ok(())
}

/// Print the status report.
pub async fn status(project: &Project, format: OutputFormat) -> ClapperResult<()> {
    let report = StatusReport::collect(project).await?;
    match format {
        OutputFormat::Human => println!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

/// Print the health report; returns whether any check was critical.
pub async fn health(root: &Path, format: OutputFormat) -> ClapperResult<bool> {
    let report = HealthCheck::new(ProjectLayout::new(root)).run().await;
    match format {
        OutputFormat::Human => print!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(report.is_critical())
}

/// Empty the LLM response cache.
pub async fn clear_cache(project: &Project) -> ClapperResult<()> {
    let cache = ResponseCache::new(project.layout().llm_cache_dir(), true);
    let removed = cache.clear().await?;
    println!("Removed {removed} cached response(s)");
    Ok(())
}
