//! Take ledger queries.

use clapper_core::SceneName;
use clapper_error::{ClapperResult, JsonError};
use clapper_pipeline::Project;
use clapper_storage::TakeLedger;

use super::OutputFormat;

/// Prompts ledgered for a scene, in take order.
pub async fn prompts(project: &Project, scene: &SceneName, format: OutputFormat) -> ClapperResult<()> {
    let entries = TakeLedger::new(project.layout())
        .entries_for_scene(scene)
        .await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| JsonError::new("ledger entries", e))?;
            println!("{json}");
        }
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No takes ledgered for {scene}");
            }
            for entry in &entries {
                println!("Take {} ({}): {}", entry.take, entry.timestamp, entry.prompt);
            }
        }
    }
    Ok(())
}

/// Take counts per scene.
pub async fn scenes(project: &Project) -> ClapperResult<()> {
    let counts = TakeLedger::new(project.layout()).scene_take_counts().await?;
    if counts.is_empty() {
        println!("Ledger is empty");
    }
    for (scene, takes) in counts {
        println!("{scene}: {takes} take(s)");
    }
    Ok(())
}
