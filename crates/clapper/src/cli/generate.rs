//! Take generation, batches and clip import.

use clapper_core::SceneName;
use clapper_error::{ClapperResult, JsonError};
use clapper_interface::VideoGenerator;
use clapper_models::DryRunVideoGenerator;
use clapper_pipeline::{BatchRunner, Project, TakeGenerator, TakeResult, TakeSpec};
use std::path::Path;

use super::providers::veo_client;

/// Generate (or plan) a single take.
pub async fn generate(project: &Project, spec: TakeSpec) -> ClapperResult<()> {
    let result = if *spec.dry_run() {
        let generator = DryRunVideoGenerator::new(project.config().generation.model.clone());
        TakeGenerator::new(generator, project).run(&spec).await?
    } else {
        TakeGenerator::new(veo_client(project)?, project)
            .run(&spec)
            .await?
    };
    print_take(&result)
}

/// Run every default prompt of the selected scenes.
pub async fn batch(project: &Project, scenes: &[SceneName], dry_run: bool) -> ClapperResult<()> {
    if dry_run {
        let generator = DryRunVideoGenerator::new(project.config().generation.model.clone());
        run_batch(generator, project, scenes, true).await
    } else {
        run_batch(veo_client(project)?, project, scenes, false).await
    }
}

async fn run_batch<G: VideoGenerator>(
    generator: G,
    project: &Project,
    scenes: &[SceneName],
    dry_run: bool,
) -> ClapperResult<()> {
    let runner = BatchRunner::new(TakeGenerator::new(generator, project), project);
    let report = runner.run(scenes, dry_run).await?;

    for result in &report.completed {
        print_take(result)?;
    }
    for failure in &report.failures {
        println!("FAILED {} ({}): {}", failure.scene, failure.prompt, failure.error);
    }
    println!(
        "Batch finished: {} of {} takes succeeded",
        report.completed.len(),
        report.attempted()
    );
    Ok(())
}

/// Ledger a clip downloaded from the web interface.
pub async fn import_clip(project: &Project, file: &Path, spec: TakeSpec) -> ClapperResult<()> {
    // Importing never submits, so no API key is needed.
    let takes = TakeGenerator::new(
        DryRunVideoGenerator::new(project.config().generation.model.clone()),
        project,
    );
    let outcome = takes.import(&spec, file).await?;
    println!(
        "Imported {} take {} to {}",
        outcome.record.scene,
        outcome.record.take,
        outcome.path.display()
    );
    Ok(())
}

fn print_take(result: &TakeResult) -> ClapperResult<()> {
    match result {
        TakeResult::Planned(plan) => {
            let json = serde_json::to_string_pretty(plan)
                .map_err(|e| JsonError::new("take plan", e))?;
            println!("Dry run for {} take {} -> {}", plan.scene, plan.take, plan.filename);
            println!("{json}");
            println!("Estimated cost: ${:.2}", plan.cost_estimate);
        }
        TakeResult::Generated(outcome) => {
            println!(
                "Saved {} take {} to {}",
                outcome.record.scene,
                outcome.record.take,
                outcome.path.display()
            );
            println!("Estimated cost: ${:.2}", outcome.record.cost_estimate);
        }
    }
    Ok(())
}
