//! Prompt enhancement commands.

use clapper_core::{FrameType, SceneName};
use clapper_error::ClapperResult;
use clapper_models::OpenAiClient;
use clapper_pipeline::{PromptEnhancer, Project, VariationKind};

use super::providers::llm_session;

fn enhancer(project: &Project, use_llm: bool) -> PromptEnhancer<OpenAiClient> {
    let session = if use_llm { llm_session(project) } else { None };
    PromptEnhancer::new(project, session)
}

async fn print_usage(enhancer: &PromptEnhancer<OpenAiClient>) -> ClapperResult<()> {
    if let Some(session) = enhancer.session() {
        let stats = session.usage_stats().await?;
        println!(
            "\nLLM usage: {} request(s), {} tokens, ${:.4} total",
            stats.requests, stats.total_tokens, stats.total_cost
        );
    }
    Ok(())
}

/// Enhance a Veo prompt.
#[allow(clippy::too_many_arguments)]
pub async fn veo(
    project: &Project,
    description: &str,
    scene: &SceneName,
    duration: Option<u32>,
    camera: Option<&str>,
    mood: Option<&str>,
    no_llm: bool,
    save: bool,
) -> ClapperResult<()> {
    let enhancer = enhancer(project, !no_llm);
    let duration = duration.unwrap_or(project.config().generation.duration_secs);
    let prompt = enhancer
        .enhance_veo_prompt(description, scene, duration, camera, mood, !no_llm)
        .await?;

    println!("Veo prompt:\n{}", prompt.prompt);
    println!("\nCamera: {}", prompt.metadata.camera_movement);
    if let Some(cost) = prompt.cost {
        println!("Cost: ${cost:.6}");
    }
    if save {
        let path = enhancer.save(scene, &prompt).await?;
        println!("Saved to {}", path.display());
    }
    print_usage(&enhancer).await
}

/// Enhance a Midjourney prompt.
pub async fn midjourney(
    project: &Project,
    description: &str,
    scene: &SceneName,
    frame: FrameType,
    no_llm: bool,
    save: bool,
) -> ClapperResult<()> {
    let enhancer = enhancer(project, !no_llm);
    let prompt = enhancer
        .enhance_midjourney_prompt(description, scene, frame, !no_llm)
        .await?;

    println!("Workflow: {}", prompt.workflow);
    if let Some(note) = &prompt.note {
        println!("Note: {note}");
    }
    println!("\nSimple:\n{}", prompt.simple);
    println!("\nDetailed:\n{}", prompt.detailed);
    println!("\nArtistic:\n{}", prompt.artistic);
    if save {
        let path = enhancer.save(scene, &prompt).await?;
        println!("\nSaved to {}", path.display());
    }
    print_usage(&enhancer).await
}

/// Print variations of a configured scene.
pub async fn variations(
    project: &Project,
    scene: &SceneName,
    count: usize,
    kind: VariationKind,
) -> ClapperResult<()> {
    let enhancer = enhancer(project, true);
    let variations = enhancer.scene_variations(scene, count, kind).await?;

    for variation in &variations {
        println!("{}. {}", variation.variation, variation.prompt);
        println!("   Midjourney: {}", variation.midjourney.detailed);
        println!("   Veo:        {}", variation.veo.prompt);
    }
    print_usage(&enhancer).await
}

/// Print continuity issues between consecutive prompts.
pub async fn continuity(project: &Project, prompts: &[String]) -> ClapperResult<()> {
    let enhancer = enhancer(project, true);
    let report = enhancer.analyze_sequence(prompts).await?;

    println!("{} ({} prompts)", report.analysis, report.prompt_count);
    if !report.issues.is_empty() {
        println!("\nIssues:");
        for issue in &report.issues {
            println!("  - {issue}");
        }
    }
    if !report.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &report.suggestions {
            println!("  {}: {}", suggestion.transition, suggestion.suggestion);
        }
    }
    print_usage(&enhancer).await
}
