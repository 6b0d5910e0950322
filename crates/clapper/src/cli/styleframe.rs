//! Styleframe library commands.

use clapper_core::{FrameType, SceneName};
use clapper_error::ClapperResult;
use clapper_pipeline::{MidjourneyPrompts, Project};
use clapper_storage::{StyleframeEntry, StyleframeLibrary};
use std::collections::BTreeMap;
use std::path::Path;

fn library(project: &Project) -> StyleframeLibrary {
    StyleframeLibrary::new(project.layout().clone(), project.config().safety.clone())
}

/// Copy an image into the library.
pub async fn organize(
    project: &Project,
    image: &Path,
    scene: &SceneName,
    frame_type: FrameType,
    description: &str,
    prompt: Option<&str>,
) -> ClapperResult<()> {
    let entry = library(project)
        .organize(image, scene, frame_type, description, prompt)
        .await?;
    println!("Organized {} {} frame: {}", entry.scene, entry.frame_type, entry.path);
    Ok(())
}

/// Print frames per scene and frame type.
pub async fn list(project: &Project, scene: Option<&SceneName>) -> ClapperResult<()> {
    let library = library(project);
    let metadata = match scene {
        Some(scene) => {
            let mut single = BTreeMap::new();
            single.insert(scene.to_string(), library.scene_frames(scene).await?);
            single
        }
        None => library.all().await?,
    };

    if metadata.values().all(|types| types.values().all(Vec::is_empty)) {
        println!("No styleframes organized yet");
        return Ok(());
    }
    for (scene, types) in &metadata {
        println!("{scene}:");
        for (frame_type, entries) in types {
            println!("  {frame_type}: {} frame(s)", entries.len());
            for entry in entries {
                print_entry(entry);
            }
        }
    }
    Ok(())
}

fn print_entry(entry: &StyleframeEntry) {
    if entry.description.is_empty() {
        println!("    {} ({})", entry.filename, entry.timestamp);
    } else {
        println!("    {} ({}) - {}", entry.filename, entry.timestamp, entry.description);
    }
}

/// Print, and optionally save, start and end frame prompts.
pub async fn prompts(
    project: &Project,
    scene: &SceneName,
    description: &str,
    save: bool,
) -> ClapperResult<()> {
    let templates = MidjourneyPrompts::new(project);
    let prompts = templates.for_scene(scene, description);
    println!("Start Frame:\n{}\n", prompts.start_frame);
    println!("End Frame:\n{}", prompts.end_frame);
    if save {
        let path = templates.save(scene, &prompts).await?;
        println!("\nSaved to {}", path.display());
    }
    Ok(())
}

/// Print the best reference image path.
pub async fn get_ref(project: &Project, scene: &SceneName, preferred: FrameType) -> ClapperResult<()> {
    match library(project).best_reference(scene, preferred).await? {
        Some(path) => println!("{}", path.display()),
        None => println!("No styleframes found for {scene}"),
    }
    Ok(())
}
