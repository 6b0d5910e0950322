//! Clapper CLI binary.
//!
//! This binary drives the production pipeline of a film project:
//! - Generate takes with Gemini Veo and ledger them
//! - Organize Midjourney styleframes and pick reference images
//! - Enhance prompts with an OpenAI chat model or templates
//! - Report project status and health

use clap::Parser;
use clapper_pipeline::{Project, TakeSpec};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{enhance, ledger, styleframe};
    use cli::{
        CacheCommands, Cli, ClipCommands, Commands, EnhanceCommands, LedgerCommands,
        StyleframeCommands,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    // API keys may live in the project's .env file
    let _ = dotenvy::from_path(cli.project_root.join(".env"));

    clapper::init_logging(cli.verbose, cli.log_format)?;

    let root = cli.project_root.as_path();
    let open = || Project::open(root, cli.config.as_deref());

    match cli.command {
        Commands::Init => cli::init(root).await?,

        Commands::Generate {
            prompt,
            scene,
            take,
            image,
            notes,
            duration,
            resolution,
            dry_run,
        } => {
            let mut spec = TakeSpec::new(scene, prompt)
                .with_notes(notes)
                .with_dry_run(dry_run);
            if let Some(take) = take {
                spec = spec.with_take(take);
            }
            if let Some(image) = image {
                spec = spec.with_reference_image(image);
            }
            if let Some(duration) = duration {
                spec = spec.with_duration_secs(duration);
            }
            if let Some(resolution) = resolution {
                spec = spec.with_resolution(resolution);
            }
            cli::generate(&open()?, spec).await?;
        }

        Commands::Batch { scenes, dry_run } => cli::batch(&open()?, &scenes, dry_run).await?,

        Commands::Styleframe(command) => {
            let project = open()?;
            match command {
                StyleframeCommands::Organize {
                    image,
                    scene,
                    frame_type,
                    description,
                    prompt,
                } => {
                    styleframe::organize(
                        &project,
                        &image,
                        &scene,
                        frame_type,
                        &description,
                        prompt.as_deref(),
                    )
                    .await?
                }
                StyleframeCommands::List { scene } => {
                    styleframe::list(&project, scene.as_ref()).await?
                }
                StyleframeCommands::Prompts {
                    scene,
                    description,
                    save,
                } => styleframe::prompts(&project, &scene, &description, save).await?,
                StyleframeCommands::GetRef { scene, frame_type } => {
                    styleframe::get_ref(&project, &scene, frame_type).await?
                }
            }
        }

        Commands::Clip(ClipCommands::Import {
            file,
            scene,
            prompt,
            take,
            notes,
        }) => {
            let mut spec = TakeSpec::new(scene, prompt).with_notes(notes);
            if let Some(take) = take {
                spec = spec.with_take(take);
            }
            cli::import_clip(&open()?, &file, spec).await?;
        }

        Commands::Ledger(command) => {
            let project = open()?;
            match command {
                LedgerCommands::Prompts { scene, format } => {
                    ledger::prompts(&project, &scene, format).await?
                }
                LedgerCommands::Scenes => ledger::scenes(&project).await?,
            }
        }

        Commands::Enhance(command) => {
            let project = open()?;
            match command {
                EnhanceCommands::Veo {
                    description,
                    scene,
                    duration,
                    camera,
                    mood,
                    no_llm,
                    save,
                } => {
                    enhance::veo(
                        &project,
                        &description,
                        &scene,
                        duration,
                        camera.as_deref(),
                        mood.as_deref(),
                        no_llm,
                        save,
                    )
                    .await?
                }
                EnhanceCommands::Midjourney {
                    description,
                    scene,
                    frame,
                    no_llm,
                    save,
                } => enhance::midjourney(&project, &description, &scene, frame, no_llm, save).await?,
                EnhanceCommands::Variations { scene, count, kind } => {
                    enhance::variations(&project, &scene, count, kind).await?
                }
                EnhanceCommands::Continuity { prompts } => {
                    enhance::continuity(&project, &prompts).await?
                }
            }
        }

        Commands::Cache(CacheCommands::Clear) => cli::clear_cache(&open()?).await?,

        Commands::Status { format } => cli::status(&open()?, format).await?,

        Commands::Health { format } => {
            if cli::health(root, format).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
