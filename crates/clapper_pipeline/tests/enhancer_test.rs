mod test_utils;

use clapper_core::{FrameType, SceneName};
use clapper_pipeline::{LlmSession, MidjourneyPrompts, PromptEnhancer, Project, VariationKind};
use tempfile::TempDir;
use test_utils::{MockTextGenerator, project};

fn scene(name: &str) -> SceneName {
    name.parse().unwrap()
}

fn manual(project: &Project) -> PromptEnhancer<MockTextGenerator> {
    PromptEnhancer::new(project, None)
}

fn with_llm(project: &Project, mock: &MockTextGenerator) -> PromptEnhancer<MockTextGenerator> {
    let session = LlmSession::new(mock.clone(), project.layout(), project.config());
    PromptEnhancer::new(project, Some(session))
}

#[tokio::test]
async fn test_veo_camera_follows_scene_descriptors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let enhancer = manual(&project);

    assert_eq!(
        enhancer.default_camera(&scene("bridge_run")),
        "tracking shot following action"
    );
    assert_eq!(
        enhancer.default_camera(&scene("opening_storm")),
        "dramatic pull back reveal"
    );
    assert_eq!(enhancer.default_camera(&scene("unlisted")), "slow push in");

    let veo = enhancer
        .enhance_veo_prompt("Bridge run", &scene("bridge_run"), 8, None, Some("desperate"), true)
        .await?;
    assert_eq!(
        veo.prompt,
        "Bridge run, 8 second clip, tracking shot following action, smooth motion, cinematic pacing, desperate atmosphere"
    );
    assert_eq!(veo.simple, "Bridge run");
    assert_eq!(veo.detailed, veo.prompt);
    assert_eq!(veo.metadata.camera_movement, "tracking shot following action");
    assert_eq!(veo.metadata.mood.as_deref(), Some("desperate"));
    assert!(veo.cost.is_none());
    Ok(())
}

#[tokio::test]
async fn test_veo_explicit_camera_wins() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let veo = manual(&project)
        .enhance_veo_prompt("Storm", &scene("opening_storm"), 6, Some("crane shot rising up"), None, false)
        .await?;
    assert_eq!(
        veo.prompt,
        "Storm, 6 second clip, crane shot rising up, smooth motion, cinematic pacing"
    );
    Ok(())
}

#[tokio::test]
async fn test_veo_llm_rewrite() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockTextGenerator::new(&["  The storm wall advances as the camera pulls back.  "]);
    let enhancer = with_llm(&project, &mock);

    let veo = enhancer
        .enhance_veo_prompt("Storm", &scene("opening_storm"), 8, None, None, true)
        .await?;
    assert_eq!(veo.prompt, "The storm wall advances as the camera pulls back.");
    assert_eq!(veo.simple, "Storm");
    assert!(veo.cost.is_some());

    let request = &mock.requests()[0];
    assert_eq!(request.max_tokens, Some(200));
    assert!(request.prompt.contains("dramatic pull back reveal"));
    Ok(())
}

#[tokio::test]
async fn test_midjourney_manual_style_reference_workflow() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let enhancer = manual(&project);

    let start = enhancer
        .enhance_midjourney_prompt("Storm over plains", &scene("opening_storm"), FrameType::Start, false)
        .await?;
    assert_eq!(start.workflow, "V7_STYLE_REFERENCES");
    assert_eq!(start.parameters, "--sw 300 --ar 16:9 --q 2");
    assert_eq!(start.simple, "Storm over plains --sw 300 --ar 16:9 --q 2");
    assert_eq!(
        start.detailed,
        "Storm over plains, windswept, dramatic, establishing shot --sw 300 --ar 16:9 --q 2"
    );
    assert_eq!(
        start.artistic,
        "Storm over plains, windswept, dramatic, establishing shot, artistic composition --sw 300 --ar 16:9 --q 2"
    );
    assert!(start.note.is_some());

    let end = enhancer
        .enhance_midjourney_prompt("Storm over plains", &scene("opening_storm"), FrameType::End, false)
        .await?;
    assert!(end.detailed.contains("concluding moment"));
    Ok(())
}

#[tokio::test]
async fn test_midjourney_standard_workflow_adds_style_suffix() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut project_config = project(dir.path()).config().clone();
    project_config.midjourney.style_reference = false;
    let project = Project::new(project(dir.path()).layout().clone(), project_config);

    let prompt = manual(&project)
        .enhance_midjourney_prompt("Storm", &scene("unlisted"), FrameType::Reference, false)
        .await?;
    assert_eq!(prompt.workflow, "STANDARD");
    assert_eq!(
        prompt.simple,
        "Storm, dramatic lighting, painterly realism, cinematic --style raw --ar 16:9 --q 2 --no text"
    );
    assert_eq!(prompt.detailed, prompt.simple);
    assert!(prompt.note.is_none());
    Ok(())
}

#[tokio::test]
async fn test_midjourney_llm_variations_with_fallbacks() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockTextGenerator::new(&["1. Storm wall at golden hour"]);
    let enhancer = with_llm(&project, &mock);

    let prompt = enhancer
        .enhance_midjourney_prompt("Storm", &scene("opening_storm"), FrameType::Start, true)
        .await?;
    assert_eq!(prompt.simple, "Storm wall at golden hour --sw 300 --ar 16:9 --q 2");
    assert_eq!(
        prompt.detailed,
        "Storm wall at golden hour, detailed environment --sw 300 --ar 16:9 --q 2"
    );
    assert_eq!(
        prompt.artistic,
        "Storm wall at golden hour, painterly style --sw 300 --ar 16:9 --q 2"
    );
    assert_eq!(mock.requests()[0].max_tokens, Some(400));
    Ok(())
}

#[tokio::test]
async fn test_manual_scene_variations() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let enhancer = manual(&project);

    let moods = enhancer
        .scene_variations(&scene("opening_storm"), 7, VariationKind::Mood)
        .await?;
    assert_eq!(moods.len(), 5);
    assert_eq!(
        moods[0].prompt,
        "A highstorm wall sweeps across a shattered plain at dusk, heroic"
    );
    assert_eq!(moods[4].variation, 5);
    assert!(moods[0].veo.prompt.starts_with(&moods[0].prompt));
    assert!(moods[0].midjourney.detailed.contains("establishing shot"));

    let cameras = enhancer
        .scene_variations(&scene("bridge_run"), 2, VariationKind::Camera)
        .await?;
    assert_eq!(cameras.len(), 2);
    assert!(cameras[1].prompt.ends_with(", close up intense"));

    assert!(
        enhancer
            .scene_variations(&scene("unlisted"), 2, VariationKind::Mood)
            .await
            .is_err()
    );
    Ok(())
}

#[tokio::test]
async fn test_llm_scene_variations() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockTextGenerator::new(&["1. Storm under moonlight\n2. Storm at noon\n3. Storm at dawn"]);
    let enhancer = with_llm(&project, &mock);

    let variations = enhancer
        .scene_variations(&scene("opening_storm"), 3, VariationKind::Time)
        .await?;
    let prompts: Vec<_> = variations.iter().map(|v| v.prompt.as_str()).collect();
    assert_eq!(prompts, ["Storm under moonlight", "Storm at noon", "Storm at dawn"]);
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_sequence_analysis() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let prompts = vec!["Storm".to_string(), "Bridge".to_string(), "Chasm".to_string()];

    let offline = manual(&project).analyze_sequence(&prompts).await?;
    assert_eq!(offline.analysis, "LLM not available for continuity analysis");
    assert!(offline.issues.is_empty());
    assert_eq!(offline.prompt_count, 3);

    let mock = MockTextGenerator::new(&["The lighting shifts abruptly. I suggest warmer tones."]);
    let report = with_llm(&project, &mock).analyze_sequence(&prompts).await?;
    assert_eq!(mock.call_count(), 2);
    assert_eq!(
        report.issues,
        vec![
            "Lighting inconsistency between scenes 1 and 2",
            "Lighting inconsistency between scenes 2 and 3",
        ]
    );
    assert_eq!(report.suggestions.len(), 2);
    assert_eq!(report.suggestions[1].transition, "Scene 2 to 3");
    assert_eq!(report.suggestions[0].suggestion, "warmer tones.");
    Ok(())
}

#[tokio::test]
async fn test_save_enhanced_prompts() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let enhancer = manual(&project);
    let veo = enhancer
        .enhance_veo_prompt("Storm", &scene("opening_storm"), 8, None, None, false)
        .await?;

    let path = enhancer.save(&scene("opening_storm"), &veo).await?;
    assert!(path.ends_with("02_prompts/enhanced/opening_storm_enhanced_prompts.json"));
    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved["metadata"]["scene"], "opening_storm");
    assert_eq!(saved["simple"], "Storm");
    Ok(())
}

#[tokio::test]
async fn test_midjourney_templates() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let templates = MidjourneyPrompts::new(&project);

    let prompts = templates.for_scene(&scene("opening_storm"), "Storm wall");
    assert_eq!(
        prompts.start_frame,
        "Storm wall establishing shot windswept dramatic stormy massive dramatic lighting, painterly realism, cinematic --style raw --ar 16:9 --q 2 --no text"
    );
    assert!(prompts.end_frame.starts_with("Storm wall closer detailed view windswept"));

    let fallback = templates.for_scene(&scene("unlisted"), "Empty sky");
    assert!(fallback.start_frame.starts_with("Empty sky establishing shot epic cinematic"));

    let path = templates.save(&scene("opening_storm"), &prompts).await?;
    assert!(path.ends_with("02_prompts/midjourney/opening_storm_prompts.txt"));
    let text = std::fs::read_to_string(path)?;
    assert!(text.starts_with("Midjourney Prompts for opening_storm\n"));
    assert!(text.contains(&format!("Start Frame:\n{}\n", prompts.start_frame)));
    Ok(())
}
