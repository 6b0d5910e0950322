mod test_utils;

use clapper_core::SceneName;
use clapper_error::{ClapperErrorKind, PipelineErrorKind};
use clapper_config::PipelineConfig;
use clapper_core::ProjectLayout;
use clapper_pipeline::{BatchRunner, Project, TakeGenerator, TakeResult};
use std::time::Duration;
use tempfile::TempDir;
use test_utils::{MockBehavior, MockVideoGenerator, project};

#[tokio::test]
async fn test_batch_runs_every_default_prompt() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::success();
    let runner = BatchRunner::new(TakeGenerator::new(mock.clone(), &project), &project);

    let report = runner.run(&[], false).await?;
    assert_eq!(report.attempted(), 2);
    assert!(report.is_success());
    assert_eq!(mock.call_count(), 2);
    assert_eq!(runner.takes().ledger().count().await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_batch_collects_failures_and_continues() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::new(MockBehavior::FailThenSucceed(1));
    let runner = BatchRunner::new(TakeGenerator::new(mock.clone(), &project), &project)
        .with_delay(Duration::from_millis(1));

    let report = runner.run(&[], false).await?;
    assert_eq!(report.completed.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].error.contains("mock failure"));
    assert_eq!(mock.call_count(), 2);
    assert_eq!(runner.takes().ledger().count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_batch_restricted_to_requested_scene() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::success();
    let runner = BatchRunner::new(TakeGenerator::new(mock.clone(), &project), &project);

    let scene: SceneName = "bridge_run".parse()?;
    let report = runner.run(&[scene.clone()], true).await?;
    assert_eq!(report.completed.len(), 1);
    match &report.completed[0] {
        TakeResult::Planned(plan) => assert_eq!(plan.scene, scene),
        other => panic!("expected a plan, got {other:?}"),
    }
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_unknown_scene_is_rejected_up_front() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::success();
    let runner = BatchRunner::new(TakeGenerator::new(mock.clone(), &project), &project);

    let err = runner.run(&["nowhere".parse()?], false).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        ClapperErrorKind::Pipeline(e) if e.kind == PipelineErrorKind::UnknownScene("nowhere".to_string())
    ));
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_dry_run_numbers_takes_per_scene() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut config = PipelineConfig::bundled()?;
    config.generation.batch_delay_secs = 0;
    config
        .scenes
        .get_mut("opening_storm")
        .expect("bundled scene")
        .default_prompts
        .push("Lightning splits the storm wall from within".to_string());
    let project = Project::new(ProjectLayout::new(dir.path()), config);
    let mock = MockVideoGenerator::success();
    let runner = BatchRunner::new(TakeGenerator::new(mock.clone(), &project), &project);

    let scene: SceneName = "opening_storm".parse()?;
    let report = runner.run(&[scene], true).await?;
    let plans: Vec<_> = report
        .completed
        .iter()
        .map(|result| match result {
            TakeResult::Planned(plan) => plan.clone(),
            other => panic!("expected a plan, got {other:?}"),
        })
        .collect();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].take.to_string(), "01");
    assert_eq!(plans[1].take.to_string(), "02");
    assert_ne!(plans[0].filename, plans[1].filename);
    assert_eq!(mock.call_count(), 0);
    assert_eq!(runner.takes().ledger().count().await?, 0);
    Ok(())
}
