mod test_utils;

use chrono::{DateTime, Local, TimeZone};
use clapper_core::{ClipSource, Resolution, SceneName, TakeNumber};
use clapper_error::{ClapperErrorKind, PipelineErrorKind, StorageErrorKind};
use clapper_pipeline::{TakeGenerator, TakeResult, TakeSpec};
use clapper_storage::sha256_bytes;
use tempfile::TempDir;
use test_utils::{MockVideoGenerator, project};

fn scene(name: &str) -> SceneName {
    name.parse().unwrap()
}

fn at(hour: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2025, 3, 14, hour, 30, 0)
        .single()
        .expect("unambiguous local time")
}

#[tokio::test]
async fn test_dry_run_writes_nothing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::success();
    let takes = TakeGenerator::new(mock.clone(), &project);

    let spec = TakeSpec::new(scene("opening_storm"), "Storm wall").with_dry_run(true);
    let result = takes.run_at(&spec, at(9)).await?;

    let TakeResult::Planned(plan) = result else {
        panic!("expected a plan");
    };
    assert_eq!(plan.take, TakeNumber::FIRST);
    assert_eq!(plan.filename, "opening_storm_take01_20250314_093000.mp4");
    assert!((plan.cost_estimate - 0.3).abs() < 1e-9);
    assert_eq!(plan.request["prompt"], "Storm wall");
    assert_eq!(plan.request["resolution"], "720p");
    assert_eq!(mock.call_count(), 0);
    assert!(!project.layout().ledger().exists());
    assert!(!project.layout().exports_dir().exists());
    Ok(())
}

#[tokio::test]
async fn test_generated_take_is_stored_and_ledgered() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::success();
    let takes = TakeGenerator::new(mock.clone(), &project);

    let spec = TakeSpec::new(scene("opening_storm"), "Storm wall").with_notes("first pass");
    let TakeResult::Generated(outcome) = takes.run_at(&spec, at(9)).await? else {
        panic!("expected a generated take");
    };

    assert_eq!(
        std::fs::read(&outcome.path)?,
        b"mock mp4 bytes".to_vec()
    );
    let record = &outcome.record;
    assert_eq!(record.take, TakeNumber::FIRST);
    assert_eq!(record.filename, "opening_storm_take01_20250314_093000.mp4");
    assert_eq!(record.model, "veo-3.0-generate-preview");
    assert_eq!(record.duration, 8);
    assert_eq!(record.notes, "first pass");
    assert_eq!(record.source, ClipSource::Gemini);
    assert_eq!(record.operation.as_deref(), Some("operations/mock-1"));
    assert_eq!(record.file_hash.as_deref(), Some(sha256_bytes(b"mock mp4 bytes").as_str()));
    assert_eq!(record.file_size_bytes, 14);

    let entries = takes.ledger().entries().await?;
    assert_eq!(entries, vec![record.clone()]);

    let TakeResult::Generated(second) = takes.run_at(&spec, at(10)).await? else {
        panic!("expected a generated take");
    };
    assert_eq!(second.record.take.get(), 2);
    assert_eq!(mock.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_overrides_reach_the_request() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::success();
    let takes = TakeGenerator::new(mock.clone(), &project);

    let spec = TakeSpec::new(scene("bridge_run"), "Bridge sprint")
        .with_take(TakeNumber::new(7)?)
        .with_duration_secs(4u32)
        .with_resolution(Resolution::P1080);
    let TakeResult::Generated(outcome) = takes.run_at(&spec, at(9)).await? else {
        panic!("expected a generated take");
    };

    let request = mock.last_request().expect("request recorded");
    assert_eq!(*request.duration_secs(), 4);
    assert_eq!(*request.resolution(), Resolution::P1080);
    assert_eq!(outcome.record.take.get(), 7);
    assert!((outcome.record.cost_estimate - 0.3).abs() < 1e-9);
    assert!(outcome.record.filename.starts_with("bridge_run_take07_"));
    Ok(())
}

#[tokio::test]
async fn test_reference_image_is_loaded() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let image = dir.path().join("frame.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G'])?;

    let mock = MockVideoGenerator::success();
    let takes = TakeGenerator::new(mock.clone(), &project);
    let spec = TakeSpec::new(scene("opening_storm"), "Storm wall").with_reference_image(image.clone());
    let TakeResult::Generated(outcome) = takes.run_at(&spec, at(9)).await? else {
        panic!("expected a generated take");
    };

    let request = mock.last_request().expect("request recorded");
    let reference = request.reference_image().as_ref().expect("reference image");
    assert_eq!(reference.mime_type(), "image/png");
    assert_eq!(reference.bytes(), &vec![0x89, b'P', b'N', b'G']);
    assert_eq!(
        outcome.record.reference_image.as_deref(),
        Some(image.display().to_string().as_str())
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_reference_image_fails_before_submission() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::success();
    let takes = TakeGenerator::new(mock.clone(), &project);

    let spec = TakeSpec::new(scene("opening_storm"), "Storm wall")
        .with_reference_image(dir.path().join("missing.png"));
    let err = takes.run_at(&spec, at(9)).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        ClapperErrorKind::Pipeline(e) if matches!(e.kind, PipelineErrorKind::ReferenceImageNotFound(_))
    ));
    assert_eq!(mock.call_count(), 0);
    assert_eq!(takes.ledger().count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_existing_clip_blocks_submission() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::success();
    let takes = TakeGenerator::new(mock.clone(), &project);
    let exports = project.layout().exports_dir();
    std::fs::create_dir_all(&exports)?;
    let existing = exports.join("opening_storm_take03_20250314_093000.mp4");
    std::fs::write(&existing, b"keep me")?;

    let spec = TakeSpec::new(scene("opening_storm"), "Storm wall").with_take(TakeNumber::new(3)?);
    let err = takes.run_at(&spec, at(9)).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        ClapperErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::AlreadyExists(_))
    ));
    assert_eq!(mock.call_count(), 0);
    assert_eq!(std::fs::read(&existing)?, b"keep me".to_vec());
    Ok(())
}

#[tokio::test]
async fn test_failed_generation_appends_nothing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let mock = MockVideoGenerator::failing();
    let takes = TakeGenerator::new(mock.clone(), &project);

    let spec = TakeSpec::new(scene("opening_storm"), "Storm wall");
    assert!(takes.run_at(&spec, at(9)).await.is_err());
    assert_eq!(mock.call_count(), 1);
    assert_eq!(takes.ledger().count().await?, 0);
    assert_eq!(takes.clips().count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_next_take_counts_files_on_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let exports = project.layout().exports_dir();
    std::fs::create_dir_all(&exports)?;
    std::fs::write(exports.join("opening_storm_take05_20240101_000000.mp4"), b"old")?;
    std::fs::write(exports.join("opening_storm_finale_take09_20240101_000000.mp4"), b"other")?;

    let takes = TakeGenerator::new(MockVideoGenerator::success(), &project);
    let spec = TakeSpec::new(scene("opening_storm"), "Storm wall").with_dry_run(true);
    let TakeResult::Planned(plan) = takes.run_at(&spec, at(9)).await? else {
        panic!("expected a plan");
    };
    assert_eq!(plan.take.get(), 6);
    Ok(())
}

#[tokio::test]
async fn test_import_ledgers_a_web_clip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let project = project(dir.path());
    let download = dir.path().join("download.mp4");
    std::fs::write(&download, b"downloaded clip")?;

    let takes = TakeGenerator::new(MockVideoGenerator::success(), &project);
    let spec = TakeSpec::new(scene("bridge_run"), "Bridge sprint").with_notes("from the web UI");
    let outcome = takes.import(&spec, &download).await?;

    assert!(outcome.path.exists());
    assert!(download.exists());
    assert_eq!(outcome.record.source, ClipSource::Web);
    assert_eq!(outcome.record.take, TakeNumber::FIRST);
    assert_eq!(outcome.record.file_size_bytes, 15);
    assert_eq!(takes.ledger().count().await?, 1);
    Ok(())
}
