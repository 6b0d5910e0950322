//! Tests for the clip and styleframe libraries and the response cache.

use chrono::{NaiveDate, NaiveDateTime};
use clapper_config::{PipelineConfig, SafetyConfig};
use clapper_core::{FrameType, ProjectLayout, SceneName, TakeNumber};
use clapper_error::{ClapperErrorKind, StorageErrorKind};
use clapper_storage::{
    ClipLibrary, ResponseCache, StyleframeLibrary, sha256_bytes, sha256_file, write_atomic,
};
use tempfile::TempDir;

fn safety() -> SafetyConfig {
    PipelineConfig::bundled().unwrap().safety
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn scene(name: &str) -> SceneName {
    name.parse().unwrap()
}

#[tokio::test]
async fn test_write_atomic_and_hash() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a/b/file.bin");
    write_atomic(&path, b"abc").await.unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"abc");
    assert_eq!(sha256_file(&path).await.unwrap(), sha256_bytes(b"abc"));
    assert!(!temp.path().join("a/b/file.bin.tmp").exists());
}

#[tokio::test]
async fn test_store_generated_clip() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    let clips = ClipLibrary::new(&layout, safety());

    let stored = clips
        .store_generated(&scene("storm"), TakeNumber::new(1).unwrap(), at(9, 0), b"video")
        .await
        .unwrap();

    assert_eq!(stored.filename, "storm_take01_20250310_090000.mp4");
    assert_eq!(stored.size_bytes, 5);
    assert_eq!(stored.sha256, sha256_bytes(b"video"));
    assert!(clips.exists(&stored.filename).await);
    assert_eq!(clips.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_store_generated_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    let clips = ClipLibrary::new(&layout, safety());

    let stored = clips
        .store_generated(&scene("storm"), TakeNumber::new(1).unwrap(), at(9, 0), b"first")
        .await
        .unwrap();
    let err = clips
        .store_generated(&scene("storm"), TakeNumber::new(1).unwrap(), at(9, 0), b"second")
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ClapperErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::AlreadyExists(_))
    ));
    assert_eq!(std::fs::read(&stored.path).unwrap(), b"first".to_vec());
}

#[tokio::test]
async fn test_import_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    let clips = ClipLibrary::new(&layout, safety());
    let download = temp.path().join("download.mp4");
    std::fs::write(&download, b"from the web").unwrap();

    let stored = clips
        .import(&download, &scene("bridge"), TakeNumber::new(2).unwrap(), at(9, 0))
        .await
        .unwrap();
    assert_eq!(stored.sha256, sha256_bytes(b"from the web"));
    assert_eq!(stored.size_bytes, 12);
    assert!(download.exists());

    let again = clips
        .import(&download, &scene("bridge"), TakeNumber::new(2).unwrap(), at(9, 0))
        .await;
    assert!(again.is_err());
}

#[tokio::test]
async fn test_import_rejects_disallowed_extension() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    let clips = ClipLibrary::new(&layout, safety());
    let script = temp.path().join("clip.exe");
    std::fs::write(&script, b"nope").unwrap();

    assert!(
        clips
            .import(&script, &scene("bridge"), TakeNumber::FIRST, at(9, 0))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_list_scenes_counts_clips() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    let clips = ClipLibrary::new(&layout, safety());
    for (name, take) in [("storm", 1), ("storm", 2), ("bridge_run", 1)] {
        clips
            .store_generated(&scene(name), TakeNumber::new(take).unwrap(), at(9, take), b"x")
            .await
            .unwrap();
    }
    std::fs::write(layout.exports_dir().join("notes.txt"), "ignore").unwrap();

    let scenes = clips.list_scenes().await.unwrap();
    assert_eq!(scenes.get("storm"), Some(&2));
    assert_eq!(scenes.get("bridge_run"), Some(&1));
    assert_eq!(scenes.len(), 2);
}

#[tokio::test]
async fn test_organize_styleframe_records_metadata() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    let library = StyleframeLibrary::new(layout.clone(), safety());
    let image = temp.path().join("mj_export.PNG");
    std::fs::write(&image, b"png").unwrap();

    let entry = library
        .organize_at(
            &image,
            &scene("storm"),
            FrameType::Start,
            "Storm wall",
            Some("storm wall --ar 16:9"),
            at(12, 0),
        )
        .await
        .unwrap();

    assert_eq!(entry.filename, "storm_start_20250310_120000.png");
    assert_eq!(
        entry.path,
        "01_styleframes_midjourney/start_frames/storm/storm_start_20250310_120000.png"
    );
    assert!(temp.path().join(&entry.path).exists());
    // Source is copied, not moved
    assert!(image.exists());

    let frames = library.scene_frames(&scene("storm")).await.unwrap();
    assert_eq!(frames[&FrameType::Start].len(), 1);
    assert_eq!(library.count().await.unwrap(), 1);

    let raw = std::fs::read_to_string(layout.styleframes_metadata()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["storm"]["start"][0]["description"], "Storm wall");
}

#[tokio::test]
async fn test_organize_rejects_missing_and_unsupported() {
    let temp = TempDir::new().unwrap();
    let library = StyleframeLibrary::new(ProjectLayout::new(temp.path()), safety());

    let missing = library
        .organize(temp.path().join("nope.png"), &scene("storm"), FrameType::End, "", None)
        .await;
    assert!(missing.is_err());

    let text = temp.path().join("notes.txt");
    std::fs::write(&text, "x").unwrap();
    let unsupported = library
        .organize(&text, &scene("storm"), FrameType::End, "", None)
        .await;
    assert!(unsupported.is_err());
}

#[tokio::test]
async fn test_best_reference_priority() {
    let temp = TempDir::new().unwrap();
    let library = StyleframeLibrary::new(ProjectLayout::new(temp.path()), safety());
    let image = temp.path().join("frame.png");
    std::fs::write(&image, b"png").unwrap();
    let storm = scene("storm");

    assert!(
        library
            .best_reference(&storm, FrameType::Start)
            .await
            .unwrap()
            .is_none()
    );

    library
        .organize_at(&image, &storm, FrameType::Reference, "", None, at(8, 0))
        .await
        .unwrap();
    library
        .organize_at(&image, &storm, FrameType::End, "", None, at(9, 0))
        .await
        .unwrap();

    // No start frame yet: reference comes before end
    let best = library
        .best_reference(&storm, FrameType::Start)
        .await
        .unwrap()
        .unwrap();
    assert!(best.ends_with("storm_reference_20250310_080000.png"));
    assert!(best.is_absolute());

    library
        .organize_at(&image, &storm, FrameType::Start, "", None, at(10, 0))
        .await
        .unwrap();
    library
        .organize_at(&image, &storm, FrameType::Start, "", None, at(11, 0))
        .await
        .unwrap();

    let best = library
        .best_reference(&storm, FrameType::Start)
        .await
        .unwrap()
        .unwrap();
    assert!(best.ends_with("storm_start_20250310_110000.png"));

    let best = library
        .best_reference(&storm, FrameType::End)
        .await
        .unwrap()
        .unwrap();
    assert!(best.ends_with("storm_end_20250310_090000.png"));
}

#[tokio::test]
async fn test_response_cache_roundtrip_and_clear() {
    let temp = TempDir::new().unwrap();
    let cache = ResponseCache::new(temp.path().join(".llm_cache"), true);
    let key = ResponseCache::key("prompt", Some("system"), "gpt-4o-mini", 0.7, 500).unwrap();

    assert!(cache.get::<serde_json::Value>(&key).await.is_none());
    cache
        .put(&key, &serde_json::json!({"content": "cached"}))
        .await
        .unwrap();
    let hit: serde_json::Value = cache.get(&key).await.unwrap();
    assert_eq!(hit["content"], "cached");

    assert_eq!(cache.clear().await.unwrap(), 1);
    assert!(cache.get::<serde_json::Value>(&key).await.is_none());
}

#[test]
fn test_cache_key_rejects_non_finite_temperature() {
    let key = ResponseCache::key("prompt", None, "gpt-4o-mini", 0.7, 500).unwrap();
    assert_eq!(key.len(), 64);

    let err = ResponseCache::key("prompt", None, "gpt-4o-mini", f32::NAN, 500).unwrap_err();
    match err.kind() {
        ClapperErrorKind::Json(e) => assert_eq!(e.document, "cache key"),
        other => panic!("expected a JSON error, got {}", other),
    }
}

#[tokio::test]
async fn test_disabled_cache_is_noop() {
    let temp = TempDir::new().unwrap();
    let cache = ResponseCache::new(temp.path().join(".llm_cache"), false);
    cache.put("k", &"value").await.unwrap();
    assert!(cache.get::<String>("k").await.is_none());
    assert!(!temp.path().join(".llm_cache").exists());
}
