//! Tests for JSONL ledgers and the take ledger.

use chrono::NaiveDate;
use clapper_config::PipelineConfig;
use clapper_core::{ClipSource, ProjectLayout, Resolution, SceneName, TakeNumber, TakeRecord};
use clapper_storage::{ClipLibrary, JsonlLedger, TakeLedger};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Line {
    id: u32,
}

fn record(scene: &str, take: u32, cost: f64) -> TakeRecord {
    TakeRecord {
        timestamp: "2025-01-15T14:30:22+00:00".to_string(),
        scene: scene.parse().unwrap(),
        take: TakeNumber::new(take).unwrap(),
        prompt: format!("{scene} prompt"),
        model: "veo-3.0-generate-preview".to_string(),
        resolution: Resolution::P720,
        duration: 8,
        cost_estimate: cost,
        filename: format!("{scene}_take{take:02}_20250115_143022.mp4"),
        file_size_bytes: 10,
        file_hash: None,
        reference_image: None,
        notes: String::new(),
        source: ClipSource::Gemini,
        operation: None,
        quality: "high".to_string(),
    }
}

#[tokio::test]
async fn test_append_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let ledger = JsonlLedger::<Line>::new(temp.path().join("nested/dir/ledger.jsonl"));

    ledger.append(&Line { id: 1 }).await.unwrap();
    ledger.append(&Line { id: 2 }).await.unwrap();

    let contents = std::fs::read_to_string(ledger.path()).unwrap();
    assert_eq!(contents, "{\"id\":1}\n{\"id\":2}\n");
    assert_eq!(ledger.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_read_all_skips_blank_and_malformed_lines() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.jsonl");
    std::fs::write(&path, "{\"id\":1}\n\nnot json\n{\"id\":3}\n   \n").unwrap();

    let ledger = JsonlLedger::<Line>::new(&path);
    let records = ledger.read_all().await.unwrap();
    assert_eq!(records, vec![Line { id: 1 }, Line { id: 3 }]);
    assert_eq!(ledger.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_missing_ledger_reads_empty() {
    let temp = TempDir::new().unwrap();
    let ledger = JsonlLedger::<Line>::new(temp.path().join("absent.jsonl"));
    assert!(ledger.read_all().await.unwrap().is_empty());
    assert_eq!(ledger.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_take_ledger_queries() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    let ledger = TakeLedger::new(&layout);

    ledger.append(&record("storm", 2, 0.3)).await.unwrap();
    ledger.append(&record("bridge", 1, 0.6)).await.unwrap();
    ledger.append(&record("storm", 1, 0.3)).await.unwrap();

    let storm: SceneName = "storm".parse().unwrap();
    let takes: Vec<u32> = ledger
        .entries_for_scene(&storm)
        .await
        .unwrap()
        .iter()
        .map(|r| r.take.get())
        .collect();
    assert_eq!(takes, vec![1, 2]);

    let counts = ledger.scene_take_counts().await.unwrap();
    assert_eq!(counts.get("storm"), Some(&2));
    assert_eq!(counts.get("bridge"), Some(&1));

    let total = ledger.total_cost().await.unwrap();
    assert!((total - 1.2).abs() < 1e-9);
}

#[tokio::test]
async fn test_next_take_combines_ledger_and_files() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    let ledger = TakeLedger::new(&layout);
    let storm: SceneName = "storm".parse().unwrap();

    assert_eq!(
        ledger.next_take(&storm, &layout.exports_dir()).await.unwrap(),
        TakeNumber::FIRST
    );

    ledger.append(&record("storm", 2, 0.3)).await.unwrap();
    assert_eq!(
        ledger
            .next_take(&storm, &layout.exports_dir())
            .await
            .unwrap()
            .get(),
        3
    );

    // A clip on disk that never reached the ledger still counts
    let safety = PipelineConfig::bundled().unwrap().safety;
    let clips = ClipLibrary::new(&layout, safety);
    let ts = NaiveDate::from_ymd_opt(2025, 2, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    clips
        .store_generated(&storm, TakeNumber::new(5).unwrap(), ts, b"clip")
        .await
        .unwrap();
    // Another scene sharing the prefix is ignored
    let storm_finale: SceneName = "storm_finale".parse().unwrap();
    clips
        .store_generated(&storm_finale, TakeNumber::new(9).unwrap(), ts, b"clip")
        .await
        .unwrap();

    assert_eq!(
        ledger
            .next_take(&storm, &layout.exports_dir())
            .await
            .unwrap()
            .get(),
        6
    );
}
