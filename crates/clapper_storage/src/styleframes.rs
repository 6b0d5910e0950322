//! Midjourney styleframes organized by scene and frame type.

use crate::files::{check_intake, create_dir, read_error, write_atomic};
use chrono::NaiveDateTime;
use clapper_config::SafetyConfig;
use clapper_core::{FrameType, ProjectLayout, SceneName, styleframe_filename};
use clapper_error::{ClapperResult, JsonError, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// One organized styleframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleframeEntry {
    /// Scene the frame belongs to
    pub scene: SceneName,
    /// Role of the frame
    pub frame_type: FrameType,
    /// Filename inside the scene directory
    pub filename: String,
    /// Path relative to the project root
    pub path: String,
    /// What the frame shows
    #[serde(default)]
    pub description: String,
    /// Prompt that produced the frame
    #[serde(default)]
    pub midjourney_prompt: Option<String>,
    /// Local time the frame was organized, `YYYY-mm-ddTHH:MM:SS`
    pub timestamp: String,
    /// Where the image came from
    #[serde(default)]
    pub original_path: String,
}

impl StyleframeEntry {
    fn sort_key(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, ISO_SECONDS).ok()
    }
}

/// `scene -> frame type -> entries`, as stored in `styleframes_metadata.json`.
pub type StyleframeMetadata = BTreeMap<String, BTreeMap<FrameType, Vec<StyleframeEntry>>>;

/// Styleframes under `01_styleframes_midjourney`.
///
/// ```text
/// 01_styleframes_midjourney/
/// ├── start_frames/{scene}/{scene}_start_{ts}.png
/// ├── end_frames/{scene}/{scene}_end_{ts}.png
/// ├── reference/{scene}/{scene}_reference_{ts}.png
/// └── styleframes_metadata.json
/// ```
#[derive(Debug, Clone)]
pub struct StyleframeLibrary {
    layout: ProjectLayout,
    safety: SafetyConfig,
}

impl StyleframeLibrary {
    /// Library for a project.
    pub fn new(layout: ProjectLayout, safety: SafetyConfig) -> Self {
        Self { layout, safety }
    }

    /// Copy an image into the library using the current local time.
    pub async fn organize(
        &self,
        image: impl AsRef<Path>,
        scene: &SceneName,
        frame_type: FrameType,
        description: &str,
        midjourney_prompt: Option<&str>,
    ) -> ClapperResult<StyleframeEntry> {
        self.organize_at(
            image,
            scene,
            frame_type,
            description,
            midjourney_prompt,
            chrono::Local::now().naive_local(),
        )
        .await
    }

    /// Copy an image into the library, stamped with `timestamp`.
    ///
    /// # Errors
    ///
    /// Fails when the image is missing, has a disallowed extension, exceeds
    /// the size limit, or a frame with the same name already exists.
    #[tracing::instrument(
        skip(self, image, description, midjourney_prompt),
        fields(image = %image.as_ref().display(), scene = %scene, frame_type = %frame_type)
    )]
    pub async fn organize_at(
        &self,
        image: impl AsRef<Path>,
        scene: &SceneName,
        frame_type: FrameType,
        description: &str,
        midjourney_prompt: Option<&str>,
        timestamp: NaiveDateTime,
    ) -> ClapperResult<StyleframeEntry> {
        let image = image.as_ref();
        check_intake(image, &self.safety).await?;

        let extension = image
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let filename = styleframe_filename(scene, frame_type, timestamp, extension);
        let dir = self.layout.styleframe_scene_dir(frame_type, scene);
        let destination = dir.join(&filename);
        if tokio::fs::try_exists(&destination).await.unwrap_or(false) {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists(
                destination.display().to_string(),
            ))
            .into());
        }

        create_dir(&dir).await?;
        tokio::fs::copy(image, &destination).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "copy {} to {}: {}",
                image.display(),
                destination.display(),
                e
            )))
        })?;

        let relative = destination
            .strip_prefix(self.layout.root())
            .unwrap_or(&destination)
            .to_string_lossy()
            .replace('\\', "/");
        let entry = StyleframeEntry {
            scene: scene.clone(),
            frame_type,
            filename,
            path: relative,
            description: description.to_string(),
            midjourney_prompt: midjourney_prompt.map(str::to_string),
            timestamp: timestamp.format(ISO_SECONDS).to_string(),
            original_path: image.display().to_string(),
        };

        let mut metadata = self.all().await?;
        metadata
            .entry(scene.to_string())
            .or_default()
            .entry(frame_type)
            .or_default()
            .push(entry.clone());
        self.save(&metadata).await?;

        tracing::info!(path = %entry.path, "Organized styleframe");
        Ok(entry)
    }

    /// The whole metadata document. A missing file reads as empty.
    pub async fn all(&self) -> ClapperResult<StyleframeMetadata> {
        let path = self.layout.styleframes_metadata();
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StyleframeMetadata::new());
            }
            Err(e) => return Err(read_error(&path, e).into()),
        };
        serde_json::from_str(&contents).map_err(|e| {
            StorageError::new(StorageErrorKind::Metadata(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()
        })
    }

    /// Frames recorded for one scene.
    pub async fn scene_frames(
        &self,
        scene: &SceneName,
    ) -> ClapperResult<BTreeMap<FrameType, Vec<StyleframeEntry>>> {
        Ok(self.all().await?.remove(scene.as_str()).unwrap_or_default())
    }

    /// Total number of organized frames.
    pub async fn count(&self) -> ClapperResult<usize> {
        Ok(self
            .all()
            .await?
            .values()
            .flat_map(|types| types.values())
            .map(Vec::len)
            .sum())
    }

    /// Absolute path of the best conditioning image for a scene.
    ///
    /// Preferring [`FrameType::Start`] searches start, reference, end; anything
    /// else searches end, reference, start. Within the first non-empty type the
    /// latest frame wins.
    pub async fn best_reference(
        &self,
        scene: &SceneName,
        preferred: FrameType,
    ) -> ClapperResult<Option<PathBuf>> {
        let frames = self.scene_frames(scene).await?;
        let order = match preferred {
            FrameType::Start => [FrameType::Start, FrameType::Reference, FrameType::End],
            FrameType::End | FrameType::Reference => {
                [FrameType::End, FrameType::Reference, FrameType::Start]
            }
        };

        let best = order
            .iter()
            .filter_map(|frame_type| frames.get(frame_type))
            .find(|entries| !entries.is_empty())
            .and_then(|entries| {
                entries
                    .iter()
                    .max_by(|a, b| a.sort_key().cmp(&b.sort_key()).then(a.timestamp.cmp(&b.timestamp)))
            })
            .map(|entry| self.layout.root().join(&entry.path));
        Ok(best)
    }

    async fn save(&self, metadata: &StyleframeMetadata) -> ClapperResult<()> {
        let json = serde_json::to_vec_pretty(metadata)
            .map_err(|e| JsonError::new("styleframe metadata", e))?;
        write_atomic(self.layout.styleframes_metadata(), &json).await
    }
}
