//! Generated and imported clips in the exports directory.

use crate::files::{check_intake, create_dir, read_error, sha256_bytes, write_atomic};
use crate::sha256_file;
use chrono::NaiveDateTime;
use clapper_config::SafetyConfig;
use clapper_core::{ProjectLayout, SceneName, TakeNumber, parse_take_number, take_filename};
use clapper_error::{ClapperResult, StorageError, StorageErrorKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A clip written into the exports directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredClip {
    /// Absolute path of the clip
    pub path: PathBuf,
    /// Filename inside the exports directory
    pub filename: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// SHA-256 of the contents
    pub sha256: String,
}

/// Clips named `{scene}_take{NN}_{timestamp}.mp4` under `04_flow_exports`.
#[derive(Debug, Clone)]
pub struct ClipLibrary {
    exports_dir: PathBuf,
    safety: SafetyConfig,
}

impl ClipLibrary {
    /// Library over a project's exports directory.
    pub fn new(layout: &ProjectLayout, safety: SafetyConfig) -> Self {
        Self {
            exports_dir: layout.exports_dir(),
            safety,
        }
    }

    /// Exports directory.
    pub fn exports_dir(&self) -> &Path {
        &self.exports_dir
    }

    /// Write generated bytes under the take's filename.
    ///
    /// # Errors
    ///
    /// Fails when a clip with that filename already exists.
    #[tracing::instrument(skip(self, bytes), fields(scene = %scene, take = %take, size = bytes.len()))]
    pub async fn store_generated(
        &self,
        scene: &SceneName,
        take: TakeNumber,
        timestamp: NaiveDateTime,
        bytes: &[u8],
    ) -> ClapperResult<StoredClip> {
        let filename = take_filename(scene, take, timestamp);
        let path = self.exports_dir.join(&filename);
        ensure_vacant(&path).await?;
        write_atomic(&path, bytes).await?;

        let clip = StoredClip {
            path,
            filename,
            size_bytes: bytes.len() as u64,
            sha256: sha256_bytes(bytes),
        };
        tracing::info!(path = %clip.path.display(), hash = %clip.sha256, "Stored generated clip");
        Ok(clip)
    }

    /// Copy a manually downloaded clip in under the take's filename.
    ///
    /// # Errors
    ///
    /// Fails when the source is missing, has a disallowed extension, exceeds
    /// the size limit, or when the destination already exists.
    #[tracing::instrument(skip(self, source), fields(source = %source.as_ref().display(), scene = %scene, take = %take))]
    pub async fn import(
        &self,
        source: impl AsRef<Path>,
        scene: &SceneName,
        take: TakeNumber,
        timestamp: NaiveDateTime,
    ) -> ClapperResult<StoredClip> {
        let source = source.as_ref();
        let size_bytes = check_intake(source, &self.safety).await?;

        let filename = take_filename(scene, take, timestamp);
        let path = self.exports_dir.join(&filename);
        ensure_vacant(&path).await?;

        create_dir(&self.exports_dir).await?;
        tokio::fs::copy(source, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "copy {} to {}: {}",
                source.display(),
                path.display(),
                e
            )))
        })?;
        let sha256 = sha256_file(&path).await?;

        tracing::info!(path = %path.display(), hash = %sha256, "Imported clip");
        Ok(StoredClip {
            path,
            filename,
            size_bytes,
            sha256,
        })
    }

    /// Clip counts per scene, derived from `*.mp4` filenames.
    pub async fn list_scenes(&self) -> ClapperResult<BTreeMap<String, usize>> {
        let mut scenes = BTreeMap::new();
        for filename in mp4_files(&self.exports_dir).await? {
            if let Some(index) = filename.rfind("_take") {
                *scenes.entry(filename[..index].to_string()).or_insert(0) += 1;
            }
        }
        Ok(scenes)
    }

    /// Whether a clip with this filename exists.
    pub async fn exists(&self, filename: &str) -> bool {
        tokio::fs::try_exists(self.exports_dir.join(filename))
            .await
            .unwrap_or(false)
    }

    /// Number of `*.mp4` clips.
    pub async fn count(&self) -> ClapperResult<usize> {
        Ok(mp4_files(&self.exports_dir).await?.len())
    }
}

/// Clips are never replaced once written.
async fn ensure_vacant(path: &Path) -> ClapperResult<()> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::warn!(path = %path.display(), "Refusing to replace an existing clip");
        return Err(
            StorageError::new(StorageErrorKind::AlreadyExists(path.display().to_string())).into(),
        );
    }
    Ok(())
}

/// Take numbers of `{scene}_take*.mp4` files in `dir`.
pub async fn scan_takes(dir: &Path, scene: &SceneName) -> ClapperResult<Vec<TakeNumber>> {
    Ok(mp4_files(dir)
        .await?
        .iter()
        .filter_map(|name| parse_take_number(scene, name))
        .collect())
}

async fn mp4_files(dir: &Path) -> ClapperResult<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(read_error(dir, e).into()),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| read_error(dir, e))? {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.to_ascii_lowercase().ends_with(".mp4") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
