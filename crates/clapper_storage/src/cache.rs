//! On-disk cache of LLM responses.

use crate::files::{create_dir, read_error, sha256_bytes, write_atomic};
use clapper_error::{ClapperResult, JsonError, StorageError, StorageErrorKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct CacheKeyFields<'a> {
    max_tokens: u32,
    model: &'a str,
    prompt: &'a str,
    system_prompt: Option<&'a str>,
    temperature: f32,
}

/// Pretty-printed JSON files named `{sha256}.json` in `.llm_cache/`.
///
/// A disabled cache never reads or writes.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    enabled: bool,
}

impl ResponseCache {
    /// Cache rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    /// Whether lookups and stores do anything.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic key for a chat call.
    ///
    /// ```
    /// use clapper_storage::ResponseCache;
    ///
    /// # fn main() -> clapper_error::ClapperResult<()> {
    /// let a = ResponseCache::key("storm", None, "gpt-4o-mini", 0.7, 500)?;
    /// let b = ResponseCache::key("storm", None, "gpt-4o-mini", 0.7, 500)?;
    /// let c = ResponseCache::key("storm", None, "gpt-4o-mini", 0.8, 500)?;
    /// assert_eq!(a, b);
    /// assert_ne!(a, c);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when the fields cannot be encoded. A non-finite temperature
    /// would encode as `null` and is rejected too.
    pub fn key(
        prompt: &str,
        system_prompt: Option<&str>,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> ClapperResult<String> {
        if !temperature.is_finite() {
            return Err(JsonError::new(
                "cache key",
                format!("temperature {} is not a finite number", temperature),
            )
            .into());
        }
        let fields = CacheKeyFields {
            max_tokens,
            model,
            prompt,
            system_prompt,
            temperature,
        };
        let canonical = serde_json::to_vec(&fields).map_err(|e| JsonError::new("cache key", e))?;
        Ok(sha256_bytes(&canonical))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Cached value for `key`. Unreadable entries count as misses.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let contents = tokio::fs::read_to_string(self.entry_path(key)).await.ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => {
                tracing::debug!("Cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cache entry");
                None
            }
        }
    }

    /// Store a value under `key`.
    #[tracing::instrument(skip(self, value))]
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> ClapperResult<()> {
        if !self.enabled {
            return Ok(());
        }
        create_dir(&self.dir).await?;
        let json = serde_json::to_vec_pretty(value)
            .map_err(|e| JsonError::new("cache entry", e))?;
        write_atomic(self.entry_path(key), &json).await
    }

    /// Remove every cached entry, returning how many were removed.
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    pub async fn clear(&self) -> ClapperResult<usize> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(read_error(&self.dir, e).into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| read_error(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                tokio::fs::remove_file(&path).await.map_err(|e| {
                    StorageError::new(StorageErrorKind::FileWrite(format!(
                        "remove {}: {}",
                        path.display(),
                        e
                    )))
                })?;
                removed += 1;
            }
        }
        tracing::info!(removed, "Cleared response cache");
        Ok(removed)
    }
}
