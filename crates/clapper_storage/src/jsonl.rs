//! Append-only JSON-lines files.

use clapper_error::{ClapperResult, LedgerError, LedgerErrorKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// A newline-delimited JSON file of records of type `T`.
///
/// Records are only ever appended. Reads skip blank lines and log and skip
/// lines that fail to parse, so one bad line never hides the rest.
#[derive(Debug, Clone)]
pub struct JsonlLedger<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonlLedger<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Ledger at `path`. Nothing touches the disk until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Location of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line, creating the file and its parents.
    #[tracing::instrument(skip(self, record), fields(path = %self.path.display()))]
    pub async fn append(&self, record: &T) -> ClapperResult<()> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| LedgerError::new(LedgerErrorKind::Serialize(e.to_string())))?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            crate::files::create_dir(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                LedgerError::new(LedgerErrorKind::Open {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                })
            })?;

        file.write_all(line.as_bytes()).await.map_err(|e| {
            LedgerError::new(LedgerErrorKind::Append {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        file.flush().await.map_err(|e| {
            LedgerError::new(LedgerErrorKind::Append {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        debug!(bytes = line.len(), "Appended ledger record");
        Ok(())
    }

    /// Every parseable record in file order. A missing file reads as empty.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn read_all(&self) -> ClapperResult<Vec<T>> {
        let Some(contents) = self.read_contents().await? else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<T>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = index + 1, error = %e, "Skipping malformed ledger line"),
            }
        }
        Ok(records)
    }

    /// Number of non-blank lines.
    pub async fn count(&self) -> ClapperResult<usize> {
        Ok(self
            .read_contents()
            .await?
            .map(|c| c.lines().filter(|l| !l.trim().is_empty()).count())
            .unwrap_or(0))
    }

    async fn read_contents(&self) -> ClapperResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::new(LedgerErrorKind::Open {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
            .into()),
        }
    }
}
