//! Hashing and atomic write helpers.

use clapper_error::{ClapperResult, StorageError, StorageErrorKind};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// SHA-256 of a byte slice as lowercase hex.
///
/// ```
/// use clapper_storage::sha256_bytes;
///
/// assert_eq!(
///     sha256_bytes(b"abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// SHA-256 of a file, read in chunks.
#[tracing::instrument(fields(path = %path.as_ref().display()), skip(path))]
pub async fn sha256_file(path: impl AsRef<Path>) -> ClapperResult<String> {
    let path = path.as_ref();
    let mut file = tokio::fs::File::open(path).await.map_err(|e| read_error(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buffer).await.map_err(|e| read_error(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write `data` to a sibling temp file, then rename it over `path`.
///
/// Parent directories are created as needed.
#[tracing::instrument(skip(path, data), fields(path = %path.as_ref().display(), size = data.len()))]
pub async fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> ClapperResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        create_dir(parent).await?;
    }

    let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    tokio::fs::write(&temp_path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
    })?;

    tracing::debug!("Wrote file atomically");
    Ok(())
}

pub(crate) async fn create_dir(dir: &Path) -> ClapperResult<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            dir.display(),
            e
        )))
        .into()
    })
}

pub(crate) fn read_error(path: &Path, e: std::io::Error) -> StorageError {
    if e.kind() == std::io::ErrorKind::NotFound {
        StorageError::new(StorageErrorKind::NotFound(path.display().to_string()))
    } else {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    }
}

/// Reject files with disallowed extensions or above the size limit.
pub(crate) async fn check_intake(
    path: &Path,
    safety: &clapper_config::SafetyConfig,
) -> ClapperResult<u64> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| read_error(path, e))?;
    if !metadata.is_file() {
        return Err(StorageError::new(StorageErrorKind::NotFound(path.display().to_string())).into());
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if !safety.allows_extension(extension) {
        return Err(StorageError::new(StorageErrorKind::UnsupportedExtension(
            path.display().to_string(),
        ))
        .into());
    }
    if metadata.len() > safety.max_file_size_bytes() {
        return Err(StorageError::new(StorageErrorKind::TooLarge(format!(
            "{} is {} bytes, limit is {} bytes",
            path.display(),
            metadata.len(),
            safety.max_file_size_bytes()
        )))
        .into());
    }
    Ok(metadata.len())
}
