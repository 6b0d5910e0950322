//! Video request and result types.

use clapper_core::Resolution;
use clapper_error::{
    ClapperResult, StorageError, StorageErrorKind, ValidationError, ValidationErrorKind,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Image used to condition a generation.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ReferenceImage {
    /// MIME type (e.g., "image/png")
    mime_type: String,
    /// Raw image bytes
    bytes: Vec<u8>,
    /// Where the image was read from
    source: Option<String>,
}

impl ReferenceImage {
    /// Wrap in-memory image bytes.
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
            source: None,
        }
    }

    /// MIME type for an image extension, if supported.
    ///
    /// ```
    /// use clapper_interface::ReferenceImage;
    ///
    /// assert_eq!(ReferenceImage::mime_for_extension("JPG"), Some("image/jpeg"));
    /// assert_eq!(ReferenceImage::mime_for_extension("gif"), None);
    /// ```
    pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "webp" => Some("image/webp"),
            _ => None,
        }
    }

    /// Read an image from disk, inferring its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing, unreadable, or not png/jpg/jpeg/webp.
    pub fn from_path(path: impl AsRef<Path>) -> ClapperResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(
                StorageError::new(StorageErrorKind::NotFound(path.display().to_string())).into(),
            );
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime_type = Self::mime_for_extension(extension).ok_or_else(|| {
            StorageError::new(StorageErrorKind::UnsupportedExtension(
                path.display().to_string(),
            ))
        })?;
        let bytes = std::fs::read(path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        debug!(path = %path.display(), mime_type, size = bytes.len(), "Loaded reference image");
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
            source: Some(path.display().to_string()),
        })
    }
}

/// Everything a video provider needs for one clip.
///
/// # Examples
///
/// ```
/// use clapper_core::Resolution;
/// use clapper_interface::VideoRequest;
///
/// let request = VideoRequest::builder()
///     .prompt("Storm wall over the plains")
///     .model("veo-3.0-generate-preview")
///     .duration_secs(8u32)
///     .resolution(Resolution::P720)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.aspect_ratio(), "16:9");
/// assert!(request.reference_image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct VideoRequest {
    /// Prompt text
    prompt: String,
    /// Model identifier
    model: String,
    /// Clip length in seconds
    duration_secs: u32,
    /// Output resolution
    #[builder(default)]
    resolution: Resolution,
    /// Aspect ratio (e.g., "16:9")
    #[builder(default = "\"16:9\".to_string()")]
    aspect_ratio: String,
    /// Things the model should avoid
    #[builder(default)]
    negative_prompt: Option<String>,
    /// Seed for reproducible output
    #[builder(default)]
    seed: Option<u32>,
    /// Image conditioning the first frame
    #[builder(default)]
    reference_image: Option<ReferenceImage>,
}

impl VideoRequest {
    /// Start building a request.
    pub fn builder() -> VideoRequestBuilder {
        VideoRequestBuilder::default()
    }

    /// JSON description of the request without image bytes, for dry runs and logs.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "prompt": self.prompt,
            "model": self.model,
            "duration_secs": self.duration_secs,
            "resolution": self.resolution.to_string(),
            "aspect_ratio": self.aspect_ratio,
            "negative_prompt": self.negative_prompt,
            "seed": self.seed,
            "reference_image": self.reference_image.as_ref().map(|image| serde_json::json!({
                "mime_type": image.mime_type(),
                "size_bytes": image.bytes().len(),
                "source": image.source(),
            })),
        })
    }
}

impl VideoRequestBuilder {
    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns error if a required field is missing, the prompt is blank, or
    /// the duration is zero.
    pub fn build(&self) -> Result<VideoRequest, ValidationError> {
        let request = self.build_internal().map_err(|e| e.to_string())?;
        if request.prompt.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::InvalidField {
                field: "prompt".to_string(),
                reason: "must not be empty".to_string(),
            }));
        }
        if request.duration_secs == 0 {
            return Err(ValidationError::new(ValidationErrorKind::InvalidField {
                field: "duration_secs".to_string(),
                reason: "must be positive".to_string(),
            }));
        }
        Ok(request)
    }
}

/// A finished clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoArtifact {
    /// Encoded video bytes
    pub bytes: Vec<u8>,
    /// MIME type of the bytes
    pub mime_type: String,
    /// Remote operation that produced the clip
    pub operation: Option<String>,
}

impl VideoArtifact {
    /// An MP4 clip.
    pub fn mp4(bytes: Vec<u8>, operation: Option<String>) -> Self {
        Self {
            bytes,
            mime_type: "video/mp4".to_string(),
            operation,
        }
    }
}
