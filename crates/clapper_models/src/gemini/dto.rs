//! Gemini long-running prediction wire types.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clapper_interface::VideoRequest;
use serde::{Deserialize, Serialize};

/// Body of a `predictLongRunning` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Prompt instances; Veo takes exactly one
    pub instances: Vec<PredictInstance>,
    /// Generation parameters
    pub parameters: PredictParameters,
}

/// One prompt, optionally conditioned on an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictInstance {
    /// Prompt text
    pub prompt: String,
    /// Conditioning image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineImage>,
}

/// Base64 image payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    /// Image bytes, base64 encoded
    pub bytes_base64_encoded: String,
    /// MIME type of the image
    pub mime_type: String,
}

/// Veo generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    /// Aspect ratio such as "16:9"
    pub aspect_ratio: String,
    /// Clip length
    pub duration_seconds: u32,
    /// "720p" or "1080p"
    pub resolution: String,
    /// Content to avoid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Seed for reproducible output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl From<&VideoRequest> for PredictRequest {
    fn from(request: &VideoRequest) -> Self {
        let image = request.reference_image().as_ref().map(|image| InlineImage {
            bytes_base64_encoded: STANDARD.encode(image.bytes()),
            mime_type: image.mime_type().clone(),
        });
        let negative_prompt = request
            .negative_prompt()
            .as_ref()
            .filter(|p| !p.trim().is_empty())
            .cloned();

        Self {
            instances: vec![PredictInstance {
                prompt: request.prompt().clone(),
                image,
            }],
            parameters: PredictParameters {
                aspect_ratio: request.aspect_ratio().clone(),
                duration_seconds: *request.duration_secs(),
                resolution: request.resolution().to_string(),
                negative_prompt,
                seed: *request.seed(),
            },
        }
    }
}

/// A long-running operation as returned by submit and poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Resource name, e.g. `models/veo-3.0-generate-preview/operations/abc123`
    pub name: String,
    /// Whether the operation has finished
    #[serde(default)]
    pub done: bool,
    /// Failure details when finished unsuccessfully
    #[serde(default)]
    pub error: Option<OperationError>,
    /// Result when finished successfully
    #[serde(default)]
    pub response: Option<OperationResponse>,
}

/// Failure reported by a finished operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationError {
    /// gRPC status code
    #[serde(default)]
    pub code: i32,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// Result wrapper of a finished operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    /// Video generation payload
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

/// Generated samples of a video operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    /// One entry per generated clip
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

/// A generated clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSample {
    /// Clip location or bytes
    #[serde(default)]
    pub video: Option<GeneratedVideo>,
}

/// Where a generated clip can be fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    /// Download URI (requires the API key)
    #[serde(default)]
    pub uri: Option<String>,
    /// Inline clip bytes, base64 encoded
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    /// MIME type of the clip
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// How to obtain a finished clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Download from this URI
    Uri(String),
    /// Decode these base64 bytes
    Inline(String),
}

impl Operation {
    /// The first generated clip of a finished operation.
    ///
    /// ```
    /// use clapper_models::{Operation, VideoSource};
    ///
    /// let op: Operation = serde_json::from_str(r#"{
    ///     "name": "models/veo/operations/1",
    ///     "done": true,
    ///     "response": {"generateVideoResponse": {"generatedSamples": [
    ///         {"video": {"uri": "https://example.com/clip.mp4"}}
    ///     ]}}
    /// }"#).unwrap();
    ///
    /// assert_eq!(op.video_source(), Some(VideoSource::Uri("https://example.com/clip.mp4".into())));
    /// ```
    pub fn video_source(&self) -> Option<VideoSource> {
        let video = self
            .response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()?;

        if let Some(uri) = video.uri.as_ref().filter(|u| !u.is_empty()) {
            return Some(VideoSource::Uri(uri.clone()));
        }
        video
            .bytes_base64_encoded
            .as_ref()
            .filter(|b| !b.is_empty())
            .map(|b| VideoSource::Inline(b.clone()))
    }
}
