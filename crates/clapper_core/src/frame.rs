//! Styleframe kinds and naming.

use crate::{FILENAME_TIMESTAMP_FORMAT, SceneName};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role a styleframe plays for its scene.
///
/// # Examples
///
/// ```
/// use clapper_core::FrameType;
///
/// let frame: FrameType = "reference".parse().unwrap();
/// assert_eq!(frame, FrameType::Reference);
/// assert_eq!(FrameType::Start.directory(), "start_frames");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FrameType {
    /// First frame of the shot
    Start,
    /// Last frame of the shot
    End,
    /// Mood or character reference
    Reference,
}

impl FrameType {
    /// Directory under the styleframe root holding this frame type.
    pub fn directory(self) -> &'static str {
        match self {
            FrameType::Start => "start_frames",
            FrameType::End => "end_frames",
            FrameType::Reference => "reference",
        }
    }
}

/// Styleframe filename: `{scene}_{type}_{YYYYmmdd_HHMMSS}{.ext}`.
///
/// The extension is lowercased and given a leading dot if missing.
pub fn styleframe_filename(
    scene: &SceneName,
    frame_type: FrameType,
    timestamp: NaiveDateTime,
    extension: &str,
) -> String {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    format!(
        "{}_{}_{}.{}",
        scene,
        frame_type,
        timestamp.format(FILENAME_TIMESTAMP_FORMAT),
        ext
    )
}
