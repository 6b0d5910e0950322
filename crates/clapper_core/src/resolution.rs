//! Output resolutions.

use serde::{Deserialize, Serialize};

/// Video output resolution.
///
/// ```
/// use clapper_core::Resolution;
///
/// let res: Resolution = "1080p".parse().unwrap();
/// assert_eq!(res.to_string(), "1080p");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
)]
#[strum(ascii_case_insensitive)]
pub enum Resolution {
    /// 1280x720
    #[default]
    #[serde(rename = "720p")]
    #[strum(serialize = "720p")]
    P720,
    /// 1920x1080
    #[serde(rename = "1080p")]
    #[strum(serialize = "1080p")]
    P1080,
    /// 3840x2160
    #[serde(rename = "4k", alias = "4K")]
    #[strum(serialize = "4k")]
    P4k,
}
