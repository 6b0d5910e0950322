//! Take numbering and clip naming conventions.

use crate::{FILENAME_TIMESTAMP_FORMAT, SceneName};
use chrono::NaiveDateTime;
use clapper_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numbered attempt at a scene, starting at 1.
///
/// Displays zero-padded to two digits, matching clip filenames.
///
/// # Examples
///
/// ```
/// use clapper_core::TakeNumber;
///
/// let take = TakeNumber::new(3).unwrap();
/// assert_eq!(take.to_string(), "03");
/// assert!(TakeNumber::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TakeNumber(u32);

impl TakeNumber {
    /// The first take of any scene.
    pub const FIRST: TakeNumber = TakeNumber(1);

    /// Validate a take number.
    #[track_caller]
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::new(ValidationErrorKind::TakeNumber(value)));
        }
        Ok(Self(value))
    }

    /// The raw number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The take after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TakeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for TakeNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u32>().map_err(|e| {
            ValidationError::new(ValidationErrorKind::InvalidField {
                field: "take".to_string(),
                reason: e.to_string(),
            })
        })?;
        Self::new(value)
    }
}

impl TryFrom<u32> for TakeNumber {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TakeNumber> for u32 {
    fn from(value: TakeNumber) -> Self {
        value.0
    }
}

/// Clip filename for a take: `{scene}_take{NN}_{YYYYmmdd_HHMMSS}.mp4`.
///
/// ```
/// use chrono::NaiveDate;
/// use clapper_core::{SceneName, TakeNumber, take_filename};
///
/// let scene: SceneName = "storm".parse().unwrap();
/// let ts = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap().and_hms_opt(9, 5, 0).unwrap();
/// let name = take_filename(&scene, TakeNumber::new(2).unwrap(), ts);
/// assert_eq!(name, "storm_take02_20250704_090500.mp4");
/// ```
pub fn take_filename(scene: &SceneName, take: TakeNumber, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_take{}_{}.mp4",
        scene,
        take,
        timestamp.format(FILENAME_TIMESTAMP_FORMAT)
    )
}

/// Extract the take number from a clip filename belonging to `scene`.
///
/// Only matches when the name starts with exactly `{scene}_take` followed by
/// digits, so `storm_finale_take03_...` is not a take of `storm`.
pub fn parse_take_number(scene: &SceneName, filename: &str) -> Option<TakeNumber> {
    let rest = filename.strip_prefix(scene.as_str())?.strip_prefix("_take")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let boundary = rest[digits.len()..].chars().next();
    if !matches!(boundary, None | Some('_') | Some('.')) {
        return None;
    }
    digits.parse::<u32>().ok().and_then(|n| TakeNumber::new(n).ok())
}

/// The take after the highest existing one, or the first take.
pub fn next_take<I>(existing: I) -> TakeNumber
where
    I: IntoIterator<Item = TakeNumber>,
{
    existing
        .into_iter()
        .max()
        .map(TakeNumber::next)
        .unwrap_or(TakeNumber::FIRST)
}
