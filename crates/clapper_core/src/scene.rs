//! Validated scene names.

use clapper_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A scene identifier safe to embed in file and directory names.
///
/// Only ASCII letters, digits, `_` and `-` are accepted, so a scene name can
/// never escape its directory.
///
/// # Examples
///
/// ```
/// use clapper_core::SceneName;
///
/// let scene: SceneName = "bridge_four".parse().unwrap();
/// assert_eq!(scene.as_str(), "bridge_four");
///
/// assert!("../secrets".parse::<SceneName>().is_err());
/// assert!("".parse::<SceneName>().is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct SceneName(String);

impl SceneName {
    /// Validate and wrap a scene name.
    #[track_caller]
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(Self(name))
        } else {
            Err(ValidationError::new(ValidationErrorKind::SceneName(name)))
        }
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SceneName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SceneName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SceneName> for String {
    fn from(value: SceneName) -> Self {
        value.0
    }
}

impl AsRef<str> for SceneName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
