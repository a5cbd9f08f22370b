//! Domain Value Objects
//!
//! Validated feature text. Lengths are counted in characters after trimming.

use std::fmt;
use thiserror::Error;

pub const TITLE_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureTextError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

fn validate(raw: &str, field: &'static str, max: usize) -> Result<String, FeatureTextError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FeatureTextError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(FeatureTextError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Feature title (1 to 200 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTitle(String);

impl FeatureTitle {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FeatureTextError> {
        validate(raw.as_ref(), "Title", TITLE_MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Feature description (1 to 1000 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescription(String);

impl FeatureDescription {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FeatureTextError> {
        validate(raw.as_ref(), "Description", DESCRIPTION_MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(FeatureTitle::new("x").is_ok());
        assert!(FeatureTitle::new("x".repeat(200)).is_ok());
        assert_eq!(
            FeatureTitle::new("x".repeat(201)),
            Err(FeatureTextError::TooLong {
                field: "Title",
                max: 200
            })
        );
        assert_eq!(
            FeatureTitle::new(""),
            Err(FeatureTextError::Empty { field: "Title" })
        );
        assert!(FeatureTitle::new("   ").is_err());
    }

    #[test]
    fn test_description_bounds() {
        assert!(FeatureDescription::new("d").is_ok());
        assert!(FeatureDescription::new("d".repeat(1000)).is_ok());
        assert!(FeatureDescription::new("d".repeat(1001)).is_err());
        assert!(FeatureDescription::new("\n\t").is_err());
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(FeatureTitle::new("  Dark mode ").unwrap().as_str(), "Dark mode");
    }

    #[test]
    fn test_length_counts_characters() {
        // 200 three-byte characters
        assert!(FeatureTitle::new("機".repeat(200)).is_ok());
    }

    #[test]
    fn test_error_message() {
        let err = FeatureDescription::new("").unwrap_err();
        assert_eq!(err.to_string(), "Description is required");
    }
}
