use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// A power description that passed update validation.
///
/// Only descriptions submitted through an update go through this type.
/// Seeded rows may carry shorter text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PowerDescription(String);

impl PowerDescription {
    /// Minimum length, counted in characters rather than bytes.
    pub const MIN_CHARS: usize = 20;

    /// Validates and wraps a description.
    ///
    /// # Errors
    /// Returns [`CoreError::DescriptionTooShort`] if `text` has fewer than
    /// [`Self::MIN_CHARS`] characters.
    pub fn new(text: impl Into<String>) -> Result<Self, CoreError> {
        let text = text.into();
        let length = text.chars().count();
        if length < Self::MIN_CHARS {
            return Err(CoreError::DescriptionTooShort { length, minimum: Self::MIN_CHARS });
        }
        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PowerDescription {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PowerDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_at_minimum_length_is_accepted() {
        let text = "a".repeat(PowerDescription::MIN_CHARS);
        let desc = match PowerDescription::new(text.clone()) {
            Ok(d) => d,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(desc.as_str(), text);
    }

    #[test]
    fn description_one_below_minimum_is_rejected() {
        let err = PowerDescription::new("a".repeat(19));
        assert_eq!(err, Err(CoreError::DescriptionTooShort { length: 19, minimum: 20 }));
    }

    #[test]
    fn description_length_counts_characters_not_bytes() {
        // 10 two-byte characters: 20 bytes, but only 10 characters.
        assert!(PowerDescription::new("é".repeat(10)).is_err());
        assert!(PowerDescription::new("é".repeat(20)).is_ok());
    }

    proptest::proptest! {
        #[test]
        fn proptest_validity_matches_char_count(s in "\\PC{0,40}") {
            let valid = s.chars().count() >= PowerDescription::MIN_CHARS;
            proptest::prop_assert_eq!(PowerDescription::new(s).is_ok(), valid);
        }
    }
}
