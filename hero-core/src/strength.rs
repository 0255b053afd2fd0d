use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How strongly a hero wields a particular power.
///
/// Stored and serialized as exactly `"Weak"`, `"Average"` or `"Strong"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Weak,
    Average,
    Strong,
}

impl Strength {
    /// All accepted strengths, weakest first.
    pub const ALL: [Strength; 3] = [Strength::Weak, Strength::Average, Strength::Strong];

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Average => "Average",
            Strength::Strong => "Strong",
        }
    }
}

impl FromStr for Strength {
    type Err = CoreError;

    /// Parses a strength. Matching is exact and case-sensitive.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidStrength`] for anything but the three
    /// canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strength::ALL
            .into_iter()
            .find(|strength| strength.as_str() == s)
            .ok_or_else(|| CoreError::InvalidStrength { value: s.to_owned() })
    }
}

impl TryFrom<&str> for Strength {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
