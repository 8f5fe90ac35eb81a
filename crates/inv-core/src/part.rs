//! Part classification and derived identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::Pk;
use crate::errors::CoreError;

/// The `TYPE` column of a part database row.
///
/// Generic and critical parts are virtual placeholders used by schematic
/// symbols; specific parts are orderable components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    Generic,
    Critical,
    Specific,
}

impl PartType {
    #[must_use]
    pub const fn is_virtual(self) -> bool {
        matches!(self, Self::Generic | Self::Critical)
    }

    /// Whether categories of this type are registered with the KiCad plugin.
    #[must_use]
    pub const fn is_kicad_category(self) -> bool {
        self.is_virtual()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Critical => "critical",
            Self::Specific => "specific",
        }
    }

    /// Classify free text; anything other than generic/critical is specific.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        text.parse().unwrap_or(Self::Specific)
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "critical" => Ok(Self::Critical),
            "specific" => Ok(Self::Specific),
            other => Err(CoreError::Validation(format!("unknown part type '{other}'"))),
        }
    }
}

/// Internal part number: designator, zero-padded pk, then the raw pk.
///
/// `format_ipn("R", 42)` is `R000042-42`.
#[must_use]
pub fn format_ipn(designator: &str, pk: Pk) -> String {
    format!("{designator}{pk:06}-{pk}")
}

/// Web UI link for a part.
#[must_use]
pub fn part_link(site_url: &str, pk: Pk) -> String {
    format!("{}/part/{pk}/", site_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn generic_and_critical_are_virtual() {
        assert!(PartType::classify("generic").is_virtual());
        assert!(PartType::classify(" Critical ").is_virtual());
        assert!(!PartType::classify("specific").is_virtual());
        assert_eq!(PartType::classify("whatever"), PartType::Specific);
    }

    #[test]
    fn ipn_pads_pk_to_six_digits() {
        assert_eq!(format_ipn("R", 42), "R000042-42");
        assert_eq!(format_ipn("", 1_234_567), "1234567-1234567");
    }

    #[test]
    fn link_strips_trailing_slash() {
        assert_eq!(
            part_link("http://inventree.localhost/", 7),
            "http://inventree.localhost/part/7/"
        );
    }
}
