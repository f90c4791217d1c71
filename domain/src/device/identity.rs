//! Device identity value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum number of characters in a short name
pub const SHORT_NAME_MAX_LEN: usize = 4;

/// Long name applied when the operator does not supply one
pub const DEFAULT_LONG_NAME: &str = "OneShot Configurator";

/// Short name applied when the operator does not supply one
pub const DEFAULT_SHORT_NAME: &str = "BCMI";

/// Short display name of a device (Value Object)
///
/// Holds 0 to 4 ASCII letters. The same value is written as the owner short
/// name and as the ham identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortName(String);

impl ShortName {
    /// Validate and wrap a short name
    pub fn try_new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let valid = value.chars().count() <= SHORT_NAME_MAX_LEN
            && value.chars().all(|c| c.is_ascii_alphabetic());
        if valid {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidShortName(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ShortName {
    fn default() -> Self {
        Self(DEFAULT_SHORT_NAME.to_string())
    }
}

impl FromStr for ShortName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

impl TryFrom<String> for ShortName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ShortName> for String {
    fn from(name: ShortName) -> Self {
        name.0
    }
}

impl std::fmt::Display for ShortName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display names written to the device owner record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Free text, passed to the tool exactly as given
    pub long_name: String,
    pub short_name: ShortName,
}

impl DeviceIdentity {
    pub fn new(long_name: impl Into<String>, short_name: ShortName) -> Self {
        Self {
            long_name: long_name.into(),
            short_name,
        }
    }

    /// Build an identity from raw strings, validating the short name
    pub fn try_new(
        long_name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(long_name, ShortName::try_new(short_name)?))
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_NAME, ShortName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_accepts_letters() {
        for name in ["", "A", "ab", "BCMI", "zZzZ"] {
            assert_eq!(ShortName::try_new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_short_name_rejects_too_long() {
        assert_eq!(
            ShortName::try_new("ABCDE"),
            Err(DomainError::InvalidShortName("ABCDE".to_string()))
        );
    }

    #[test]
    fn test_short_name_rejects_non_letters() {
        for name in ["AB1", "A B", "AB-", "ÄB", "台灣"] {
            assert!(ShortName::try_new(name).is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn test_short_name_parse() {
        let name: ShortName = "TW".parse().unwrap();
        assert_eq!(name.to_string(), "TW");
        assert!("1234".parse::<ShortName>().is_err());
    }

    #[test]
    fn test_short_name_deserialize_validates() {
        let ok: ShortName = serde_json::from_str("\"MESH\"").unwrap();
        assert_eq!(ok.as_str(), "MESH");
        assert!(serde_json::from_str::<ShortName>("\"MESHY\"").is_err());
    }

    #[test]
    fn test_default_identity() {
        let identity = DeviceIdentity::default();
        assert_eq!(identity.long_name, "OneShot Configurator");
        assert_eq!(identity.short_name.as_str(), "BCMI");
    }

    #[test]
    fn test_identity_keeps_long_name_verbatim() {
        let identity = DeviceIdentity::try_new("  Node \"#1\" 台北 $HOME  ", "ab").unwrap();
        assert_eq!(identity.long_name, "  Node \"#1\" 台北 $HOME  ");
    }
}
