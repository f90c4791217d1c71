//! Default identity from TOML (`[identity]` section)
//!
//! Used when the command line omits `--long-name` or `--short-name`.

use oneshot_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_LONG_NAME, DEFAULT_SHORT_NAME, DeviceIdentity, ShortName,
};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// Raw identity configuration from TOML
///
/// The short name is kept as a plain string so a bad value is reported as a
/// [`ConfigIssue`] instead of failing the whole load.
///
/// Names are free text, so scalars that environment variables parse as
/// numbers or booleans (`ONESHOT_IDENTITY__LONG_NAME=2024`) are read back
/// as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityConfig {
    #[serde(deserialize_with = "scalar_as_string")]
    pub long_name: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub short_name: String,
}

impl Default for FileIdentityConfig {
    fn default() -> Self {
        Self {
            long_name: DEFAULT_LONG_NAME.to_string(),
            short_name: DEFAULT_SHORT_NAME.to_string(),
        }
    }
}

impl FileIdentityConfig {
    /// Parse into a domain identity, falling back to the built-in short name
    /// when the configured one is invalid.
    pub fn to_identity(&self) -> (DeviceIdentity, Vec<ConfigIssue>) {
        match ShortName::try_new(self.short_name.as_str()) {
            Ok(short) => (DeviceIdentity::new(self.long_name.clone(), short), Vec::new()),
            Err(e) => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::InvalidShortName {
                        value: self.short_name.clone(),
                    },
                    format!("identity.short_name: {}", e),
                );
                (
                    DeviceIdentity::new(self.long_name.clone(), ShortName::default()),
                    vec![issue],
                )
            }
        }
    }
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl de::Visitor<'_> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}
