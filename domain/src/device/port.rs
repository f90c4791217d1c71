//! Serial port references and the result of port enumeration

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Entry shown in place of a port list when nothing is attached
pub const NO_PORTS_PLACEHOLDER: &str = "No available ports";

/// An addressable serial device, e.g. `/dev/ttyUSB0` or `COM3` (Value Object)
///
/// The name is opaque: it is never parsed, only handed to the external tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortRef(String);

impl PortRef {
    /// Wrap a port name
    ///
    /// Rejects the empty string and the "no ports" placeholder.
    pub fn try_new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyPort);
        }
        if name == NO_PORTS_PLACEHOLDER {
            return Err(DomainError::PlaceholderPort(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PortRef {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<PortRef> for String {
    fn from(port: PortRef) -> Self {
        port.0
    }
}

impl std::fmt::Display for PortRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ports found by one enumeration pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSelection {
    ports: Vec<PortRef>,
}

impl PortSelection {
    pub fn new(ports: Vec<PortRef>) -> Self {
        Self { ports }
    }

    /// Selection with no ports (renders as the placeholder)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ports(&self) -> &[PortRef] {
        &self.ports
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Entries to show the operator
    ///
    /// Exactly one placeholder entry when no ports were found.
    pub fn entries(&self) -> Vec<String> {
        if self.ports.is_empty() {
            vec![NO_PORTS_PLACEHOLDER.to_string()]
        } else {
            self.ports.iter().map(|p| p.to_string()).collect()
        }
    }

    /// Entry that would be selected by default (first entry)
    pub fn default_entry(&self) -> String {
        self.ports
            .first()
            .map(|p| p.to_string())
            .unwrap_or_else(|| NO_PORTS_PLACEHOLDER.to_string())
    }

    /// Resolve the target port: the requested one, or the default entry
    ///
    /// An explicit request is passed through without checking membership,
    /// since ports can appear between enumeration and use.
    pub fn resolve(&self, requested: Option<&str>) -> Result<PortRef, DomainError> {
        match requested {
            Some(name) => PortRef::try_new(name),
            None => PortRef::try_new(self.default_entry()),
        }
    }
}
