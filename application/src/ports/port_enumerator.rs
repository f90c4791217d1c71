//! Port enumeration port

use thiserror::Error;

#[derive(Error, Debug)]
#[error("Serial port enumeration failed: {0}")]
pub struct EnumerationError(pub String);

/// Lists currently addressable serial devices.
///
/// Returns raw names in the order the platform reports them; validation
/// into [`PortRef`](oneshot_domain::PortRef) happens in the use case.
pub trait PortEnumeratorPort: Send + Sync {
    fn list_ports(&self) -> Result<Vec<String>, EnumerationError>;
}
