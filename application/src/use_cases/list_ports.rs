//! List Ports use case
//!
//! Enumerates serial ports. An empty result, or a failed enumeration,
//! becomes an empty [`PortSelection`] that renders as the placeholder.

use crate::ports::port_enumerator::PortEnumeratorPort;
use oneshot_domain::{PortRef, PortSelection};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for listing the ports a device could be attached to
pub struct ListPortsUseCase<E: PortEnumeratorPort + ?Sized> {
    enumerator: Arc<E>,
}

impl<E: PortEnumeratorPort + ?Sized> ListPortsUseCase<E> {
    pub fn new(enumerator: Arc<E>) -> Self {
        Self { enumerator }
    }

    pub fn execute(&self) -> PortSelection {
        let names = match self.enumerator.list_ports() {
            Ok(names) => names,
            Err(e) => {
                warn!("{}", e);
                return PortSelection::empty();
            }
        };

        let ports: Vec<PortRef> = names
            .into_iter()
            .filter_map(|name| match PortRef::try_new(name) {
                Ok(port) => Some(port),
                Err(e) => {
                    debug!("Skipping port entry: {}", e);
                    None
                }
            })
            .collect();

        info!("Found {} serial port(s)", ports.len());
        PortSelection::new(ports)
    }
}
