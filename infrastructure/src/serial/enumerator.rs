//! Serial port enumeration backed by the `serialport` crate.

use oneshot_application::ports::port_enumerator::{EnumerationError, PortEnumeratorPort};
use serialport::{SerialPortInfo, SerialPortType};
use tracing::debug;

/// Lists the serial ports the operating system currently reports
#[derive(Debug, Clone, Default)]
pub struct SerialPortEnumerator {
    /// Only report USB-attached ports
    usb_only: bool,
}

impl SerialPortEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip built-in UARTs and Bluetooth ports
    pub fn usb_only(mut self) -> Self {
        self.usb_only = true;
        self
    }

    fn keep(&self, info: &SerialPortInfo) -> bool {
        !self.usb_only || matches!(info.port_type, SerialPortType::UsbPort(_))
    }
}

impl PortEnumeratorPort for SerialPortEnumerator {
    fn list_ports(&self) -> Result<Vec<String>, EnumerationError> {
        let ports = serialport::available_ports().map_err(enumeration_error)?;

        let names: Vec<String> = ports
            .into_iter()
            .filter(|info| self.keep(info))
            .map(|info| {
                debug!("Found serial port {} ({:?})", info.port_name, info.port_type);
                info.port_name
            })
            .collect();

        Ok(names)
    }
}

/// The error's own `Display` supplies the context prefix
fn enumeration_error(e: serialport::Error) -> EnumerationError {
    EnumerationError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    fn usb(name: &str) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_string(),
            port_type: SerialPortType::UsbPort(UsbPortInfo {
                vid: 0x10c4,
                pid: 0xea60,
                serial_number: None,
                manufacturer: None,
                product: None,
            }),
        }
    }

    fn builtin(name: &str) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_string(),
            port_type: SerialPortType::Unknown,
        }
    }

    #[test]
    fn test_default_keeps_every_port() {
        let enumerator = SerialPortEnumerator::new();
        assert!(enumerator.keep(&usb("/dev/ttyUSB0")));
        assert!(enumerator.keep(&builtin("/dev/ttyS0")));
    }

    #[test]
    fn test_usb_only_filters_builtin_ports() {
        let enumerator = SerialPortEnumerator::new().usb_only();
        assert!(enumerator.keep(&usb("/dev/ttyACM0")));
        assert!(!enumerator.keep(&builtin("/dev/ttyS0")));
    }

    #[test]
    fn test_enumeration_error_has_single_prefix() {
        let err = enumeration_error(serialport::Error::new(
            serialport::ErrorKind::NoDevice,
            "udev unavailable",
        ));
        assert_eq!(
            err.to_string(),
            "Serial port enumeration failed: udev unavailable"
        );
    }

    #[test]
    fn test_list_ports_does_not_panic() {
        // Machines without serial hardware report an empty list or an error
        let _ = SerialPortEnumerator::new().list_ports();
    }
}
