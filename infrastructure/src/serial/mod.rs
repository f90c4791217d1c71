//! Serial port discovery.

mod enumerator;

pub use enumerator::SerialPortEnumerator;
