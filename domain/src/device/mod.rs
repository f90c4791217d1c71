//! Device subdomain: who the device is, where it is attached, and which
//! radio settings it receives.

pub mod identity;
pub mod port;
pub mod settings;
