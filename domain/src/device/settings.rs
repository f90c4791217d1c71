//! Radio and network settings applied alongside the identity

use serde::{Deserialize, Serialize};

/// Channel URL seeding the TW mesh channels (primary, SignalTest, Emergency)
///
/// Opaque to this program; the external tool decodes it.
pub const DEFAULT_CHANNEL_URL: &str = "https://meshtastic.org/e/#CgMSAQEKNxIgisDhHrNpJPlGX3GBJBX6kjuK7KQNp4Z0M7OTDpnX5N4aBk1lc2hUVyUBAAAAKAEwAToCCBAKNhIgy1HciVgpl5Hzh05KJUe_umWUH8XhG3UjR1rvZHfUHFUaClNpZ25hbFRlc3QoATABOgIIIAo2EiDLaOd_zp9Ol__gAUB_6YLBvNGjGkJXQ_3R2omjT7D9JhoKRW1lcmdlbmN5ISgBMAE6AgggEg4IATgIQANIAVARWBBoAQ";

/// Fixed parameter set written with every apply
///
/// Defaults reproduce the Taiwan community profile. Each field maps to one
/// `--set <key> <value>` pair (or `--seturl` for the channel URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// LoRa region code (`lora.region`)
    pub region: String,
    /// Enable the MQTT module (`mqtt.enabled`)
    pub mqtt_enabled: bool,
    /// Route MQTT through the connected client (`mqtt.proxy_to_client_enabled`)
    pub mqtt_proxy_to_client_enabled: bool,
    /// Publish position to the public map (`mqtt.map_reporting_enabled`)
    pub mqtt_map_reporting_enabled: bool,
    /// Transmit power in dBm (`lora.txPower`)
    pub tx_power: u8,
    /// Provisioning URL carrying the channel set (`--seturl`)
    pub channel_url: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            region: "TW".to_string(),
            mqtt_enabled: true,
            mqtt_proxy_to_client_enabled: true,
            mqtt_map_reporting_enabled: true,
            tx_power: 20,
            channel_url: DEFAULT_CHANNEL_URL.to_string(),
        }
    }
}
