//! Configuration file loading for meshtastic-oneshot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `ONESHOT_<SECTION>__<KEY>` (e.g. `ONESHOT_TIMEOUTS__PROBE_MILLIS=500`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./oneshot.toml` or `./.oneshot.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/meshtastic-oneshot/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApplyConfig, FileConfig, FileIdentityConfig, FileOutputConfig,
    FileTimeoutsConfig, FileToolConfig,
};
pub use loader::ConfigLoader;
