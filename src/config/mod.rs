//! Configuration management for the history copy extension.
//!
//! Configuration is loaded from host settings under the "repeater-history"
//! key, with missing fields filled from defaults, and kept in a process-wide singleton that the
//! extension reads when it is constructed.

pub mod keys;
pub mod schema;

pub use keys::KeyChord;
pub use schema::{HistoryCopyConfig, KeyBindings};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Settings key the extension reads its configuration from.
pub const SETTINGS_KEY: &str = "repeater-history";

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<HistoryCopyConfig>> =
    Lazy::new(|| RwLock::new(HistoryCopyConfig::default()));

/// Loads configuration from host settings.
///
/// Reads the "repeater-history" settings, validates them, and updates the
/// global configuration. Fields missing from the settings take their default
/// values. Settings that fail to deserialize are logged and ignored.
///
/// # Returns
///
/// `Ok(HistoryCopyConfig)` with the loaded configuration. If validation
/// fails, the global configuration is reset to defaults and `Err` describes
/// the rejected settings.
///
/// # Example
///
/// ```no_run
/// use repeater_history::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "repeater-history": {
///         "captureTool": "intruder",
///         "groupByDestination": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert!(!config.group_by_destination);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<HistoryCopyConfig, String> {
    let mut config = HistoryCopyConfig::default();

    if let Some(settings) = settings_json {
        if let Some(extension_settings) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<HistoryCopyConfig>(extension_settings.clone()) {
                Ok(user_config) => {
                    config = user_config;
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY,
                        e
                    );
                }
            }
        }
    }

    if let Err(e) = config.validate() {
        log::warn!("Invalid {} settings: {}. Using defaults.", SETTINGS_KEY, e);
        reset_config();
        return Err(format!("Invalid configuration: {}", e));
    }

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns a clone of the current configuration, or the defaults if nothing
/// has been loaded yet.
pub fn get_config() -> HistoryCopyConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| HistoryCopyConfig::default())
}

/// Updates the global configuration in place.
///
/// Reverts to defaults if the update leaves the configuration invalid.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut HistoryCopyConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = HistoryCopyConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = HistoryCopyConfig::default();
    }
}
