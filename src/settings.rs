//! Game settings
//!
//! Everything that used to differ between game variants (spawn cooldown,
//! what the spawn key drops, display language) lives here so one engine can
//! serve any catalog. Read from LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::SPAWN_COOLDOWN_MS;
use crate::sim::{Catalog, EngineError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum time between two spawn-key presses (milliseconds)
    pub spawn_cooldown_ms: f64,
    /// Block type dropped by the spawn key
    pub default_spawn_type: String,
    /// Locale used for block labels
    pub locale: String,
    /// Let a merge result immediately merge with whatever it lands on
    pub cascade_merges: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spawn_cooldown_ms: SPAWN_COOLDOWN_MS,
            default_spawn_type: "Lava".to_string(),
            locale: "en".to_string(),
            cascade_merges: false,
        }
    }
}

impl Settings {
    /// Make sure the settings only name block types the catalog knows
    pub fn validate(&self, catalog: &Catalog) -> Result<(), EngineError> {
        if !catalog.contains(&self.default_spawn_type) {
            return Err(EngineError::UnknownBlockType(
                self.default_spawn_type.clone(),
            ));
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "merge_blocks_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
