//! User preferences
//!
//! Persisted in LocalStorage on the web build, defaults elsewhere.

use serde::{Deserialize, Serialize};

/// Visual/interaction preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reduced motion override; None follows the system media query
    pub reduced_motion: Option<bool>,
    /// Soft glow around wave strokes
    pub glow: bool,
    /// Custom trailing cursor
    pub custom_cursor: bool,
    /// RNG seed override for reproducible ripples
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: None,
            glow: true,
            custom_cursor: true,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "onda_settings";

    /// Effective reduced-motion given the system preference.
    pub fn effective_reduced_motion(&self, system_prefers: bool) -> bool {
        self.reduced_motion.unwrap_or(system_prefers)
    }

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

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
