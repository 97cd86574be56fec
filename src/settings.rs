//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Gameplay tuning stays in `consts`;
//! these are the choices a player makes before a run.

use serde::{Deserialize, Serialize};

use crate::sim::CharacterKind;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Which character rig to play
    pub character: CharacterKind,
    /// Optional cap on concurrent skeletons. The arcade default is no cap.
    #[serde(default)]
    pub max_enemies: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            character: CharacterKind::Chicken,
            max_enemies: None,
        }
    }
}

impl Settings {
    /// Settings for a character picked by name (unknown names get the warrior)
    pub fn with_character_name(name: &str) -> Self {
        Self {
            character: CharacterKind::from_str_or_default(name),
            ..Self::default()
        }
    }

    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "math_mage_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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
