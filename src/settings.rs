//! User preferences
//!
//! Persisted in LocalStorage, separately from simulation state (which
//! deliberately does not survive a reload).

use serde::{Deserialize, Serialize};

/// Visualizer preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Overlay the theoretical curve on the histogram in particle mode
    pub overlay_curve: bool,
    /// Show the FPS counter in the HUD
    pub show_fps: bool,
    /// Maximum hit markers drawn in the 3D scene
    pub max_markers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overlay_curve: true,
            show_fps: true,
            max_markers: 2000,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "slitviz_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {e}"),
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
