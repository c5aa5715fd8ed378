//! Track settings and preferences
//!
//! Stored as JSON. Nothing here affects what the simulation computes, only
//! how often it is asked to and how the result is presented.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Track settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed
    pub seed: u64,

    // === Cadence ===
    /// Milliseconds between ticks
    pub tick_interval_ms: u32,
    /// Most ticks to run in one frame when catching up
    pub max_catch_up: u32,
    /// Start with marbles held still
    pub start_paused: bool,

    // === Projection ===
    pub cell_width: f32,
    pub cell_height: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Demo ===
    /// Ticks the native demo runs before exiting
    pub demo_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,

            tick_interval_ms: TICK_INTERVAL_MS,
            max_catch_up: 4,
            start_paused: false,

            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            demo_ticks: 40,
        }
    }
}

impl Settings {
    /// Tick period in seconds
    pub fn tick_interval_secs(&self) -> f32 {
        self.tick_interval_ms.max(1) as f32 / 1000.0
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::warn!("Invalid settings JSON: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string_pretty(self).ok()
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
            }
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> bool {
        let Some(json) = self.to_json() else {
            return false;
        };
        match std::fs::write(path, json) {
            Ok(()) => {
                log::info!("Settings saved to {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("Failed to save settings to {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Clamp out-of-range values
    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.tick_interval_ms = self.tick_interval_ms.max(1);
        self.max_catch_up = self.max_catch_up.max(1);
        self
    }
}
