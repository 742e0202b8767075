use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use shared::{domain::WorkoutType, protocol::PopupOptions};

pub const DEFAULT_SETTINGS_FILE: &str = "tracker.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackerSettings {
    pub zoom_level: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub popup_max_width: u32,
    pub popup_min_width: u32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            zoom_level: 13,
            tile_url: "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png".into(),
            tile_attribution:
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                    .into(),
            popup_max_width: 250,
            popup_min_width: 100,
        }
    }
}

impl TrackerSettings {
    /// Popups stay open until dismissed and are styled per workout type.
    pub fn popup_options(&self, workout_type: WorkoutType) -> PopupOptions {
        PopupOptions {
            max_width: self.popup_max_width,
            min_width: self.popup_min_width,
            auto_close: false,
            close_on_click: false,
            class_name: workout_type.popup_class(),
        }
    }
}

/// Defaults, then keys from the TOML file at `path` if it exists, then
/// `APP__*` environment variables. Values that fail to parse are skipped.
pub fn load_settings(path: impl AsRef<Path>) -> TrackerSettings {
    let mut settings = TrackerSettings::default();

    if let Ok(raw) = fs::read_to_string(path.as_ref()) {
        apply_file_overrides(&mut settings, &raw);
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut TrackerSettings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        tracing::warn!("ignoring malformed tracker settings file");
        return;
    };

    if let Some(v) = file_cfg.get("zoom_level").and_then(toml::Value::as_integer) {
        if let Ok(zoom) = u8::try_from(v) {
            settings.zoom_level = zoom;
        }
    }
    if let Some(v) = file_cfg.get("tile_url").and_then(toml::Value::as_str) {
        settings.tile_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("tile_attribution").and_then(toml::Value::as_str) {
        settings.tile_attribution = v.to_string();
    }
    if let Some(v) = file_cfg.get("popup_max_width").and_then(toml::Value::as_integer) {
        if let Ok(width) = u32::try_from(v) {
            settings.popup_max_width = width;
        }
    }
    if let Some(v) = file_cfg.get("popup_min_width").and_then(toml::Value::as_integer) {
        if let Ok(width) = u32::try_from(v) {
            settings.popup_min_width = width;
        }
    }
}

fn apply_env_overrides(settings: &mut TrackerSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("APP__ZOOM_LEVEL") {
        if let Ok(parsed) = v.trim().parse::<u8>() {
            settings.zoom_level = parsed;
        }
    }
    if let Some(v) = var("APP__TILE_URL") {
        settings.tile_url = v;
    }
    if let Some(v) = var("APP__TILE_ATTRIBUTION") {
        settings.tile_attribution = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
