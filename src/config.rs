//! User settings, stored as JSON under the cache directory.

use crate::display::{
    parse_color, CellTweak, FontMeasure, GlyphMetrics, MonospaceEstimate, Palette,
};
use crate::session::ShellOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "cellview";
const SETTINGS_FILE: &str = "settings.json";
const LOG_DIR: &str = "logs";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub font_name: String,
    pub font_size: f32,
    pub foreground: String,
    pub background: String,
    pub core_command: String,
    pub core_args: Vec<String>,
    pub resize_debounce_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Overrides the host's chrome allowance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_tweak: Option<CellTweak>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_name: "monospace".to_string(),
            font_size: 14.0,
            foreground: "#d0d0d0".to_string(),
            background: "#1c1c1c".to_string(),
            core_command: "lem-rpc".to_string(),
            core_args: Vec::new(),
            resize_debounce_ms: 200,
            log_filter: None,
            cell_tweak: None,
        }
    }
}

impl Settings {
    /// Palette from the configured colors; unparsable entries fall back to the
    /// defaults.
    pub fn palette(&self) -> Palette {
        let defaults = Palette::default();
        let pick = |field: &str, value: &str, fallback| {
            parse_color(value).unwrap_or_else(|| {
                tracing::warn!(field, value, "invalid color in settings, using default");
                fallback
            })
        };
        Palette {
            foreground: pick("foreground", &self.foreground, defaults.foreground),
            background: pick("background", &self.background, defaults.background),
        }
    }

    pub fn metrics(&self) -> GlyphMetrics {
        self.metrics_with(&MonospaceEstimate::default())
    }

    /// Cell geometry for the configured font as `measure` reports it.
    pub fn metrics_with(&self, measure: &dyn FontMeasure) -> GlyphMetrics {
        GlyphMetrics::measure(&self.font_name, self.font_size, measure)
            .or_else(|| {
                tracing::warn!(size = self.font_size, "invalid font size in settings, using default");
                GlyphMetrics::measure(&self.font_name, Settings::default().font_size, measure)
            })
            .unwrap_or_else(|| GlyphMetrics::fixed(&self.font_name, 14.0, 9, 16))
    }

    pub fn tweak_or(&self, host_default: CellTweak) -> CellTweak {
        self.cell_tweak.unwrap_or(host_default)
    }

    pub fn resize_quiet(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn shell_options(&self, host_tweak: CellTweak) -> ShellOptions {
        ShellOptions {
            palette: self.palette(),
            metrics: self.metrics(),
            tweak: self.tweak_or(host_tweak),
            resize_quiet: self.resize_quiet(),
        }
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

/// Writes the default settings to `path` unless a file is already there.
pub fn ensure_settings_file_at(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn load_settings() -> Settings {
    match get_settings_path() {
        Some(path) => load_settings_from(&path),
        None => Settings::default(),
    }
}

/// Missing or unreadable files give the defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "settings not read");
            return Settings::default();
        }
    };
    match serde_json::from_str(&data) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings file invalid, using defaults");
            Settings::default()
        }
    }
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
