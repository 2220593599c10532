//! Panel configuration (~/.config/tweakpanel/config.toml)
//!
//! Construction options for a [`crate::Gui`]. Stored as TOML; every field has
//! a default so partial files work.
//!
//! `width` and `touch_styles` are layout hints only. The panel keeps them
//! and hands them out through [`crate::Gui::config`] for whatever draws it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// GUI construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiConfig {
    /// Title of the root folder (default: "Controls")
    #[serde(default = "default_title")]
    pub title: String,
    /// Whether the root starts closed (default: false)
    #[serde(default)]
    pub closed: bool,
    /// Whether new folders start closed (default: false)
    #[serde(default)]
    pub close_folders: bool,
    /// Panel width in px; not read by the panel itself (default: 245)
    #[serde(default = "default_width")]
    pub width: f64,
    /// Whether the renderer should use touch-friendly sizing; not read by the
    /// panel itself (default: true)
    #[serde(default = "default_true")]
    pub touch_styles: bool,
    /// Whether the panel has a scroll bar; disambiguates touch and wheel
    /// gestures on sliders (default: false)
    #[serde(default)]
    pub scrollable: bool,
    /// Pixels a press on a number field must travel before it drags (default: 5)
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,
    /// Quiet period before a slider wheel gesture commits, in ms (default: 400)
    #[serde(default = "default_wheel_debounce_ms")]
    pub wheel_debounce_ms: u64,
}

fn default_title() -> String {
    "Controls".to_string()
}
fn default_width() -> f64 {
    245.0
}
fn default_true() -> bool {
    true
}
fn default_drag_threshold() -> f64 {
    crate::gesture::DRAG_THRESHOLD
}
fn default_wheel_debounce_ms() -> u64 {
    400
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            closed: false,
            close_folders: false,
            width: default_width(),
            touch_styles: default_true(),
            scrollable: false,
            drag_threshold: default_drag_threshold(),
            wheel_debounce_ms: default_wheel_debounce_ms(),
        }
    }
}

impl GuiConfig {
    /// Config with a custom root title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "tweakpanel", "tweakpanel")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> GuiConfig {
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .and_then(|path| match load_from(&path) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::debug!("using default config ({}): {}", path.display(), err);
                None
            }
        })
        .unwrap_or_default()
}

/// Loads the configuration from a specific file.
pub fn load_from(path: &Path) -> Result<GuiConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to a specific file, creating parent directories.
pub fn save_to(path: &Path, config: &GuiConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    tracing::info!("saved panel config to {}", path.display());
    Ok(())
}
