//! Named panel snapshots
//!
//! A preset is a [`SavedState`] under a name. The store remembers which one
//! is current and persists to a JSON file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gui::{Gui, SavedState};

/// Name of the preset every store starts on
pub const DEFAULT_PRESET: &str = "Default";

fn default_current() -> String {
    DEFAULT_PRESET.to_string()
}

/// Named snapshots of one panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetStore {
    #[serde(default = "default_current")]
    current: String,
    #[serde(default)]
    presets: BTreeMap<String, SavedState>,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self {
            current: default_current(),
            presets: BTreeMap::new(),
        }
    }
}

impl PresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the selected preset
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&SavedState> {
        self.presets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Store `state` under `name`, replacing any previous snapshot, and select it
    pub fn remember(&mut self, name: &str, state: SavedState) {
        if self.presets.insert(name.to_string(), state).is_some() {
            tracing::debug!("overwrote preset \"{}\"", name);
        }
        self.current = name.to_string();
    }

    /// Snapshot the whole panel under `name`
    pub fn capture(&mut self, name: &str, gui: &Gui) -> Result<()> {
        let state = gui.save()?;
        self.remember(name, state);
        Ok(())
    }

    /// Drop a preset. The default preset cannot be removed.
    pub fn remove(&mut self, name: &str) -> bool {
        if name == DEFAULT_PRESET {
            tracing::warn!("the default preset cannot be removed - ignored");
            return false;
        }
        let removed = self.presets.remove(name).is_some();
        if removed && self.current == name {
            self.current = default_current();
        }
        removed
    }

    /// Select a preset by name, returning its state
    pub fn select(&mut self, name: &str) -> Option<&SavedState> {
        if !self.presets.contains_key(name) {
            tracing::warn!("unknown preset \"{}\" - ignored", name);
            return None;
        }
        self.current = name.to_string();
        self.presets.get(name)
    }

    /// Select `name` and load it into the panel. Returns `false` if there is
    /// no such preset.
    pub fn apply(&mut self, name: &str, gui: &mut Gui) -> bool {
        match self.select(name) {
            Some(state) => {
                gui.load(state);
                true
            }
            None => false,
        }
    }

    /// Write the store as JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("saved {} presets to {}", self.presets.len(), path.display());
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let store: PresetStore = serde_json::from_str(&content)?;
        tracing::info!("loaded {} presets from {}", store.presets.len(), path.display());
        Ok(store)
    }
}
