//! Saved panel state
//!
//! A name-keyed snapshot of every controller's exported value, with nested
//! folders keyed by title. Holds live [`Value`]s so it can be loaded straight
//! back; [`SavedState::to_json`] gives the portable document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FolderId, Gui};
use crate::controller::{ControllerMut, ControllerType};
use crate::error::{GuiError, Result};
use crate::value::Value;

/// `{ "controllers": { name: value }, "folders": { title: { .. } } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(default)]
    pub controllers: BTreeMap<String, Value>,
    #[serde(default)]
    pub folders: BTreeMap<String, SavedState>,
}

impl SavedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty() && self.folders.is_empty()
    }

    /// Value saved for `name` at this level
    pub fn controller(&self, name: &str) -> Option<&Value> {
        self.controllers.get(name)
    }

    /// Nested state saved for the folder titled `title`
    pub fn folder(&self, title: &str) -> Option<&SavedState> {
        self.folders.get(title)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(json)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Gui {
    /// Snapshot `folder`, and its subfolders when `recursive`.
    ///
    /// Function controllers have nothing to save and are skipped. Two
    /// controllers (or two folders) with the same name at one level would
    /// collide, so that is an error rather than a silent overwrite.
    pub(crate) fn save_folder(&self, folder: FolderId, recursive: bool) -> Result<SavedState> {
        let node = self.get_folder(folder).ok_or(GuiError::UnknownFolder)?;
        let mut state = SavedState::new();

        for id in node.controllers() {
            let Some(ctrl) = self.ctrl(id) else {
                continue;
            };
            if ctrl.controller_type() == ControllerType::Function {
                continue;
            }
            if state.controllers.contains_key(ctrl.name()) {
                return Err(GuiError::DuplicateName {
                    name: ctrl.name().to_string(),
                });
            }
            state.controllers.insert(ctrl.name().to_string(), ctrl.save());
        }

        if recursive {
            for id in node.folders() {
                let Some(sub) = self.get_folder(id) else {
                    continue;
                };
                if state.folders.contains_key(sub.title()) {
                    return Err(GuiError::DuplicateFolder {
                        title: sub.title().to_string(),
                    });
                }
                let saved = self.save_folder(id, true)?;
                state.folders.insert(sub.title().to_string(), saved);
            }
        }

        Ok(state)
    }

    /// Apply a snapshot to `folder`. Names missing from `state` are left alone.
    pub(crate) fn load_folder(&mut self, folder: FolderId, state: &SavedState, recursive: bool) {
        let Some(node) = self.get_folder(folder) else {
            tracing::warn!("load called on a destroyed folder - ignored");
            return;
        };
        let controllers = node.controllers();
        let folders = node.folders();

        for id in controllers {
            let Some(ctrl) = self.ctrl(id) else {
                continue;
            };
            if ctrl.controller_type() == ControllerType::Function {
                continue;
            }
            if let Some(value) = state.controllers.get(ctrl.name()) {
                let value: Value = value.clone();
                ControllerMut::new(self, id).load(value);
            }
        }

        if recursive {
            for id in folders {
                let Some(title) = self.get_folder(id).map(|f| f.title().to_string()) else {
                    continue;
                };
                if let Some(sub) = state.folders.get(&title) {
                    self.load_folder(id, sub, true);
                }
            }
        }
    }

    /// Reset every controller in `folder`, and below it when `recursive`
    pub(crate) fn reset_folder(&mut self, folder: FolderId, recursive: bool) {
        let controllers = if recursive {
            self.controllers_under(folder)
        } else {
            self.get_folder(folder)
                .map(|f| f.controllers())
                .unwrap_or_default()
        };
        for id in controllers {
            ControllerMut::new(self, id).reset();
        }
    }
}
