//! Tweakpanel Core - live-tweaking control panel model
//!
//! Binds properties of application-owned records to controllers (number
//! sliders, checkboxes, text fields, dropdowns, color pickers and buttons),
//! organised into a tree of folders. The crate holds all value semantics;
//! drawing the widgets and wiring native events is left to a presentation
//! layer that reads [`DisplayState`] and forwards raw input.
//!
//! # Architecture
//!
//! - [`Gui`] - Arena owning every folder and controller, addressed by id
//! - [`ControllerMut`] / [`FolderMut`] - Chainable handles borrowed from the GUI
//! - [`Record`] / [`Value`] - Shared, externally owned bound objects
//! - [`SavedState`] / [`PresetStore`] - Save, load and named snapshots
//! - [`GuiConfig`] - Construction options, persisted as TOML

pub mod binding;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod gesture;
pub mod gui;
pub mod input;
pub mod presets;
pub mod scheduler;
pub mod value;

pub use binding::Binding;
pub use color::{ColorFormat, normalize_color_string};
pub use config::GuiConfig;
pub use controller::{
    Bounds, ChangeEvent, ColorState, Controller, ControllerKind, ControllerMut, ControllerType,
    DEFAULT_STEP, DisplayState, NumberState, OptionState, Options,
};
pub use error::{GuiError, Result};
pub use export::{export_as_rust_flat, export_as_rust_grouped};
pub use gui::{
    AddArgs, Child, ControllerId, Folder, FolderId, FolderMut, Gui, OpenCloseEvent, SavedState,
};
pub use input::{Key, Modifiers, Point, Rect, WheelDeltaMode, WheelInput};
pub use presets::{DEFAULT_PRESET, PresetStore};
pub use value::{Function, List, Record, Value};
