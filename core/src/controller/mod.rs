//! Controllers: one bound value, one widget
//!
//! Every controller shares the same base state (binding, label, callbacks,
//! listen handle) and differs only in its [`ControllerKind`]. The GUI arena
//! owns controllers; they refer back to their folder by id.

mod color;
mod display;
mod handle;
mod number;
mod option;

pub use color::ColorState;
pub use display::DisplayState;
pub use handle::ControllerMut;
pub use number::{Bounds, DEFAULT_STEP, NumberState, snap_to_step, to_precision};
pub use option::{OptionState, Options};

use crate::binding::Binding;
use crate::gui::{ControllerId, FolderId};
use crate::scheduler::FrameHandle;
use crate::value::{Record, Value};

/// Payload delivered to change callbacks
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub controller: ControllerId,
    pub object: Record,
    pub property: String,
    pub value: Value,
}

/// Change / finish-change callback
pub type ChangeCallback = Box<dyn FnMut(&ChangeEvent)>;

/// Which widget a controller drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerType {
    Boolean,
    String,
    Function,
    Number,
    Option,
    Color,
}

/// Per-kind controller data
#[derive(Debug)]
pub enum ControllerKind {
    Boolean,
    String,
    Function,
    Number(NumberState),
    Option(OptionState),
    Color(ColorState),
}

impl ControllerKind {
    pub fn controller_type(&self) -> ControllerType {
        match self {
            ControllerKind::Boolean => ControllerType::Boolean,
            ControllerKind::String => ControllerType::String,
            ControllerKind::Function => ControllerType::Function,
            ControllerKind::Number(_) => ControllerType::Number,
            ControllerKind::Option(_) => ControllerType::Option,
            ControllerKind::Color(_) => ControllerType::Color,
        }
    }
}

/// A controller in the GUI arena
pub struct Controller {
    pub(crate) parent: FolderId,
    pub(crate) binding: Binding,
    pub(crate) name: String,
    pub(crate) disabled: bool,
    pub(crate) hidden: bool,
    /// Value captured at construction, restored by reset
    pub(crate) initial_value: Value,
    pub(crate) on_change: Option<ChangeCallback>,
    pub(crate) on_finish_change: Option<ChangeCallback>,
    /// A change happened since the last finish-change
    pub(crate) changed: bool,
    pub(crate) listening: bool,
    pub(crate) listen_handle: Option<FrameHandle>,
    pub(crate) listen_prev: Option<Value>,
    pub(crate) kind: ControllerKind,
    pub(crate) display: DisplayState,
}

impl Controller {
    pub(crate) fn new(parent: FolderId, binding: Binding, kind: ControllerKind) -> Self {
        let name = binding.property().to_string();
        let initial_value = binding.get();
        Self {
            parent,
            binding,
            display: DisplayState {
                label: name.clone(),
                ..DisplayState::default()
            },
            name,
            disabled: false,
            hidden: false,
            initial_value,
            on_change: None,
            on_finish_change: None,
            changed: false,
            listening: false,
            listen_handle: None,
            listen_prev: None,
            kind,
        }
    }

    pub fn parent(&self) -> FolderId {
        self.parent
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &Record {
        self.binding.object()
    }

    pub fn property(&self) -> &str {
        self.binding.property()
    }

    pub fn controller_type(&self) -> ControllerType {
        self.kind.controller_type()
    }

    pub fn kind(&self) -> &ControllerKind {
        &self.kind
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn initial_value(&self) -> &Value {
        &self.initial_value
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Current bound value
    pub fn get_value(&self) -> Value {
        self.binding.get()
    }

    /// Exported value for saved state: colors as hex, everything else raw
    pub fn save(&self) -> Value {
        let value = self.get_value();
        if let ControllerKind::Color(color) = &self.kind
            && let Some(hex) = color.hex_of(&value)
        {
            return Value::String(hex);
        }
        value
    }

    pub(crate) fn event(&self, id: ControllerId) -> ChangeEvent {
        ChangeEvent {
            controller: id,
            object: self.binding.object().clone(),
            property: self.binding.property().to_string(),
            value: self.get_value(),
        }
    }

    /// Recompute the widget state from the bound value
    pub(crate) fn refresh_display(&mut self) {
        let value = self.binding.get();
        let display = &mut self.display;
        match &self.kind {
            ControllerKind::Boolean => {
                display.checked = value.as_bool().unwrap_or(false);
            }
            ControllerKind::String => {
                if !display.focused {
                    display.text = value.to_display_string();
                }
            }
            ControllerKind::Function => {
                display.text = self.name.clone();
            }
            ControllerKind::Number(number) => number.render(&value, display),
            ControllerKind::Option(option) => option.render(&value, display),
            ControllerKind::Color(color) => color.render(&value, display),
        }
        display.label = self.name.clone();
        display.disabled = self.disabled;
        display.hidden = self.hidden;
        display.revision += 1;
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("name", &self.name)
            .field("property", &self.binding.property())
            .field("kind", &self.kind)
            .field("disabled", &self.disabled)
            .field("listening", &self.listening)
            .finish()
    }
}
