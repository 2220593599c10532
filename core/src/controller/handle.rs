//! Mutable controller handle with the chainable builder-style API

use super::display::DisplayState;
use super::option::Options;
use super::{ChangeEvent, Controller, ControllerKind, ControllerType};
use crate::error::Result;
use crate::gui::{ControllerId, FolderId, Gui};
use crate::input::{Key, Modifiers};
use crate::value::Value;

/// A controller borrowed out of its [`Gui`].
///
/// Setters consume and return the handle so calls chain:
///
/// ```
/// # use tweakpanel_core::{Gui, Record, Bounds};
/// let params = Record::new().with("speed", 1.0);
/// let mut gui = Gui::default();
/// gui.add(&params, "speed", Bounds::new(0.0, 10.0))
///     .unwrap()
///     .name("Speed")
///     .step(0.5)
///     .listen(true);
/// ```
///
/// Operations on a destroyed controller are ignored with a warning.
pub struct ControllerMut<'g> {
    pub(crate) gui: &'g mut Gui,
    pub(crate) id: ControllerId,
}

impl std::fmt::Debug for ControllerMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerMut")
            .field("id", &self.id)
            .field("controller", &self.get())
            .finish()
    }
}

impl<'g> ControllerMut<'g> {
    pub(crate) fn new(gui: &'g mut Gui, id: ControllerId) -> Self {
        Self { gui, id }
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// The controller, unless it has been destroyed
    pub fn get(&self) -> Option<&Controller> {
        self.gui.ctrl(self.id)
    }

    /// Release the handle, returning the GUI borrow
    pub fn into_gui(self) -> &'g mut Gui {
        self.gui
    }

    pub fn controller_type(&self) -> Option<ControllerType> {
        self.get().map(Controller::controller_type)
    }

    pub fn get_value(&self) -> Value {
        self.get().map(Controller::get_value).unwrap_or_default()
    }

    pub fn display(&self) -> Option<&DisplayState> {
        self.get().map(Controller::display)
    }

    pub fn parent(&self) -> Option<FolderId> {
        self.get().map(Controller::parent)
    }

    fn with_ctrl(&mut self, op: &str, f: impl FnOnce(&mut Controller)) -> bool {
        match self.gui.ctrl_mut(self.id) {
            Some(ctrl) => {
                f(ctrl);
                true
            }
            None => {
                tracing::warn!("{} called on a destroyed controller - ignored", op);
                false
            }
        }
    }

    /// Live and enabled; otherwise logs and rejects the input
    pub(super) fn accepts_input(&self, op: &str) -> bool {
        match self.gui.ctrl(self.id) {
            Some(ctrl) if ctrl.disabled => {
                tracing::debug!("{} on disabled controller \"{}\" - ignored", op, ctrl.name);
                false
            }
            Some(_) => true,
            None => {
                tracing::warn!("{} called on a destroyed controller - ignored", op);
                false
            }
        }
    }

    /// Write the bound value, notify and refresh. No-op when `value` is
    /// identical to the current value.
    pub fn set_value(self, value: impl Into<Value>) -> Self {
        self.gui.set_value(self.id, value.into());
        self
    }

    /// Set the display label
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.with_ctrl("name", |ctrl| ctrl.name = name) {
            self.gui.update_display(self.id);
        }
        self
    }

    /// Called on every intermediate change
    pub fn on_change(mut self, callback: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.with_ctrl("on_change", |ctrl| ctrl.on_change = Some(Box::new(callback)));
        self
    }

    /// Called once when an interaction commits
    pub fn on_finish_change(mut self, callback: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.with_ctrl("on_finish_change", |ctrl| {
            ctrl.on_finish_change = Some(Box::new(callback))
        });
        self
    }

    pub fn enable(self, enabled: bool) -> Self {
        self.disable(!enabled)
    }

    pub fn disable(mut self, disabled: bool) -> Self {
        let mut toggled = false;
        self.with_ctrl("disable", |ctrl| {
            toggled = ctrl.disabled != disabled;
            ctrl.disabled = disabled;
        });
        if toggled {
            self.gui.update_display(self.id);
        }
        self
    }

    pub fn show(mut self, visible: bool) -> Self {
        let mut toggled = false;
        self.with_ctrl("show", |ctrl| {
            toggled = ctrl.hidden == visible;
            ctrl.hidden = !visible;
        });
        if toggled {
            self.gui.update_display(self.id);
        }
        self
    }

    pub fn hide(self) -> Self {
        self.show(false)
    }

    /// Restore the value captured at construction and commit.
    ///
    /// Array and object colors keep their identity and get the initial
    /// channels written back in place.
    pub fn reset(mut self) -> Self {
        let Some(ctrl) = self.gui.ctrl(self.id) else {
            tracing::warn!("reset called on a destroyed controller - ignored");
            return self;
        };
        match &ctrl.kind {
            ControllerKind::Color(color) if !color.format.is_primitive() => {
                let hex = color.initial_hex.clone();
                self.set_color_from_hex(&hex);
            }
            _ => {
                let initial = ctrl.initial_value.clone();
                self.gui.set_value(self.id, initial);
            }
        }
        self.gui.call_on_finish_change(self.id);
        self
    }

    /// Re-read the bound value into the display state
    pub fn update_display(self) -> Self {
        self.gui.update_display(self.id);
        self
    }

    /// Start or stop polling the bound value every frame
    pub fn listen(self, enable: bool) -> Self {
        self.gui.set_listening(self.id, enable);
        self
    }

    /// Replace this controller with an option controller on the same binding.
    ///
    /// The replacement keeps the display name and the position in its folder.
    /// The old id is dead afterwards.
    pub fn options(self, options: impl Into<Options>) -> Result<ControllerMut<'g>> {
        let id = self.gui.replace_with_options(self.id, options.into())?;
        Ok(ControllerMut::new(self.gui, id))
    }

    /// Exported value for saved state
    pub fn save(&self) -> Value {
        self.get().map(Controller::save).unwrap_or_default()
    }

    /// Restore an exported value and commit
    pub fn load(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        let is_color = match self.gui.ctrl(self.id) {
            Some(ctrl) => matches!(ctrl.kind, ControllerKind::Color(_)),
            None => {
                tracing::warn!("load called on a destroyed controller - ignored");
                return self;
            }
        };
        if is_color {
            match value.as_str() {
                Some(hex) => {
                    self.set_color_from_hex(hex);
                }
                None => tracing::warn!("color load expects a hex string, got {}", value.type_name()),
            }
        } else {
            self.gui.set_value(self.id, value);
        }
        if let Some(ctrl) = self.gui.ctrl_mut(self.id) {
            ctrl.changed = true;
        }
        self.gui.call_on_finish_change(self.id);
        self
    }

    /// Remove the controller from its folder
    pub fn destroy(self) -> bool {
        self.gui.destroy_controller(self.id)
    }

    /// The text field gained focus
    pub fn focus(mut self) -> Self {
        if self.accepts_input("focus") {
            self.with_ctrl("focus", |ctrl| {
                ctrl.display.focused = true;
                ctrl.display.revision += 1;
            });
        }
        self
    }

    /// The text field lost focus: commit and show the formatted value
    pub fn blur(mut self) -> Self {
        self.blur_inner();
        self
    }

    pub(super) fn blur_inner(&mut self) {
        let was_focused = self
            .gui
            .ctrl_mut(self.id)
            .map(|ctrl| std::mem::replace(&mut ctrl.display.focused, false));
        if was_focused == Some(true) {
            self.gui.call_on_finish_change(self.id);
            self.gui.update_display(self.id);
        }
    }

    /// Checkbox changed
    pub fn toggle(self, checked: bool) -> Self {
        if !self.accepts_input("toggle") {
            return self;
        }
        if self.controller_type() != Some(ControllerType::Boolean) {
            tracing::warn!("toggle called on a non-boolean controller - ignored");
            return self;
        }
        self.gui.set_value(self.id, Value::Bool(checked));
        self.gui.call_on_finish_change(self.id);
        self
    }

    /// Raw text from the text field, on every keystroke
    pub fn input_text(mut self, text: &str) -> Self {
        if !self.accepts_input("input_text") {
            return self;
        }
        match self.controller_type() {
            Some(ControllerType::String) => {
                if let Some(ctrl) = self.gui.ctrl_mut(self.id) {
                    ctrl.display.text = text.to_string();
                }
                self.gui.set_value(self.id, Value::String(text.to_string()));
            }
            Some(ControllerType::Number) => self.number_input_text(text),
            Some(ControllerType::Color) => self.color_input_text(text),
            other => tracing::warn!("input_text called on {:?} controller - ignored", other),
        }
        self
    }

    /// Key pressed while the text field is focused
    pub fn key_down(mut self, key: Key, modifiers: Modifiers) -> Self {
        if !self.accepts_input("key_down") {
            return self;
        }
        match self.controller_type() {
            Some(ControllerType::Number) => self.number_key_down(key, modifiers),
            Some(ControllerType::String | ControllerType::Color) if key == Key::Enter => {
                self.blur_inner()
            }
            _ => {}
        }
        self
    }

    /// Button pressed: call the bound function with its object
    pub fn press(self) -> Self {
        if !self.accepts_input("press") {
            return self;
        }
        let Some(ctrl) = self.gui.ctrl(self.id) else {
            return self;
        };
        let Some(function) = ctrl.get_value().as_function().cloned() else {
            tracing::warn!("press called on controller \"{}\" without a function - ignored", ctrl.name);
            return self;
        };
        let object = ctrl.object().clone();
        function.call(&object);
        self.gui.call_on_change(self.id);
        self.gui.call_on_finish_change(self.id);
        self
    }
}
