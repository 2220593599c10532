//! Color controller

use super::display::DisplayState;
use super::handle::ControllerMut;
use super::ControllerKind;
use crate::color::{ColorFormat, normalize_color_string};
use crate::value::Value;

/// Color-specific controller state
#[derive(Debug, Clone)]
pub struct ColorState {
    pub(crate) format: ColorFormat,
    /// Channel scale for array / object formats (1 or 255)
    pub(crate) rgb_scale: f64,
    /// Initial value as `#rrggbb`, restored by reset
    pub(crate) initial_hex: String,
}

impl ColorState {
    pub(crate) fn new(format: ColorFormat, rgb_scale: f64, initial: &Value) -> Option<Self> {
        let initial_hex = format.to_hex_string(initial, rgb_scale)?;
        Some(Self {
            format,
            rgb_scale,
            initial_hex,
        })
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub fn rgb_scale(&self) -> f64 {
        self.rgb_scale
    }

    pub fn initial_hex(&self) -> &str {
        &self.initial_hex
    }

    /// `value` as `#rrggbb`
    pub fn hex_of(&self, value: &Value) -> Option<String> {
        self.format.to_hex_string(value, self.rgb_scale)
    }

    pub(crate) fn render(&self, value: &Value, display: &mut DisplayState) {
        let Some(hex) = self.hex_of(value) else {
            return;
        };
        if !display.focused {
            display.text = hex[1..].to_string();
        }
        display.swatch = Some(hex);
    }
}

impl<'g> ControllerMut<'g> {
    fn color(&self) -> Option<(ColorFormat, f64)> {
        match &self.gui.ctrl(self.id)?.kind {
            ControllerKind::Color(color) => Some((color.format, color.rgb_scale)),
            _ => None,
        }
    }

    /// Write a hex color into the bound value in its original format.
    ///
    /// Nothing is written when the bound value already shows the same color,
    /// so `"rgb(..)"` or `"#rgb"` text survives a load of its own saved hex.
    /// Primitive formats go through the normal set path. Array and object
    /// colors are updated in place, so the change callbacks fire directly.
    /// Returns `false` when the text is not a color.
    pub(super) fn set_color_from_hex(&mut self, hex: &str) -> bool {
        let Some((format, rgb_scale)) = self.color() else {
            return false;
        };
        let Some(current) = self.gui.ctrl(self.id).map(|ctrl| ctrl.get_value()) else {
            return false;
        };
        if let Some(target) = normalize_color_string(hex)
            && format
                .to_hex_string(&current, rgb_scale)
                .is_some_and(|hex| hex.eq_ignore_ascii_case(&target))
        {
            return true;
        }
        let Some(next) = format.from_hex_string(hex, &current, rgb_scale) else {
            tracing::debug!("ignoring unparsable color {:?}", hex);
            return false;
        };
        if format.is_primitive() {
            self.gui.set_value(self.id, next);
        } else {
            self.gui.call_on_change(self.id);
            self.gui.update_display(self.id);
        }
        true
    }

    /// Live input from the color picker (`#rrggbb`)
    pub fn pick_color(mut self, hex: &str) -> Self {
        if !self.accepts_input("pick_color") {
            return self;
        }
        if self.color().is_none() {
            tracing::warn!("pick_color called on a non-color controller - ignored");
            return self;
        }
        self.set_color_from_hex(hex);
        self
    }

    /// The color picker was closed
    pub fn commit_color(self) -> Self {
        if self.color().is_some() {
            self.gui.call_on_finish_change(self.id);
        }
        self
    }

    pub(super) fn color_input_text(&mut self, text: &str) {
        if let Some(ctrl) = self.gui.ctrl_mut(self.id) {
            ctrl.display.text = text.to_string();
        }
        if let Some(hex) = normalize_color_string(text) {
            self.set_color_from_hex(&hex);
        }
    }
}
