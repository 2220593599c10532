//! Number controller: bounds, step inference, snapping and gestures

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

use super::display::DisplayState;
use super::handle::ControllerMut;
use super::ControllerKind;
use crate::gesture::{DragOutcome, SliderGesture, TouchOutcome, VerticalDrag};
use crate::input::{Key, Modifiers, Point, Rect, WheelInput, linear_map};
use crate::value::{Value, format_number};

/// Step used when neither an explicit step nor a full range is known
pub const DEFAULT_STEP: f64 = 0.1;

/// Implicit steps divide the range into this many increments
const IMPLICIT_STEP_DIVISIONS: f64 = 100.0;

/// Significant digits kept after snapping, to scrub float drift
const SNAP_PRECISION: usize = 15;

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?))")
        .expect("valid regex")
});

/// Optional min / max / step passed when adding a number controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: None,
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn step(self, step: f64) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }
}

/// Round to `digits` significant digits
pub fn to_precision(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    format!("{:.*e}", digits.saturating_sub(1), value)
        .parse()
        .unwrap_or(value)
}

/// Snap `value` to the nearest multiple of `step`.
///
/// Non-positive or non-finite steps leave the value alone.
pub fn snap_to_step(value: f64, step: f64) -> f64 {
    if !(step.is_finite() && step > 0.0) || !value.is_finite() {
        return value;
    }
    to_precision((value / step).round() * step, SNAP_PRECISION)
}

/// Parse the leading number of a text field, the way browsers read `<input>` text
pub(crate) fn parse_leading_float(text: &str) -> Option<f64> {
    let caps = LEADING_FLOAT.captures(text)?;
    caps[1].parse().ok()
}

/// Number-specific controller state
#[derive(Debug, Clone)]
pub struct NumberState {
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) step: f64,
    pub(crate) step_explicit: bool,
    pub(crate) has_slider: bool,
    pub(crate) decimals: Option<usize>,
    pub(crate) slider: SliderGesture,
    pub(crate) text_drag: VerticalDrag,
    /// Pending finish-change after slider wheel input
    pub(crate) wheel_commit_at: Option<Instant>,
    /// Fractional wheel lines not yet applied
    pub(crate) wheel_carry: f64,
}

impl NumberState {
    pub fn new(bounds: Bounds) -> Self {
        let mut state = Self {
            min: None,
            max: None,
            step: DEFAULT_STEP,
            step_explicit: false,
            has_slider: false,
            decimals: None,
            slider: SliderGesture::Idle,
            text_drag: VerticalDrag::Idle,
            wheel_commit_at: None,
            wheel_carry: 0.0,
        };
        state.set_min(bounds.min);
        state.set_max(bounds.max);
        match bounds.step {
            Some(step) => state.set_step(step, true),
            None => state.set_step(state.implicit_step(), false),
        }
        state
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn step_explicit(&self) -> bool {
        self.step_explicit
    }

    pub fn has_slider(&self) -> bool {
        self.has_slider
    }

    pub fn decimals(&self) -> Option<usize> {
        self.decimals
    }

    pub fn set_min(&mut self, min: Option<f64>) {
        self.min = min;
        self.on_update_min_max();
    }

    pub fn set_max(&mut self, max: Option<f64>) {
        self.max = max;
        self.on_update_min_max();
    }

    /// Set the step. An explicit step permanently disables implicit recompute.
    pub fn set_step(&mut self, step: f64, explicit: bool) {
        if self.step_explicit && !explicit {
            return;
        }
        self.step = step;
        self.step_explicit = explicit;
    }

    pub fn set_decimals(&mut self, decimals: Option<usize>) {
        self.decimals = decimals;
    }

    /// Step derived from the range, or [`DEFAULT_STEP`] without one
    pub fn implicit_step(&self) -> f64 {
        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                let step = (max - min) / IMPLICIT_STEP_DIVISIONS;
                if step.is_finite() && step > 0.0 {
                    step
                } else {
                    DEFAULT_STEP
                }
            }
            _ => DEFAULT_STEP,
        }
    }

    fn on_update_min_max(&mut self) {
        if self.min.is_none() || self.max.is_none() {
            return;
        }
        if !self.step_explicit {
            self.step = self.implicit_step();
        }
        // One-way: the slider stays even if the range is cleared later
        self.has_slider = true;
    }

    /// Bound to `[min, max]`; an unset side is unbounded
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        let upper = self.max.unwrap_or(f64::INFINITY);
        let lower = self.min.unwrap_or(f64::NEG_INFINITY);
        value.min(upper).max(lower)
    }

    pub fn snap(&self, value: f64) -> f64 {
        snap_to_step(value, self.step)
    }

    /// Increment multiplier for arrow keys and vertical drags.
    ///
    /// Implicit steps are a hundredth of the range, so their base multiplier
    /// is 10 (shift: 100, alt: 1). Explicit steps start at 1 (shift: 10,
    /// alt: 0.1).
    pub fn arrow_key_multiplier(&self, modifiers: Modifiers) -> f64 {
        let mut multiplier = if self.step_explicit { 1.0 } else { 10.0 };
        if modifiers.shift {
            multiplier *= 10.0;
        } else if modifiers.alt {
            multiplier /= 10.0;
        }
        multiplier
    }

    /// Reduce a wheel event to a signed count of lines along its dominant axis.
    ///
    /// Pixel and page deltas are converted to lines. Notched wheels on some
    /// platforms report fractional pixel deltas but an exact `wheel_delta`;
    /// those are converted to lines so a notch behaves like an arrow key.
    pub fn normalize_wheel(&self, wheel: WheelInput) -> f64 {
        let mut dx = wheel.delta_mode.to_lines(wheel.delta_x);
        let mut dy = wheel.delta_mode.to_lines(wheel.delta_y);
        if wheel.delta_y.floor() != wheel.delta_y
            && let Some(wheel_delta) = wheel.wheel_delta
            && wheel_delta != 0.0
        {
            dx = 0.0;
            dy = -wheel_delta / 120.0;
            if !self.step_explicit {
                dy *= 10.0;
            }
        }
        if dx.abs() > dy.abs() { dx } else { -dy }
    }

    /// Whole lines to apply for `wheel`, carrying the fraction to the next event.
    ///
    /// Trackpads report many small pixel deltas that only add up to a line
    /// over several events.
    pub(crate) fn take_wheel_lines(&mut self, wheel: WheelInput) -> f64 {
        let total = self.wheel_carry + self.normalize_wheel(wheel);
        let whole = total.trunc();
        self.wheel_carry = total - whole;
        whole
    }

    /// Map a pointer x inside the slider box onto `[min, max]`.
    ///
    /// Returns `None` without a full range or for a degenerate box.
    pub fn value_at(&self, client_x: f64, rect: Rect) -> Option<f64> {
        let (min, max) = (self.min?, self.max?);
        if rect.width() <= 0.0 {
            return None;
        }
        Some(linear_map(client_x, rect.left, rect.right, min, max))
    }

    /// Slider fill fraction for `value`
    pub fn fill(&self, value: f64) -> Option<f64> {
        if !self.has_slider {
            return None;
        }
        let (min, max) = (self.min?, self.max?);
        let fraction = (value - min) / (max - min);
        if fraction.is_nan() {
            return Some(0.0);
        }
        Some(fraction.clamp(0.0, 1.0))
    }

    /// Text for `value`, rounded to `decimals` when set.
    ///
    /// Display only: the stored value is never rounded.
    pub fn format(&self, value: f64) -> String {
        match self.decimals {
            Some(decimals) if value.is_finite() => format!("{:.*}", decimals, value),
            _ => format_number(value),
        }
    }

    pub(crate) fn render(&self, value: &Value, display: &mut DisplayState) {
        display.slider = self.has_slider;
        display.dragging = self.slider.is_dragging() || self.text_drag.is_dragging();
        match value.as_f64() {
            Some(v) => {
                if let Some(fill) = self.fill(v) {
                    display.fill = fill;
                }
                // Typing must not be fought by reformatting
                if !display.focused {
                    display.text = self.format(v);
                }
            }
            None if !display.focused => display.text = value.to_display_string(),
            None => {}
        }
    }
}

impl<'g> ControllerMut<'g> {
    fn number(&self) -> Option<&NumberState> {
        match &self.gui.ctrl(self.id)?.kind {
            ControllerKind::Number(number) => Some(number),
            _ => None,
        }
    }

    fn number_mut(&mut self, op: &str) -> Option<&mut NumberState> {
        let Some(ctrl) = self.gui.ctrl_mut(self.id) else {
            tracing::warn!("{} called on a destroyed controller - ignored", op);
            return None;
        };
        match &mut ctrl.kind {
            ControllerKind::Number(number) => Some(number),
            other => {
                tracing::warn!(
                    "{} called on {:?} controller \"{}\" - ignored",
                    op,
                    other.controller_type(),
                    ctrl.name
                );
                None
            }
        }
    }

    /// Number state, if this is a number controller
    pub fn number_state(&self) -> Option<&NumberState> {
        self.number()
    }

    /// Set or clear the lower bound
    pub fn min(mut self, min: impl Into<Option<f64>>) -> Self {
        if let Some(number) = self.number_mut("min") {
            number.set_min(min.into());
            self.gui.update_display(self.id);
        }
        self
    }

    /// Set or clear the upper bound
    pub fn max(mut self, max: impl Into<Option<f64>>) -> Self {
        if let Some(number) = self.number_mut("max") {
            number.set_max(max.into());
            self.gui.update_display(self.id);
        }
        self
    }

    /// Set an explicit step
    pub fn step(mut self, step: f64) -> Self {
        if let Some(number) = self.number_mut("step") {
            number.set_step(step, true);
        }
        self
    }

    /// Round displayed text to `decimals` places, or show raw values with `None`
    pub fn decimals(mut self, decimals: impl Into<Option<usize>>) -> Self {
        if let Some(number) = self.number_mut("decimals") {
            number.set_decimals(decimals.into());
            self.gui.update_display(self.id);
        }
        self
    }

    pub(super) fn snap_clamp_set(&mut self, value: f64) {
        let Some(number) = self.number() else {
            return;
        };
        let value = number.clamp(number.snap(value));
        self.gui.set_value(self.id, Value::Number(value));
    }

    fn current_number(&self) -> Option<f64> {
        self.gui.ctrl(self.id)?.get_value().as_f64()
    }

    /// Step the value by `delta`, showing the raw result even while focused
    fn increment(&mut self, delta: f64) {
        let Some(current) = self.current_number() else {
            return;
        };
        self.snap_clamp_set(current + delta);
        if let Some(ctrl) = self.gui.ctrl_mut(self.id)
            && let Some(v) = ctrl.get_value().as_f64()
        {
            ctrl.display.text = format_number(v);
        }
    }

    pub(super) fn number_input_text(&mut self, text: &str) {
        if let Some(ctrl) = self.gui.ctrl_mut(self.id) {
            ctrl.display.text = text.to_string();
        }
        let Some(parsed) = parse_leading_float(text) else {
            tracing::debug!("ignoring non-numeric input {:?}", text);
            return;
        };
        let Some(number) = self.number() else {
            return;
        };
        let value = if number.step_explicit {
            number.snap(parsed)
        } else {
            parsed
        };
        let value = number.clamp(value);
        self.gui.set_value(self.id, Value::Number(value));
    }

    pub(super) fn number_key_down(&mut self, key: Key, modifiers: Modifiers) {
        let Some(number) = self.number() else {
            return;
        };
        let step = number.step * number.arrow_key_multiplier(modifiers);
        match key {
            Key::ArrowUp => self.increment(step),
            Key::ArrowDown => self.increment(-step),
            Key::Enter => self.blur_inner(),
            Key::Escape | Key::Other => {}
        }
    }

    /// Wheel over the number field; only acts while the field is focused.
    ///
    /// Returns `true` when the event was consumed.
    pub fn wheel(mut self, wheel: WheelInput) -> bool {
        if !self.accepts_input("wheel") {
            return false;
        }
        let focused = self
            .gui
            .ctrl(self.id)
            .is_some_and(|ctrl| ctrl.display.focused);
        if !focused {
            return false;
        }
        let Some(number) = self.number_mut("wheel") else {
            return false;
        };
        let delta = number.step * number.take_wheel_lines(wheel);
        if delta != 0.0 {
            self.increment(delta);
        }
        true
    }

    fn set_from_x(&mut self, client_x: f64, rect: Rect) {
        if let Some(value) = self.number().and_then(|n| n.value_at(client_x, rect)) {
            self.snap_clamp_set(value);
        }
    }

    fn refresh(&mut self) {
        self.gui.update_display(self.id);
    }

    /// Mouse down on the slider track
    pub fn slider_pointer_down(mut self, client_x: f64, rect: Rect) -> Self {
        if !self.accepts_input("slider_pointer_down") {
            return self;
        }
        match self.number_mut("slider_pointer_down") {
            Some(number) if number.has_slider => number.slider.mouse_down(),
            _ => return self,
        }
        self.set_from_x(client_x, rect);
        self.refresh();
        self
    }

    /// Pointer move while a slider drag is in progress
    pub fn slider_pointer_move(mut self, client_x: f64, rect: Rect) -> Self {
        if self.number().is_some_and(|n| n.slider.is_dragging()) {
            self.set_from_x(client_x, rect);
        }
        self
    }

    /// Pointer released after a slider drag
    pub fn slider_pointer_up(mut self) -> Self {
        let released = self
            .number_mut("slider_pointer_up")
            .is_some_and(|n| n.slider.release());
        if released {
            self.gui.call_on_finish_change(self.id);
            self.refresh();
        }
        self
    }

    /// Touch start on the slider track
    pub fn slider_touch_start(mut self, touches: usize, at: Point, rect: Rect) -> Self {
        if !self.accepts_input("slider_touch_start") {
            return self;
        }
        let scrollable = self.gui.config.scrollable;
        let began = match self.number_mut("slider_touch_start") {
            Some(number) if number.has_slider => number.slider.touch_start(touches, at, scrollable),
            _ => return self,
        };
        if began {
            self.set_from_x(at.x, rect);
            self.refresh();
        }
        self
    }

    /// Touch move on the slider track.
    ///
    /// Returns `false` once the gesture has been released to native scrolling.
    pub fn slider_touch_move(mut self, at: Point, rect: Rect) -> bool {
        let Some(number) = self.number_mut("slider_touch_move") else {
            return false;
        };
        let was_dragging = number.slider.is_dragging();
        match number.slider.touch_move(at) {
            TouchOutcome::Drag(x) => {
                self.set_from_x(x, rect);
                if !was_dragging {
                    self.refresh();
                }
                true
            }
            TouchOutcome::Released => false,
            TouchOutcome::Ignored => false,
        }
    }

    /// Touch end on the slider track
    pub fn slider_touch_end(self) -> Self {
        self.slider_pointer_up()
    }

    /// Wheel over the slider.
    ///
    /// Vertical scrolling is left to the page when the panel scrolls. The
    /// finish-change is debounced and delivered by [`crate::Gui::frame`].
    /// Returns `true` when the event was consumed.
    pub fn slider_wheel(mut self, wheel: WheelInput, now: Instant) -> bool {
        if !self.accepts_input("slider_wheel") {
            return false;
        }
        if wheel.is_vertical() && self.gui.config.scrollable {
            return false;
        }
        let debounce = Duration::from_millis(self.gui.config.wheel_debounce_ms);
        let Some(number) = self.number_mut("slider_wheel") else {
            return false;
        };
        if !number.has_slider {
            return false;
        }
        let delta = number.take_wheel_lines(wheel) * number.step;
        if delta != 0.0
            && let Some(current) = self.current_number()
        {
            self.snap_clamp_set(current + delta);
        }
        if let Some(number) = self.number_mut("slider_wheel") {
            number.wheel_commit_at = Some(now + debounce);
        }
        true
    }

    /// Press on the number text field (possible start of a vertical drag)
    pub fn text_pointer_down(mut self, at: Point) -> Self {
        if !self.accepts_input("text_pointer_down") {
            return self;
        }
        let Some(current) = self.current_number() else {
            return self;
        };
        if let Some(number) = self.number_mut("text_pointer_down") {
            number.text_drag.press(at, current);
        }
        self
    }

    /// Pointer move after a press on the number text field
    pub fn text_pointer_move(mut self, at: Point, modifiers: Modifiers) -> Self {
        let threshold = self.gui.config.drag_threshold;
        let Some(number) = self.number_mut("text_pointer_move") else {
            return self;
        };
        let per_pixel = number.step * number.arrow_key_multiplier(modifiers);
        let (min, max) = (number.min, number.max);
        match number.text_drag.moved(at, threshold, per_pixel, min, max) {
            DragOutcome::Pending | DragOutcome::Aborted => {}
            DragOutcome::Value { value, started } => {
                if started && let Some(ctrl) = self.gui.ctrl_mut(self.id) {
                    ctrl.display.focused = false;
                }
                self.snap_clamp_set(value);
                if started {
                    self.refresh();
                }
            }
        }
        self
    }

    /// Release after a press on the number text field
    pub fn text_pointer_up(mut self) -> Self {
        let released = self
            .number_mut("text_pointer_up")
            .is_some_and(|n| n.text_drag.release());
        if released {
            self.gui.call_on_finish_change(self.id);
            self.refresh();
        }
        self
    }
}
