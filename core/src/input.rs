//! Raw input forwarded by the presentation layer
//!
//! The panel never touches layout or event plumbing itself. Whatever draws
//! the widgets translates its native events into these plain values.

/// Modifier keys held during an input event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
    };
    pub const ALT: Modifiers = Modifiers {
        shift: false,
        alt: true,
    };
}

/// Keys the controllers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Other,
}

/// Pixels treated as one wheel line
pub const PIXELS_PER_LINE: f64 = 100.0;

/// Pixels treated as one wheel page
pub const PIXELS_PER_PAGE: f64 = 800.0;

/// Unit of a wheel event's deltas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WheelDeltaMode {
    Pixel,
    #[default]
    Line,
    Page,
}

impl WheelDeltaMode {
    /// Convert a delta in this mode to lines
    pub fn to_lines(&self, delta: f64) -> f64 {
        match self {
            WheelDeltaMode::Pixel => delta / PIXELS_PER_LINE,
            WheelDeltaMode::Line => delta,
            WheelDeltaMode::Page => delta * PIXELS_PER_PAGE / PIXELS_PER_LINE,
        }
    }
}

/// A wheel or trackpad scroll
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: WheelDeltaMode,
    /// Legacy `wheelDelta` (multiples of 120 per notch), when the platform reports it
    pub wheel_delta: Option<f64>,
}

impl WheelInput {
    /// Deltas in lines
    pub fn new(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            delta_mode: WheelDeltaMode::Line,
            wheel_delta: None,
        }
    }

    /// Deltas in pixels, as trackpads and most mice report them
    pub fn pixels(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_mode: WheelDeltaMode::Pixel,
            ..Self::new(delta_x, delta_y)
        }
    }

    /// Whether the vertical axis dominates
    pub fn is_vertical(&self) -> bool {
        self.delta_x.abs() < self.delta_y.abs()
    }
}

/// A widget's on-screen bounding box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Pointer position in client coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Linearly map `v` from `[a, b]` onto `[c, d]`.
///
/// Shared by every pointer-driven control.
pub fn linear_map(v: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    (v - a) / (b - a) * (d - c) + c
}
