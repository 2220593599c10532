//! Pointer gesture state machines
//!
//! A gesture lives from pointer-down to pointer-up and is not part of the
//! persistent controller state. These types only decide *what* a movement
//! means; the number controller turns the outcome into value changes.

use crate::input::Point;

/// Default movement (px) before a press on the number field turns into a drag
pub const DRAG_THRESHOLD: f64 = 5.0;

/// Slider drag: `Idle -> Dragging -> Idle`, with a scroll test for touch
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SliderGesture {
    #[default]
    Idle,
    /// Touch began in a scrollable panel; the first move decides drag vs. scroll
    TestingScroll { origin: Point },
    Dragging,
}

/// What a touch movement on the slider resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchOutcome {
    /// Move the value to this pointer x
    Drag(f64),
    /// The gesture was handed back to native scrolling
    Released,
    /// Nothing to do
    Ignored,
}

impl SliderGesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, SliderGesture::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, SliderGesture::Dragging)
    }

    pub fn mouse_down(&mut self) {
        *self = SliderGesture::Dragging;
    }

    /// Start a touch. Returns `true` when dragging begins immediately.
    pub fn touch_start(&mut self, touches: usize, at: Point, scrollable: bool) -> bool {
        if touches > 1 {
            return false;
        }
        if scrollable {
            *self = SliderGesture::TestingScroll { origin: at };
            false
        } else {
            *self = SliderGesture::Dragging;
            true
        }
    }

    pub fn touch_move(&mut self, at: Point) -> TouchOutcome {
        match *self {
            SliderGesture::Idle => TouchOutcome::Ignored,
            SliderGesture::TestingScroll { origin } => {
                let dx = at.x - origin.x;
                let dy = at.y - origin.y;
                if dx.abs() > dy.abs() {
                    *self = SliderGesture::Dragging;
                    TouchOutcome::Drag(at.x)
                } else {
                    *self = SliderGesture::Idle;
                    TouchOutcome::Released
                }
            }
            SliderGesture::Dragging => TouchOutcome::Drag(at.x),
        }
    }

    /// End the gesture. Returns `true` if a drag was in progress.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        *self = SliderGesture::Idle;
        was_dragging
    }
}

/// Vertical drag on the numeric text field
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum VerticalDrag {
    #[default]
    Idle,
    /// Pressed; deciding between a drag and a text selection
    Testing {
        origin: Point,
        prev_y: f64,
        initial: f64,
    },
    Dragging {
        prev_y: f64,
        initial: f64,
        delta: f64,
    },
}

/// What a pointer movement on the text field resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Still inside the threshold
    Pending,
    /// Horizontal movement won: the user is selecting text
    Aborted,
    /// Set the value; `started` is true on the move that committed to dragging
    Value { value: f64, started: bool },
}

impl VerticalDrag {
    pub fn is_dragging(&self) -> bool {
        matches!(self, VerticalDrag::Dragging { .. })
    }

    pub fn press(&mut self, at: Point, initial: f64) {
        *self = VerticalDrag::Testing {
            origin: at,
            prev_y: at.y,
            initial,
        };
    }

    /// Advance the drag.
    ///
    /// `per_pixel` is the value change for one pixel of upward movement. The
    /// accumulated delta is bounded so `initial + delta` stays inside
    /// `[min, max]` where those are set.
    pub fn moved(
        &mut self,
        at: Point,
        threshold: f64,
        per_pixel: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> DragOutcome {
        let mut started = false;
        match *self {
            VerticalDrag::Idle => return DragOutcome::Pending,
            VerticalDrag::Testing {
                origin,
                prev_y,
                initial,
            } => {
                let dx = at.x - origin.x;
                let dy = at.y - origin.y;
                if dy.abs() > threshold {
                    *self = VerticalDrag::Dragging {
                        prev_y,
                        initial,
                        delta: 0.0,
                    };
                    started = true;
                } else if dx.abs() > threshold {
                    *self = VerticalDrag::Idle;
                    return DragOutcome::Aborted;
                } else {
                    *self = VerticalDrag::Testing {
                        origin,
                        prev_y: at.y,
                        initial,
                    };
                    return DragOutcome::Pending;
                }
            }
            VerticalDrag::Dragging { .. } => {}
        }

        let VerticalDrag::Dragging {
            prev_y,
            initial,
            mut delta,
        } = *self
        else {
            return DragOutcome::Pending;
        };

        delta -= (at.y - prev_y) * per_pixel;
        if let Some(max) = max
            && initial + delta > max
        {
            delta = max - initial;
        } else if let Some(min) = min
            && initial + delta < min
        {
            delta = min - initial;
        }

        *self = VerticalDrag::Dragging {
            prev_y: at.y,
            initial,
            delta,
        };
        DragOutcome::Value {
            value: initial + delta,
            started,
        }
    }

    /// End the press. Returns `true` if anything was in progress.
    pub fn release(&mut self) -> bool {
        let active = !matches!(self, VerticalDrag::Idle);
        *self = VerticalDrag::Idle;
        active
    }
}
