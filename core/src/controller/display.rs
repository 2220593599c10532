//! Retained widget state for the presentation layer

/// What a controller's widget should currently show.
///
/// The presentation layer reads this each frame (or whenever `revision`
/// moves) and mirrors it into whatever toolkit draws the panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    /// Label next to the widget
    pub label: String,
    /// Text field contents (number, string, color hex without `#`, option label)
    pub text: String,
    /// Checkbox state
    pub checked: bool,
    /// Selected option index; `None` when the value matches no option
    pub selected: Option<usize>,
    /// Whether a slider track is shown
    pub slider: bool,
    /// Slider fill in `0.0..=1.0`
    pub fill: f64,
    /// Swatch background color (`#rrggbb`)
    pub swatch: Option<String>,
    pub disabled: bool,
    pub hidden: bool,
    /// A drag gesture is in progress
    pub dragging: bool,
    /// The text input has keyboard focus
    pub focused: bool,
    /// Bumped on every display refresh
    pub revision: u64,
}
