//! Error types for the control panel

use thiserror::Error;

/// Errors surfaced by GUI construction, save/load and persistence.
///
/// Malformed user input (unparsable numbers, bad color strings) is never an
/// error: it is dropped at the input boundary and leaves state untouched.
#[derive(Debug, Error)]
pub enum GuiError {
    /// The bound property does not exist on the object
    #[error("cannot bind \"{property}\": property is undefined")]
    UndefinedProperty { property: String },

    /// No controller kind can display the bound value
    #[error("cannot bind \"{property}\": no controller for values of type {type_name}")]
    UnsupportedType {
        property: String,
        type_name: &'static str,
    },

    /// A color controller was bound to a string that is not a color
    #[error("cannot bind \"{property}\": {value:?} is not a color")]
    InvalidColor { property: String, value: String },

    /// Two controllers at the same level share a display name
    #[error("cannot save GUI with duplicate property \"{name}\"")]
    DuplicateName { name: String },

    /// Two folders at the same level share a title
    #[error("cannot save GUI with duplicate folder \"{title}\"")]
    DuplicateFolder { title: String },

    /// The controller id does not refer to a live controller
    #[error("controller has been destroyed")]
    UnknownController,

    /// The folder id does not refer to a live folder
    #[error("folder has been destroyed")]
    UnknownFolder,

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuiError>;
