//! Value binding: an object plus a property key

use crate::value::{Record, Value};

/// The `(object, property)` pair a controller reads and writes.
///
/// The object is owned by the application; the binding only holds a shared
/// handle to it and never assumes it is the only writer.
#[derive(Debug, Clone)]
pub struct Binding {
    object: Record,
    property: String,
}

impl Binding {
    pub fn new(object: &Record, property: impl Into<String>) -> Self {
        Self {
            object: object.clone(),
            property: property.into(),
        }
    }

    pub fn object(&self) -> &Record {
        &self.object
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// Current value of `object[property]`
    pub fn get(&self) -> Value {
        self.object.get(&self.property)
    }

    /// Write `object[property] = value`
    pub fn set(&self, value: Value) {
        self.object.set(self.property.clone(), value);
    }

    pub fn is_defined(&self) -> bool {
        !self.get().is_undefined()
    }
}
