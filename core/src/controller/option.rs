//! Option controller: a value picked from a fixed list

use super::display::DisplayState;
use super::handle::ControllerMut;
use super::ControllerKind;
use crate::value::{List, Record, Value};

/// Choices for an option controller
#[derive(Debug, Clone)]
pub enum Options {
    /// Values shown by their display string
    List(Vec<Value>),
    /// `(label, value)` pairs in display order
    Map(Vec<(String, Value)>),
}

impl Options {
    pub fn list<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Options::List(values.into_iter().map(Into::into).collect())
    }

    pub fn map<K: Into<String>, V: Into<Value>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Options::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<List> for Options {
    fn from(list: List) -> Self {
        Options::List(list.to_vec())
    }
}

impl From<Record> for Options {
    fn from(record: Record) -> Self {
        Options::Map(record.entries())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Options {
    fn from(values: Vec<T>) -> Self {
        Options::list(values)
    }
}

/// Parallel label / value sequences
#[derive(Debug, Clone)]
pub struct OptionState {
    pub(crate) names: Vec<String>,
    pub(crate) values: Vec<Value>,
}

impl OptionState {
    pub fn new(options: Options) -> Self {
        let (names, values) = match options {
            Options::List(values) => (
                values.iter().map(Value::to_display_string).collect(),
                values,
            ),
            Options::Map(pairs) => pairs.into_iter().unzip(),
        };
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Position of the first option identical to `value`
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.values.iter().position(|v| v.identical(value))
    }

    pub(crate) fn render(&self, value: &Value, display: &mut DisplayState) {
        display.selected = self.index_of(value);
        display.text = match display.selected {
            Some(index) => self.names[index].clone(),
            None => value.to_display_string(),
        };
    }
}

impl<'g> ControllerMut<'g> {
    /// Pick the option at `index`, as if chosen from the dropdown
    pub fn select(self, index: usize) -> Self {
        if !self.accepts_input("select") {
            return self;
        }
        let value = match self.gui.ctrl(self.id).map(|ctrl| &ctrl.kind) {
            Some(ControllerKind::Option(option)) => option.values.get(index).cloned(),
            _ => {
                tracing::warn!("select called on a non-option controller - ignored");
                return self;
            }
        };
        let Some(value) = value else {
            tracing::warn!("select: option index {} out of range - ignored", index);
            return self;
        };
        self.gui.set_value(self.id, value);
        self.gui.call_on_finish_change(self.id);
        self
    }
}
