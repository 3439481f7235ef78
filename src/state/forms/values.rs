//! Flat field-name -> value mapping and change dispatch

use super::field::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current answers, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of a field, if it holds one
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    /// Builder-style `set` for fixtures
    #[cfg(test)]
    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A raw input event from one of the heterogeneous input kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Checkbox { checked: bool },
    Radio { value: String },
    /// `None` when the select was cleared
    Select { value: Option<String> },
    Text(String),
}

impl ChangeEvent {
    /// Extract the value this event carries
    pub fn into_value(self) -> FieldValue {
        match self {
            ChangeEvent::Checkbox { checked } => FieldValue::Bool(checked),
            ChangeEvent::Radio { value } => FieldValue::Text(value),
            ChangeEvent::Select { value: Some(value) } => FieldValue::Text(value),
            ChangeEvent::Select { value: None } => FieldValue::Null,
            ChangeEvent::Text(raw) => FieldValue::Text(raw),
        }
    }
}

/// Return a copy of `values` with exactly `field` updated
pub fn apply_change(values: &FormValues, field: &str, event: ChangeEvent) -> FormValues {
    let mut next = values.clone();
    next.set(field, event.into_value());
    next
}
