//! Caller-supplied field values

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::FormError;

/// A single value to assign to a form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(serde_json::Number),
    /// JSON `null`, written as an empty value
    Null,
}

impl FieldValue {
    /// Text written into the document
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Flag(flag) => flag.to_string(),
            FieldValue::Number(number) => number.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

/// Field name to value mapping. Keys are matched against field names with
/// exact, case-sensitive equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValueMapping {
    entries: BTreeMap<String, FieldValue>,
}

impl FieldValueMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, FormError> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(FormError::MappingNotObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, FormError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get_key_value(&self, name: &str) -> Option<(&String, &FieldValue)> {
        self.entries.get_key_value(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldValueMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = FieldValueMapping::new();
        for (name, value) in iter {
            mapping.insert(name, value);
        }
        mapping
    }
}
