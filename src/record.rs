//! Record value tree
//!
//! A record is an insertion-ordered mapping from field names to values,
//! where a value is either a text leaf (searchable) or a nested record
//! (traversable via dot-paths). Records are rebuilt wholesale on every
//! refresh; nothing in the library retains them across query cycles.

use crate::error::SearchError;
use serde::ser::SerializeMap;
use serde::Serialize;

/// A single field value: a searchable text leaf or a nested mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Nested(Record),
}

impl Value {
    /// Text content if this value is a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Nested(_) => None,
        }
    }
}

/// Insertion-ordered field mapping. Record identity is positional index
/// in the source collection, stable for a single query pass only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Insert a field, replacing any existing field of the same name
    /// while keeping its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Look up a top-level field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolve a dot-path by descending one mapping level per component.
    ///
    /// Fails with `MissingField` if a component is absent, if the path
    /// descends through a text leaf, or if it ends on a nested mapping
    /// rather than a leaf.
    pub fn resolve_path(&self, path: &[String]) -> Result<&str, SearchError> {
        let missing = || SearchError::MissingField {
            path: path.join("."),
        };

        let mut current = self;
        let (last, intermediate) = path.split_last().ok_or_else(missing)?;

        for component in intermediate {
            match current.get(component) {
                Some(Value::Nested(inner)) => current = inner,
                _ => return Err(missing()),
            }
        }

        match current.get(last) {
            Some(Value::Text(text)) => Ok(text),
            _ => Err(missing()),
        }
    }

    /// Build a record from a JSON object.
    ///
    /// Strings stay text leaves, objects nest recursively, numbers and
    /// booleans are coerced to their display text so they remain both
    /// searchable and renderable. Arrays and nulls have no place in the
    /// value tree and are rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SearchError> {
        let object = value.as_object().ok_or_else(|| {
            SearchError::InvalidRecord(format!("expected a JSON object, got {}", value))
        })?;

        let mut record = Record::new();
        for (name, field) in object {
            record.fields.push((name.clone(), Self::value_from_json(name, field)?));
        }
        Ok(record)
    }

    fn value_from_json(name: &str, value: &serde_json::Value) -> Result<Value, SearchError> {
        match value {
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            serde_json::Value::Number(n) => Ok(Value::Text(n.to_string())),
            serde_json::Value::Bool(b) => Ok(Value::Text(b.to_string())),
            serde_json::Value::Object(_) => Ok(Value::Nested(Self::from_json(value)?)),
            serde_json::Value::Array(_) => Err(SearchError::InvalidRecord(format!(
                "field '{}' is an array",
                name
            ))),
            serde_json::Value::Null => Err(SearchError::InvalidRecord(format!(
                "field '{}' is null",
                name
            ))),
        }
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
