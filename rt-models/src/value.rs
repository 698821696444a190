//! Field values and the ordered attribute map backing every model.

use serde_json::{Map, Value};

use crate::model::DynamicModel;

/// A single stored field.
///
/// Payload fields start out as `Raw`; a shape's init hook replaces declared
/// nested mappings with `Object` and declared collections with `List`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Raw(Value),
    Object(DynamicModel),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Raw(Value::Null))
    }

    /// True for a hydrated or raw sequence with no entries.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Raw(Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            FieldValue::Raw(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DynamicModel> {
        match self {
            FieldValue::Object(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_raw().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_raw().and_then(Value::as_i64)
    }

    /// Loose boolean reading: numbers and strings count the way the API
    /// encodes flags (`0`/`1`, `"0"`/`"1"`).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Raw(Value::Null) => None,
            FieldValue::Raw(value) => Some(truthy(value)),
            FieldValue::Object(_) => Some(true),
            FieldValue::List(items) => Some(!items.is_empty()),
        }
    }

    /// JSON projection of this value; nested models use their own shape's
    /// projection rules.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Raw(value) => value.clone(),
            FieldValue::Object(model) => model.to_json(),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
        }
    }
}

/// Truthiness of a raw JSON value as the API uses it for flags.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Raw(value)
    }
}

impl From<DynamicModel> for FieldValue {
    fn from(model: DynamicModel) -> Self {
        FieldValue::Object(model)
    }
}

impl From<Vec<DynamicModel>> for FieldValue {
    fn from(models: Vec<DynamicModel>) -> Self {
        FieldValue::List(models.into_iter().map(FieldValue::Object).collect())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Raw(Value::Bool(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Raw(Value::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Raw(Value::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Raw(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Raw(Value::String(value))
    }
}

/// Insertion-ordered field map.
///
/// Payloads have a few dozen keys at most, so entries live in a vector and
/// lookups are linear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, FieldValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.position(key).map(move |i| &mut self.entries[i].1)
    }

    /// Insert or overwrite. Overwriting keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        let key = key.into();
        let value = value.into();
        match self.position(key.as_str()) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Take a value out for rewriting, leaving `Null` in its slot.
    pub fn take(&mut self, key: &str) -> Option<FieldValue> {
        self.get_mut(key)
            .map(|slot| std::mem::replace(slot, FieldValue::Raw(Value::Null)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(k, v)| (k, FieldValue::Raw(v)))
                .collect(),
        }
    }
}
