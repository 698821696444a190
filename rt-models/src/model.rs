//! Attribute-backed model with per-shape field dispatch.
//!
//! # Design
//! A `DynamicModel` is an ordered field map plus a pointer to a static
//! `Shape`. The shape is the dispatch table that replaces property magic:
//! it lists computed accessors, the declared writable fields, the init hook
//! that hydrates nested fields once at construction, and the collection
//! fields dropped from the JSON projection when empty.
//!
//! Writes to a field that is neither present nor declared are dropped and
//! reported through the `bool` returned by [`DynamicModel::set`].

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::value::{Attributes, FieldValue};

/// A computed field: reads and optionally writes through the attribute map
/// instead of a stored value of the same name.
#[derive(Clone, Copy)]
pub struct Computed {
    pub name: &'static str,
    pub get: fn(&Attributes) -> FieldValue,
    pub set: Option<fn(&mut Attributes, FieldValue)>,
}

/// Static description of a model type.
#[derive(Clone, Copy)]
pub struct Shape {
    /// Type name, used for identity and debugging.
    pub name: &'static str,
    /// Fields that may be written even when absent from the payload.
    pub writable: &'static [&'static str],
    /// Computed accessors, checked before stored fields.
    pub computed: &'static [Computed],
    /// Hydration hook run once at construction.
    pub init: fn(&mut Attributes),
    /// Collection fields omitted from `to_json` when empty.
    pub omit_when_empty: &'static [&'static str],
}

impl Shape {
    /// A shape with no declared fields, no computed accessors and no
    /// hydration.
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            writable: &[],
            computed: &[],
            init: no_init,
            omit_when_empty: &[],
        }
    }

    pub fn computed(&self, name: &str) -> Option<&Computed> {
        self.computed.iter().find(|c| c.name == name)
    }

    pub fn is_writable(&self, name: &str) -> bool {
        self.writable.contains(&name)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape").field("name", &self.name).finish()
    }
}

fn no_init(_: &mut Attributes) {}

/// Shape of an untyped response object.
pub const GENERIC: &Shape = &Shape::plain("object");

/// Generic structured value hydrated from a decoded JSON mapping.
#[derive(Clone)]
pub struct DynamicModel {
    shape: &'static Shape,
    attributes: Attributes,
}

impl DynamicModel {
    /// Untyped model over a raw mapping.
    pub fn new(raw: Map<String, Value>) -> Self {
        Self::with_shape(GENERIC, raw)
    }

    /// Store `raw` as-is, then run the shape's init hook.
    pub fn with_shape(shape: &'static Shape, raw: Map<String, Value>) -> Self {
        let mut attributes = Attributes::from(raw);
        (shape.init)(&mut attributes);
        Self { shape, attributes }
    }

    /// Like `with_shape`, accepting any decoded value. Non-object values
    /// hydrate as an empty mapping.
    pub fn from_value(shape: &'static Shape, value: Value) -> Self {
        match value {
            Value::Object(map) => Self::with_shape(shape, map),
            Value::Null => Self::with_shape(shape, Map::new()),
            other => {
                debug!(shape = shape.name, "non-object payload hydrated as empty: {other}");
                Self::with_shape(shape, Map::new())
            }
        }
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Read a field: computed accessor first, then the stored value.
    /// Unknown fields read as `None`.
    pub fn get(&self, name: &str) -> Option<Cow<'_, FieldValue>> {
        if let Some(computed) = self.shape.computed(name) {
            return Some(Cow::Owned((computed.get)(&self.attributes)));
        }
        self.attributes.get(name).map(Cow::Borrowed)
    }

    /// Write a field. Returns `false` when the write was dropped because the
    /// field is neither present nor declared writable.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        let value = value.into();
        if let Some(setter) = self.shape.computed(name).and_then(|c| c.set) {
            setter(&mut self.attributes, value);
            return true;
        }

        if self.attributes.contains_key(name) || self.shape.is_writable(name) {
            self.attributes.insert(name, value);
            true
        } else {
            debug!(shape = self.shape.name, field = name, "dropping write to undeclared field");
            false
        }
    }

    /// A field is set when reading it yields a non-null value.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).map_or(false, |v| !v.is_null())
    }

    /// Delete a stored field. No-op when absent.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.attributes.remove(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(FieldValue::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.as_i64())
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.as_bool())
    }

    /// Hydrated nested object stored under `name`.
    pub fn object(&self, name: &str) -> Option<&DynamicModel> {
        self.attributes.get(name).and_then(FieldValue::as_object)
    }

    /// Hydrated models stored in the collection under `name`.
    pub fn objects<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a DynamicModel> + 'a {
        self.attributes
            .get(name)
            .and_then(FieldValue::as_list)
            .unwrap_or(&[])
            .iter()
            .filter_map(FieldValue::as_object)
    }

    /// JSON projection: all stored fields, minus the shape's empty
    /// collections.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in self.attributes.iter() {
            if self.shape.omit_when_empty.contains(&key) && value.is_empty_collection() {
                continue;
            }
            map.insert(key.to_string(), value.to_json());
        }
        Value::Object(map)
    }
}

impl fmt::Debug for DynamicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicModel")
            .field("shape", &self.shape.name)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl PartialEq for DynamicModel {
    fn eq(&self, other: &Self) -> bool {
        self.shape.name == other.shape.name && self.attributes == other.attributes
    }
}

impl Serialize for DynamicModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A concrete response type backed by a `DynamicModel`.
pub trait Model: Sized {
    const SHAPE: &'static Shape;

    fn from_model(model: DynamicModel) -> Self;

    fn as_model(&self) -> &DynamicModel;

    fn as_model_mut(&mut self) -> &mut DynamicModel;

    fn into_model(self) -> DynamicModel;

    /// Hydrate from a decoded response body.
    fn from_value(value: Value) -> Self {
        Self::from_model(DynamicModel::from_value(Self::SHAPE, value))
    }

    fn to_json(&self) -> Value {
        self.as_model().to_json()
    }
}

/// Item factory hydrating a value with `M`'s shape.
pub fn item<M: Model>(value: Value) -> DynamicModel {
    DynamicModel::from_value(M::SHAPE, value)
}

/// Replace a non-empty raw mapping under `key` with a nested model.
pub fn hydrate_object(attrs: &mut Attributes, key: &str, shape: &'static Shape) {
    let hydrate = matches!(
        attrs.get(key),
        Some(FieldValue::Raw(Value::Object(map))) if !map.is_empty()
    );
    if !hydrate {
        return;
    }
    if let Some(FieldValue::Raw(Value::Object(map))) = attrs.take(key) {
        attrs.insert(key, DynamicModel::with_shape(shape, map));
    }
}

/// Replace the raw array under `key` with a list of nested models.
///
/// An absent, null or empty field becomes an empty list. Non-object entries
/// are kept raw; a non-array value is left untouched.
pub fn hydrate_list(attrs: &mut Attributes, key: &str, shape: &'static Shape) {
    hydrate_list_with(attrs, key, |value| DynamicModel::from_value(shape, value));
}

pub(crate) fn hydrate_list_with<F>(attrs: &mut Attributes, key: &str, item: F)
where
    F: Fn(Value) -> DynamicModel,
{
    let items = match attrs.get(key) {
        None | Some(FieldValue::Raw(Value::Null)) => Vec::new(),
        Some(FieldValue::Raw(Value::Array(_))) => match attrs.take(key) {
            Some(FieldValue::Raw(Value::Array(values))) => values
                .into_iter()
                .map(|value| match value {
                    Value::Object(_) => FieldValue::Object(item(value)),
                    other => FieldValue::Raw(other),
                })
                .collect(),
            _ => Vec::new(),
        },
        Some(_) => {
            debug!(field = key, "collection field is not an array, leaving as-is");
            return;
        }
    };
    attrs.insert(key, FieldValue::List(items));
}

/// Encode a boolean flag the way the API stores it: integer 0 or 1.
pub(crate) fn flag(value: &FieldValue) -> FieldValue {
    FieldValue::from(if value.as_bool().unwrap_or(false) { 1 } else { 0 })
}
