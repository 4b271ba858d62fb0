//! Core types for spark-slots.
//!
//! Constructor arguments travel as [`Args`] (positional values plus named
//! values) and come out of validation as [`Attributes`]. Values are plain
//! `serde_json` values so components can carry any data without the engine
//! knowing its shape.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

pub use serde_json::Value;

// =============================================================================
// Args - Call arguments
// =============================================================================

/// Arguments for constructing a component or filling a slot.
///
/// # Example
///
/// ```
/// use spark_slots::Args;
///
/// let args = Args::new().arg("Ford").with("featured", true);
/// assert_eq!(args.positional().len(), 1);
/// assert_eq!(args.named()["featured"], true);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    named: IndexMap<String, Value>,
}

impl Args {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument. A repeated key keeps the last value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    /// Positional arguments in call order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Named arguments in call order.
    pub fn named(&self) -> &IndexMap<String, Value> {
        &self.named
    }

    /// True when neither positional nor named arguments were given.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<Value>, IndexMap<String, Value>) {
        (self.positional, self.named)
    }
}

/// A JSON object becomes a set of named arguments.
impl From<serde_json::Map<String, Value>> for Args {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            positional: Vec::new(),
            named: map.into_iter().collect(),
        }
    }
}

// =============================================================================
// Attributes - Validated constructor values
// =============================================================================

/// Constructor values after schema validation, keyed by field name.
///
/// Params always hold a caller-supplied value. Options hold the supplied
/// value, their default, or nothing when declared optional without default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: IndexMap<String, Value>,
}

impl Attributes {
    pub(crate) fn insert(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    /// Raw value of an attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Attribute as a bool. Missing or non-bool values read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Attribute as a string slice.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// Deserialize an attribute into a typed value.
    pub fn parse<D: DeserializeOwned>(&self, name: &str) -> Option<Result<D, serde_json::Error>> {
        self.values
            .get(name)
            .map(|value| serde_json::from_value(value.clone()))
    }

    /// True when the attribute holds a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Attribute names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
