//! Strict Constructor Contract - Declared params and options.
//!
//! Every component class carries a [`Schema`]: an ordered list of positional
//! params and a set of named options. Params are always required. Options are
//! required, defaulted, or optional.
//!
//! # Rules
//!
//! - Fewer positional arguments than params → [`ConstructError::ArgumentCount`]
//! - One extra positional argument is accepted only if it is a JSON object and
//!   no named arguments were given; it then counts as the named arguments.
//!   Anything else → [`ConstructError::UnexpectedArgument`]
//! - Named keys outside the declared options → [`ConstructError::UnknownKeys`]
//! - A param declared with a default or as optional is rejected at declaration
//!   time with a [`DeclarationError`]
//!
//! # Example
//!
//! ```
//! use spark_slots::{Args, Field, Schema};
//!
//! let mut schema = Schema::new();
//! schema.param(Field::new("title")).unwrap();
//! schema.option(Field::new("featured").with_default(false)).unwrap();
//!
//! let attrs = schema.bind(Args::new().arg("Hello")).unwrap();
//! assert_eq!(attrs.str("title"), Some("Hello"));
//! assert!(!attrs.flag("featured"));
//! ```

use indexmap::IndexMap;

use crate::error::{ConstructError, DeclarationError};
use crate::types::{Args, Attributes, Value};

// =============================================================================
// Field
// =============================================================================

/// A declared constructor field (param or option).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    default: Option<Value>,
    optional: bool,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            optional: false,
        }
    }

    /// Value used when the caller omits the field. Cloned per construction.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Allow the caller to omit the field without a default.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// True when the caller must supply the field.
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.optional
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Ordered params plus named options of one component class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    params: Vec<Field>,
    options: IndexMap<String, Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required positional param.
    pub fn param(&mut self, field: impl Into<Field>) -> Result<(), DeclarationError> {
        let field = field.into();
        if field.default.is_some() {
            return Err(DeclarationError::ParamDefault { name: field.name });
        }
        if field.optional {
            return Err(DeclarationError::ParamOptional { name: field.name });
        }
        if self.declares(&field.name) {
            return Err(DeclarationError::DuplicateField { name: field.name });
        }
        self.params.push(field);
        Ok(())
    }

    /// Declare a named option.
    ///
    /// Redeclaring an existing option replaces it, which lets a derived class
    /// change an inherited default.
    pub fn option(&mut self, field: impl Into<Field>) -> Result<(), DeclarationError> {
        let field = field.into();
        if self.params.iter().any(|param| param.name == field.name) {
            return Err(DeclarationError::DuplicateField { name: field.name });
        }
        self.options.insert(field.name.clone(), field);
        Ok(())
    }

    pub fn params(&self) -> &[Field] {
        &self.params
    }

    pub fn options(&self) -> impl Iterator<Item = &Field> {
        self.options.values()
    }

    /// Names of the declared options, in declaration order.
    pub fn option_names(&self) -> Vec<String> {
        self.options.keys().cloned().collect()
    }

    fn declares(&self, name: &str) -> bool {
        self.params.iter().any(|param| param.name == name) || self.options.contains_key(name)
    }

    /// Validate a call against the schema and produce attributes.
    pub fn bind(&self, args: Args) -> Result<Attributes, ConstructError> {
        let (mut positional, mut named) = args.into_parts();

        let expected = self.params.len();
        if positional.len() < expected {
            return Err(ConstructError::ArgumentCount {
                expected,
                given: positional.len(),
            });
        }

        // A trailing mapping stands in for named arguments
        let mut extra = positional.split_off(expected).into_iter();
        if let Some(value) = extra.next() {
            match value {
                Value::Object(map) if named.is_empty() && extra.as_slice().is_empty() => {
                    named = map.into_iter().collect();
                }
                other => {
                    return Err(ConstructError::UnexpectedArgument {
                        value: other.to_string(),
                    });
                }
            }
        }

        let unknown: Vec<String> = named
            .keys()
            .filter(|key| !self.options.contains_key(*key))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(ConstructError::UnknownKeys {
                unknown,
                allowed: self.option_names(),
            });
        }

        let mut attributes = Attributes::default();
        for (param, value) in self.params.iter().zip(positional) {
            attributes.insert(param.name.clone(), value);
        }
        for option in self.options.values() {
            match named.shift_remove(&option.name) {
                Some(value) => attributes.insert(option.name.clone(), value),
                None => match &option.default {
                    Some(default) => attributes.insert(option.name.clone(), default.clone()),
                    None if option.optional => {}
                    None => {
                        return Err(ConstructError::MissingOption {
                            name: option.name.clone(),
                        });
                    }
                },
            }
        }

        Ok(attributes)
    }
}
