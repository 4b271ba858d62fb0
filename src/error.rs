//! Errors for declaration, construction and rendering.
//!
//! | Phase | Type | Raised by |
//! |-------|------|-----------|
//! | Declaration | [`DeclarationError`] | [`ComponentClassBuilder::build`](crate::ComponentClassBuilder::build) |
//! | Construction | [`ConstructError`] | [`Schema::bind`](crate::Schema::bind), [`ComponentClass::construct`](crate::ComponentClass::construct) |
//! | Rendering | [`RenderError`] | slot assignment, `render_in`, `draw`, forwarding |
//!
//! Nothing here is recovered locally. Errors propagate to the nearest
//! `render_in` caller and a partially drawn target stays as it is.
//!
//! Every error exposes a stable machine-readable `code()`.

use thiserror::Error;

// =============================================================================
// Declaration
// =============================================================================

/// Error raised while a component class is being declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// A positional param was declared with a default value.
    #[error("default value for param not allowed - {name}")]
    ParamDefault { name: String },

    /// A positional param was declared optional.
    #[error("optional params not supported - {name}")]
    ParamOptional { name: String },

    /// The same field name was declared twice across params and options.
    #[error("field `{name}` declared more than once")]
    DuplicateField { name: String },

    /// A singular alias of a collection slot clashes with another slot or alias.
    #[error("singular alias `{alias}` of slot `{slot}` collides with `{existing}`")]
    AliasCollision {
        alias: String,
        slot: String,
        existing: String,
    },

    /// A class with this name already lives in the namespace.
    #[error("class `{name}` already registered in namespace `{namespace}`")]
    DuplicateClass { name: String, namespace: String },
}

impl DeclarationError {
    /// Machine-readable error code (`DECLARE_` prefix).
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParamDefault { .. } => "DECLARE_PARAM_DEFAULT",
            Self::ParamOptional { .. } => "DECLARE_PARAM_OPTIONAL",
            Self::DuplicateField { .. } => "DECLARE_DUPLICATE_FIELD",
            Self::AliasCollision { .. } => "DECLARE_ALIAS_COLLISION",
            Self::DuplicateClass { .. } => "DECLARE_DUPLICATE_CLASS",
        }
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Error raised when constructor arguments do not match the declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// Fewer positional arguments than declared params.
    #[error("wrong number of arguments (given {given}, expected {expected})")]
    ArgumentCount { expected: usize, given: usize },

    /// An extra positional argument that is not a named-argument mapping.
    #[error("unexpected argument {value}")]
    UnexpectedArgument { value: String },

    /// Named arguments outside the declared option set.
    #[error("key(s) {unknown:?} not found in {allowed:?}")]
    UnknownKeys {
        unknown: Vec<String>,
        allowed: Vec<String>,
    },

    /// A required option was not supplied.
    #[error("option `{name}` is required")]
    MissingOption { name: String },
}

impl ConstructError {
    /// Machine-readable error code (`CONSTRUCT_` prefix).
    pub fn code(&self) -> &'static str {
        match self {
            Self::ArgumentCount { .. } => "CONSTRUCT_ARGUMENT_COUNT",
            Self::UnexpectedArgument { .. } => "CONSTRUCT_UNEXPECTED_ARGUMENT",
            Self::UnknownKeys { .. } => "CONSTRUCT_UNKNOWN_KEYS",
            Self::MissingOption { .. } => "CONSTRUCT_MISSING_OPTION",
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Error raised during slot assignment, rendering or forwarding.
///
/// User code (content blocks, `call` hooks, slot callbacks) reports its own
/// failures through [`RenderError::Failed`] or [`RenderError::other`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// Constructing a nested component failed.
    #[error(transparent)]
    Construct(#[from] ConstructError),

    /// The slot name is not declared on the component class.
    #[error("slot `{slot}` is not declared on {class}")]
    UnknownSlot { class: String, slot: String },

    /// A lazy class name could not be found in the declaring namespace.
    #[error("uninitialized constant {namespace}::{name}")]
    UnresolvedClass { namespace: String, name: String },

    /// A lazy class name was declared on a class that has no namespace.
    #[error("{class} has no namespace to resolve `{name}` in")]
    NoNamespace { class: String, name: String },

    /// Forwarded call on a slot without a matching nested component member.
    #[error("undefined method `{method}` for slot `{slot}`")]
    NoSuchMethod { slot: String, method: String },

    /// The class reached the render step without a `call` hook.
    #[error("{class} does not define `call`")]
    MissingCall { class: String },

    /// A populate block was stored on a slot that has no nested component.
    #[error("slot `{slot}` has no component to yield to")]
    NothingToYield { slot: String },

    /// Failure reported by user code.
    #[error("render failed: {0}")]
    Failed(String),

    /// Failure from an external error type.
    #[error("render failed: {source}")]
    Other {
        #[source]
        source: Box<dyn std::error::Error + 'static>,
    },
}

impl RenderError {
    /// Wrap any error raised by user drawing code.
    pub fn other(err: impl std::error::Error + 'static) -> Self {
        Self::Other {
            source: Box::new(err),
        }
    }

    /// Machine-readable error code.
    ///
    /// Construction failures keep their `CONSTRUCT_` code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Construct(err) => err.code(),
            Self::UnknownSlot { .. } => "SLOT_UNKNOWN",
            Self::UnresolvedClass { .. } => "SLOT_UNRESOLVED_CLASS",
            Self::NoNamespace { .. } => "SLOT_NO_NAMESPACE",
            Self::NoSuchMethod { .. } => "SLOT_NO_SUCH_METHOD",
            Self::MissingCall { .. } => "RENDER_MISSING_CALL",
            Self::NothingToYield { .. } => "SLOT_NOTHING_TO_YIELD",
            Self::Failed(_) => "RENDER_FAILED",
            Self::Other { .. } => "RENDER_OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_error_messages() {
        let err = ConstructError::ArgumentCount {
            expected: 1,
            given: 0,
        };
        assert_eq!(err.to_string(), "wrong number of arguments (given 0, expected 1)");

        let err = ConstructError::UnknownKeys {
            unknown: vec!["colour".into()],
            allowed: vec!["featured".into()],
        };
        assert!(err.to_string().contains("\"colour\""));
        assert!(err.to_string().contains("\"featured\""));
        assert_eq!(err.code(), "CONSTRUCT_UNKNOWN_KEYS");
    }

    #[test]
    fn test_construct_error_keeps_code_when_wrapped() {
        let err: RenderError = ConstructError::MissingOption {
            name: "size".into(),
        }
        .into();
        assert_eq!(err.code(), "CONSTRUCT_MISSING_OPTION");
        assert_eq!(err.to_string(), "option `size` is required");
    }

    #[test]
    fn test_render_error_codes_prefixed() {
        let errors = vec![
            RenderError::UnknownSlot {
                class: "Box".into(),
                slot: "x".into(),
            },
            RenderError::NoSuchMethod {
                slot: "title".into(),
                method: "featured".into(),
            },
            RenderError::NothingToYield { slot: "x".into() },
            RenderError::Failed("boom".into()),
            RenderError::other(std::fmt::Error),
        ];

        for err in errors {
            let code = err.code();
            assert!(code.starts_with("SLOT_") || code.starts_with("RENDER_"), "{code}");
        }
    }

    #[test]
    fn test_declaration_error_message() {
        let err = DeclarationError::ParamDefault {
            name: "title".into(),
        };
        assert_eq!(err.to_string(), "default value for param not allowed - title");
        assert_eq!(err.code(), "DECLARE_PARAM_DEFAULT");
    }
}
