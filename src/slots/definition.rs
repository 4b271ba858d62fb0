//! Slot definitions - What a declared slot renders.
//!
//! A [`SlotDefinition`] is created once, when the component class is
//! declared, and lives as long as the class.

use std::fmt;
use std::rc::Rc;

use crate::component::{Component, ComponentClass};
use crate::error::RenderError;
use crate::types::Args;

use super::instance::Content;

// =============================================================================
// Callback Types
// =============================================================================

/// Callback behind a function slot.
///
/// Runs at assignment time with the owning component as receiver, the
/// assignment arguments, the render target, and the content block. The
/// block may be taken, wrapped or left in place. Returning `Some(component)` stores it as the nested
/// component; `None` means the callback produced nothing renderable.
pub type SlotCallback<T> = Rc<
    dyn Fn(&mut Component<T>, Args, &mut T, &mut Option<Content<T>>) -> Result<Option<Component<T>>, RenderError>,
>;

// =============================================================================
// Renderable
// =============================================================================

/// What an assignment to the slot resolves to.
pub enum Renderable<T> {
    /// Construct this class with the assignment arguments.
    Component(Rc<ComponentClass<T>>),
    /// Look the class name up in the declaring class's namespace at
    /// assignment time, then construct it.
    Named(String),
    /// Invoke the callback with the owning component as receiver.
    Function(SlotCallback<T>),
    /// Store the content block only.
    None,
}

impl<T> Renderable<T> {
    /// Wrap a closure as a function renderable.
    pub fn function<F>(callback: F) -> Self
    where
        F: Fn(&mut Component<T>, Args, &mut T, &mut Option<Content<T>>) -> Result<Option<Component<T>>, RenderError>
            + 'static,
    {
        Self::Function(Rc::new(callback))
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Component(_) => "component",
            Self::Named(_) => "class_name",
            Self::Function(_) => "function",
            Self::None => "none",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<T> Clone for Renderable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Component(class) => Self::Component(Rc::clone(class)),
            Self::Named(name) => Self::Named(name.clone()),
            Self::Function(callback) => Self::Function(Rc::clone(callback)),
            Self::None => Self::None,
        }
    }
}

impl<T> fmt::Debug for Renderable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(class) => f.debug_tuple("Component").field(&class.name()).finish(),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::None => f.write_str("None"),
        }
    }
}

// =============================================================================
// From implementations for declaration
// =============================================================================

/// `()` means no renderable: the slot only stores content.
impl<T> From<()> for Renderable<T> {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl<T> From<Rc<ComponentClass<T>>> for Renderable<T> {
    fn from(class: Rc<ComponentClass<T>>) -> Self {
        Self::Component(class)
    }
}

impl<T> From<&Rc<ComponentClass<T>>> for Renderable<T> {
    fn from(class: &Rc<ComponentClass<T>>) -> Self {
        Self::Component(Rc::clone(class))
    }
}

/// A string is a class name resolved lazily.
impl<T> From<&str> for Renderable<T> {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl<T> From<String> for Renderable<T> {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

// =============================================================================
// SlotDefinition
// =============================================================================

/// Static declaration of one slot: name, multiplicity, renderable.
pub struct SlotDefinition<T> {
    name: String,
    collection: bool,
    singular: Option<String>,
    renderable: Renderable<T>,
}

impl<T> SlotDefinition<T> {
    /// Single-valued slot.
    pub fn one(name: impl Into<String>, renderable: impl Into<Renderable<T>>) -> Self {
        Self {
            name: name.into(),
            collection: false,
            singular: None,
            renderable: renderable.into(),
        }
    }

    /// Collection slot with the singular alias used for one-at-a-time assignment.
    pub fn many(
        name: impl Into<String>,
        singular: impl Into<String>,
        renderable: impl Into<Renderable<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            collection: true,
            singular: Some(singular.into()),
            renderable: renderable.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    /// Singular alias of a collection slot.
    pub fn singular(&self) -> Option<&str> {
        self.singular.as_deref()
    }

    pub fn renderable(&self) -> &Renderable<T> {
        &self.renderable
    }
}

impl<T> Clone for SlotDefinition<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            collection: self.collection,
            singular: self.singular.clone(),
            renderable: self.renderable.clone(),
        }
    }
}

impl<T> fmt::Debug for SlotDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotDefinition")
            .field("name", &self.name)
            .field("collection", &self.collection)
            .field("singular", &self.singular)
            .field("renderable", &self.renderable)
            .finish()
    }
}
