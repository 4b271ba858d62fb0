//! Slot Instance - Deferred rendering wrapper for one occupied slot.
//!
//! Created during the populate phase of a render. Holds a nested component,
//! a content block, both, or neither:
//!
//! | nested | content | `draw` |
//! |--------|---------|--------|
//! | yes | any | render the nested component, yielding it the content |
//! | no | `Draw` | run the block against the target |
//! | no | `Populate` | [`RenderError::NothingToYield`] |
//! | no | none | no-op |
//!
//! Drawing may happen any number of times: every draw runs the content
//! block again, or renders the nested component again.
//!
//! Instead of forwarding arbitrary calls, the nested component is reachable
//! through [`SlotInstance::nested`], [`SlotInstance::attr`] and
//! [`SlotInstance::get_slot`]. Forwarding without a nested component fails
//! with [`RenderError::NoSuchMethod`].

use std::fmt;
use std::rc::Rc;
use std::slice;

use tracing::trace;

use crate::component::Component;
use crate::error::RenderError;
use crate::types::Value;

// =============================================================================
// Content Blocks
// =============================================================================

/// Block that draws literal content into the target.
pub type DrawFn<T> = Rc<dyn Fn(&mut T) -> Result<(), RenderError>>;

/// Block yielded to a nested component during its populate phase.
pub type PopulateFn<T> = Rc<dyn Fn(&mut Component<T>, &mut T) -> Result<(), RenderError>>;

/// Content block captured by a slot assignment.
pub enum Content<T> {
    /// Literal drawing side effects.
    Draw(DrawFn<T>),
    /// Populates the nested component the slot renders.
    Populate(PopulateFn<T>),
}

impl<T> Content<T> {
    pub fn draw<F>(block: F) -> Self
    where
        F: Fn(&mut T) -> Result<(), RenderError> + 'static,
    {
        Self::Draw(Rc::new(block))
    }

    pub fn populate<F>(block: F) -> Self
    where
        F: Fn(&mut Component<T>, &mut T) -> Result<(), RenderError> + 'static,
    {
        Self::Populate(Rc::new(block))
    }
}

/// Shares the block.
impl<T> Clone for Content<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Draw(block) => Self::Draw(Rc::clone(block)),
            Self::Populate(block) => Self::Populate(Rc::clone(block)),
        }
    }
}

impl<T> fmt::Debug for Content<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw(_) => f.write_str("Content::Draw(..)"),
            Self::Populate(_) => f.write_str("Content::Populate(..)"),
        }
    }
}

// =============================================================================
// Drawable
// =============================================================================

/// Anything that can be drawn into a target.
pub trait Drawable<T> {
    fn draw(&mut self, target: &mut T) -> Result<(), RenderError>;
}

// =============================================================================
// SlotInstance
// =============================================================================

/// The runtime occupant of a slot for one render.
pub struct SlotInstance<T> {
    slot: String,
    /// Class name of the owning component. Diagnostics only.
    owner: String,
    nested: Option<Component<T>>,
    content: Option<Content<T>>,
}

impl<T: 'static> SlotInstance<T> {
    pub(crate) fn new(
        slot: impl Into<String>,
        owner: impl Into<String>,
        nested: Option<Component<T>>,
        content: Option<Content<T>>,
    ) -> Self {
        Self {
            slot: slot.into(),
            owner: owner.into(),
            nested,
            content,
        }
    }

    /// Name of the slot this instance occupies.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn nested(&self) -> Option<&Component<T>> {
        self.nested.as_ref()
    }

    pub fn nested_mut(&mut self) -> Option<&mut Component<T>> {
        self.nested.as_mut()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nested.is_none() && self.content.is_none()
    }

    /// Attribute of the nested component.
    pub fn attr(&self, name: &str) -> Result<&Value, RenderError> {
        self.forward(name)?
            .attr(name)
            .ok_or_else(|| self.no_such_method(name))
    }

    /// Slot of the nested component.
    pub fn get_slot(&self, name: &str) -> Result<SlotValue<'_, T>, RenderError> {
        Ok(self.forward("get_slot")?.get_slot(name))
    }

    fn forward(&self, method: &str) -> Result<&Component<T>, RenderError> {
        self.nested
            .as_ref()
            .ok_or_else(|| self.no_such_method(method))
    }

    fn no_such_method(&self, method: &str) -> RenderError {
        RenderError::NoSuchMethod {
            slot: self.slot.clone(),
            method: method.to_string(),
        }
    }
}

impl<T: 'static> Drawable<T> for SlotInstance<T> {
    fn draw(&mut self, target: &mut T) -> Result<(), RenderError> {
        if self.is_empty() {
            return Ok(());
        }

        trace!(owner = %self.owner, slot = %self.slot, "drawing slot");
        match (self.nested.as_mut(), &self.content) {
            (Some(component), content) => component.render_content(target, content.clone()),
            (None, Some(Content::Draw(block))) => block(target),
            (None, Some(Content::Populate(_))) => Err(RenderError::NothingToYield {
                slot: self.slot.clone(),
            }),
            (None, None) => Ok(()),
        }
    }
}

impl<T> fmt::Debug for SlotInstance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotInstance")
            .field("slot", &self.slot)
            .field("owner", &self.owner)
            .field("nested", &self.nested.as_ref().map(Component::class_name))
            .field("content", &self.content)
            .finish()
    }
}

// =============================================================================
// SlotValue - Retrieval result
// =============================================================================

/// Result of reading a slot.
///
/// Unset singular slots read as [`SlotValue::Empty`]; unset collection slots
/// read as an empty [`SlotValue::Many`].
pub enum SlotValue<'a, T> {
    Empty,
    One(&'a SlotInstance<T>),
    Many(&'a [SlotInstance<T>]),
}

impl<'a, T> SlotValue<'a, T> {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::One(_) => false,
            Self::Many(list) => list.is_empty(),
        }
    }

    /// Number of slot instances.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// The singular occupant, if any.
    pub fn one(&self) -> Option<&'a SlotInstance<T>> {
        match self {
            Self::One(instance) => Some(*instance),
            _ => None,
        }
    }

    /// All occupants as a slice.
    pub fn as_slice(&self) -> &'a [SlotInstance<T>] {
        match self {
            Self::Empty => &[],
            Self::One(instance) => slice::from_ref(*instance),
            Self::Many(list) => *list,
        }
    }

    pub fn iter(&self) -> slice::Iter<'a, SlotInstance<T>> {
        self.as_slice().iter()
    }
}

impl<T> Clone for SlotValue<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SlotValue<'_, T> {}

impl<T> fmt::Debug for SlotValue<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::One(instance) => f.debug_tuple("One").field(instance).finish(),
            Self::Many(list) => f.debug_tuple("Many").field(list).finish(),
        }
    }
}
