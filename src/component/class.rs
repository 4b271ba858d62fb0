//! Component Class - Declaration-time descriptor.
//!
//! A class is declared once through [`ComponentClassBuilder`] and frozen
//! behind an `Rc` by `build()`. Deriving copies everything the parent
//! declared into a fresh builder, so later declarations on either side stay
//! invisible to the other.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::construct::{Field, Schema};
use crate::engine::{Namespace, WeakNamespace};
use crate::error::{ConstructError, DeclarationError, RenderError};
use crate::slots::{Renderable, SlotDefinition, SlotRegistry, singularize};
use crate::types::Args;

use super::instance::Component;

// =============================================================================
// Hook Types
// =============================================================================

/// Primary rendering logic of a class.
pub type CallHook<T> = Rc<dyn Fn(&mut Component<T>, &mut T) -> Result<(), RenderError>>;

/// Predicate evaluated after populate. `false` skips `call`.
pub type RenderIfHook<T> = Rc<dyn Fn(&Component<T>) -> bool>;

// =============================================================================
// ComponentClass
// =============================================================================

pub struct ComponentClass<T> {
    name: String,
    schema: Schema,
    slots: SlotRegistry<T>,
    namespace: Option<WeakNamespace<T>>,
    call: Option<CallHook<T>>,
    render_if: Option<RenderIfHook<T>>,
}

impl<T> ComponentClass<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn slots(&self) -> &SlotRegistry<T> {
        &self.slots
    }

    /// Namespace that lazy class names are resolved in. `None` when the
    /// class was built without one, or every handle to it has been dropped.
    pub fn namespace(&self) -> Option<Namespace<T>> {
        self.namespace.as_ref().and_then(WeakNamespace::upgrade)
    }

    pub fn has_call(&self) -> bool {
        self.call.is_some()
    }

    pub(crate) fn call_hook(&self) -> Option<CallHook<T>> {
        self.call.clone()
    }

    /// Evaluate `render_if` for a populated component. Defaults to true.
    pub(crate) fn should_render(&self, component: &Component<T>) -> bool {
        self.render_if.as_ref().is_none_or(|hook| hook(component))
    }
}

impl<T: 'static> ComponentClass<T> {
    /// Start declaring a new class.
    pub fn builder(name: impl Into<String>) -> ComponentClassBuilder<T> {
        ComponentClassBuilder::new(name.into())
    }

    /// Start declaring a class that inherits everything `parent` declared.
    pub fn derive(parent: &Rc<Self>, name: impl Into<String>) -> ComponentClassBuilder<T> {
        ComponentClassBuilder {
            name: name.into(),
            schema: parent.schema.clone(),
            slots: parent.slots.clone(),
            namespace: parent.namespace(),
            call: parent.call.clone(),
            render_if: parent.render_if.clone(),
            error: None,
        }
    }

    /// Validate `args` against the schema and create an instance.
    pub fn construct(self: &Rc<Self>, args: Args) -> Result<Component<T>, ConstructError> {
        let attributes = self.schema.bind(args)?;
        trace!(class = %self.name, "constructed component");
        Ok(Component::new(Rc::clone(self), attributes))
    }

    /// Construct and immediately render with `block` as the populate phase.
    pub fn render<F>(class: &Rc<Self>, args: Args, target: &mut T, block: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Component<T>, &mut T) -> Result<(), RenderError>,
    {
        let mut component = class.construct(args)?;
        component.render_in(target, block)
    }
}

impl<T> fmt::Debug for ComponentClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("slots", &self.slots)
            .field("namespace", &self.namespace().as_ref().map(Namespace::name))
            .field("call", &self.call.is_some())
            .field("render_if", &self.render_if.is_some())
            .finish()
    }
}

// =============================================================================
// ComponentClassBuilder
// =============================================================================

/// Declaration API for a [`ComponentClass`].
///
/// Declarations chain. The first invalid declaration is remembered and
/// reported by [`build`](Self::build); later declarations are ignored.
pub struct ComponentClassBuilder<T> {
    name: String,
    schema: Schema,
    slots: SlotRegistry<T>,
    namespace: Option<Namespace<T>>,
    call: Option<CallHook<T>>,
    render_if: Option<RenderIfHook<T>>,
    error: Option<DeclarationError>,
}

impl<T: 'static> ComponentClassBuilder<T> {
    fn new(name: String) -> Self {
        Self {
            name,
            schema: Schema::new(),
            slots: SlotRegistry::new(),
            namespace: None,
            call: None,
            render_if: None,
            error: None,
        }
    }

    /// Required positional constructor param.
    pub fn param(mut self, field: impl Into<Field>) -> Self {
        if self.error.is_none() {
            self.error = self.schema.param(field).err();
        }
        self
    }

    /// Named constructor option.
    pub fn option(mut self, field: impl Into<Field>) -> Self {
        if self.error.is_none() {
            self.error = self.schema.option(field).err();
        }
        self
    }

    /// Single-valued slot.
    pub fn renders_one(self, name: impl Into<String>, renderable: impl Into<Renderable<T>>) -> Self {
        self.define(SlotDefinition::one(name, renderable))
    }

    /// Collection slot. The singular alias is derived from the name.
    pub fn renders_many(self, name: impl Into<String>, renderable: impl Into<Renderable<T>>) -> Self {
        let name = name.into();
        let singular = singularize(&name);
        self.define(SlotDefinition::many(name, singular, renderable))
    }

    /// Collection slot with an explicit singular alias.
    pub fn renders_many_as(
        self,
        name: impl Into<String>,
        singular: impl Into<String>,
        renderable: impl Into<Renderable<T>>,
    ) -> Self {
        self.define(SlotDefinition::many(name, singular, renderable))
    }

    fn define(mut self, definition: SlotDefinition<T>) -> Self {
        if self.error.is_none() {
            self.error = self.slots.define(definition).err();
        }
        self
    }

    /// Register the class in `namespace` on build and resolve lazy class
    /// names there.
    pub fn namespace(mut self, namespace: &Namespace<T>) -> Self {
        self.namespace = Some(namespace.clone());
        self
    }

    pub fn call<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Component<T>, &mut T) -> Result<(), RenderError> + 'static,
    {
        self.call = Some(Rc::new(hook));
        self
    }

    pub fn render_if<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Component<T>) -> bool + 'static,
    {
        self.render_if = Some(Rc::new(hook));
        self
    }

    /// Freeze the class and register it in its namespace.
    pub fn build(self) -> Result<Rc<ComponentClass<T>>, DeclarationError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let class = Rc::new(ComponentClass {
            name: self.name,
            schema: self.schema,
            slots: self.slots,
            namespace: self.namespace.as_ref().map(Namespace::downgrade),
            call: self.call,
            render_if: self.render_if,
        });

        if let Some(namespace) = &self.namespace {
            namespace.register(&class)?;
        }
        Ok(class)
    }
}
