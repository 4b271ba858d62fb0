//! Namespace Registry - Class name → construction closure.
//!
//! Slots declared with a class *name* resolve it here at assignment time,
//! not at declaration time. A class may therefore reference classes that
//! are declared after it, as long as they are registered before the slot
//! is filled.
//!
//! The registry is a shared handle: every clone sees the same entries.
//! Classes register themselves when built with a namespace, and stay alive
//! as long as the namespace does. A class only keeps a [`WeakNamespace`]
//! back, so dropping the last namespace handle frees its classes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::component::{Component, ComponentClass};
use crate::error::{ConstructError, DeclarationError, RenderError};
use crate::types::Args;

/// Construction closure stored per class name.
pub type Factory<T> = Rc<dyn Fn(Args) -> Result<Component<T>, ConstructError>>;

// =============================================================================
// Namespace
// =============================================================================

pub struct Namespace<T> {
    inner: Rc<NamespaceInner<T>>,
}

struct NamespaceInner<T> {
    name: String,
    factories: RefCell<HashMap<String, Factory<T>>>,
}

impl<T> Namespace<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(NamespaceInner {
                name: name.into(),
                factories: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.factories.borrow().contains_key(name)
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.factories.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Non-owning handle, held by the classes registered here.
    pub fn downgrade(&self) -> WeakNamespace<T> {
        WeakNamespace {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<T: 'static> Namespace<T> {
    /// Register a class under its own name.
    pub fn register(&self, class: &Rc<ComponentClass<T>>) -> Result<(), DeclarationError> {
        let class = Rc::clone(class);
        let name = class.name().to_string();
        self.register_factory(name, move |args| class.construct(args))
    }

    /// Register a construction closure under `name`.
    pub fn register_factory<F>(&self, name: impl Into<String>, factory: F) -> Result<(), DeclarationError>
    where
        F: Fn(Args) -> Result<Component<T>, ConstructError> + 'static,
    {
        let name = name.into();
        let mut factories = self.inner.factories.borrow_mut();
        if factories.contains_key(&name) {
            return Err(DeclarationError::DuplicateClass {
                name,
                namespace: self.inner.name.clone(),
            });
        }
        debug!(namespace = %self.inner.name, class = %name, "registered class");
        factories.insert(name, Rc::new(factory));
        Ok(())
    }

    /// Resolve `name` now and construct it with `args`.
    pub fn construct(&self, name: &str, args: Args) -> Result<Component<T>, RenderError> {
        // Release the borrow before running the factory, it may touch the namespace
        let factory = self.inner.factories.borrow().get(name).cloned();
        let Some(factory) = factory else {
            return Err(RenderError::UnresolvedClass {
                namespace: self.inner.name.clone(),
                name: name.to_string(),
            });
        };

        debug!(namespace = %self.inner.name, class = %name, "resolved class by name");
        Ok(factory(args)?)
    }
}

impl<T> Clone for Namespace<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Namespace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.inner.name)
            .field("classes", &self.names())
            .finish()
    }
}

// =============================================================================
// WeakNamespace
// =============================================================================

pub struct WeakNamespace<T> {
    inner: Weak<NamespaceInner<T>>,
}

impl<T> WeakNamespace<T> {
    /// The namespace, while any strong handle is alive.
    pub fn upgrade(&self) -> Option<Namespace<T>> {
        self.inner.upgrade().map(|inner| Namespace { inner })
    }
}

impl<T> Clone for WeakNamespace<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for WeakNamespace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(namespace) => write!(f, "WeakNamespace({})", namespace.name()),
            None => f.write_str("WeakNamespace(dropped)"),
        }
    }
}
