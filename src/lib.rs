//! # spark-slots
//!
//! Slot-based component composition for Rust drawing targets.
//!
//! Components are reusable rendering units that emit ordered drawing
//! instructions into an opaque target (`Vec<String>`, a PDF canvas, a
//! terminal buffer, anything). Each component class declares named slots
//! that hold either literal content blocks or nested child components.
//!
//! ## Architecture
//!
//! ```text
//! ComponentClass (schema + slot registry + hooks)
//!        │ construct(args)
//!        ▼
//! Component ──render_in(target, block)──► populate slots ──► render? ──► call
//!        │                                                            │
//!        └── SlotInstance::draw ◄───────────────── draw_slot ─────────┘
//! ```
//!
//! Rendering is synchronous and depth-first. The populate block always runs
//! before `call`, so `call` can rely on every slot being filled.
//!
//! ## Modules
//!
//! - [`construct`] - Strict constructor contract (params, options, validation)
//! - [`slots`] - Slot definitions, per-class registry, slot instances
//! - [`component`] - Component classes and the render lifecycle
//! - [`engine`] - Namespace registry used for lazy class lookup
//! - [`error`] - Declaration, construction and rendering errors
//! - [`types`] - Call arguments and validated attributes
//! - [`version`] - Crate version triple

pub mod component;
pub mod construct;
pub mod engine;
pub mod error;
pub mod slots;
pub mod types;
pub mod version;

// Re-export commonly used items
pub use types::*;

pub use component::{Access, Component, ComponentClass, ComponentClassBuilder, RenderState};

pub use construct::{Field, Schema};

pub use engine::{Namespace, WeakNamespace};

pub use error::{ConstructError, DeclarationError, RenderError};

pub use slots::{
    Content, Drawable, Renderable, SlotCallback, SlotDefinition, SlotInstance, SlotRegistry,
    SlotValue, singularize,
};
