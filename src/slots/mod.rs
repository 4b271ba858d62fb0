//! Slots - Named placeholders on a component.
//!
//! - [`SlotDefinition`]: static declaration (name, multiplicity, renderable)
//! - [`SlotRegistry`]: per-class definitions plus singular aliases
//! - [`SlotInstance`]: runtime occupant for one render
//! - [`SlotValue`]: what reading a slot returns
//!
//! Definitions are fixed when a class is built. Instances are created by
//! slot assignment during the populate phase and dropped once the owning
//! component finishes rendering.

mod definition;
mod inflect;
mod instance;
mod registry;

pub use definition::{Renderable, SlotCallback, SlotDefinition};
pub use inflect::singularize;
pub use instance::{Content, DrawFn, Drawable, PopulateFn, SlotInstance, SlotValue};
pub use registry::SlotRegistry;
