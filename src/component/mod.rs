//! Component - Classes and their rendering instances.
//!
//! - [`ComponentClass`]: frozen descriptor (schema, slots, namespace, hooks)
//! - [`ComponentClassBuilder`]: declaration-time API producing a class
//! - [`Component`]: one constructed instance, driven by `render_in`
//!
//! # Example
//!
//! ```
//! use spark_slots::{ComponentClass, Content, Args};
//!
//! let button = ComponentClass::<Vec<String>>::builder("ButtonComponent")
//!     .renders_one("title", ())
//!     .call(|this, target| {
//!         target.push("<<".into());
//!         this.draw_slot("title", target)?;
//!         target.push(">>".into());
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut target = Vec::new();
//! ComponentClass::render(&button, Args::new(), &mut target, |button, target| {
//!     button.content("title", target, |target: &mut Vec<String>| {
//!         target.push("OK".into());
//!         Ok(())
//!     })
//! })
//! .unwrap();
//!
//! assert_eq!(target, vec!["<<", "OK", ">>"]);
//! ```

mod class;
mod instance;

pub use class::{CallHook, ComponentClass, ComponentClassBuilder, RenderIfHook};
pub use instance::{Access, Component, RenderState};
