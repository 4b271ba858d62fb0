//! Engine - Shared registries behind component declaration.
//!
//! - Namespace: class name → construction closure, used by slots that name
//!   their component class as a string
//!
//! Namespaces are explicit handles rather than process-wide state, so
//! independent component libraries never see each other's classes.

mod namespace;

pub use namespace::*;
