//! Code Generation
//!
//! Builds the in-memory JNC class model of a module.
//!
//! Architecture:
//! - names / types / paths: pure lookups over the schema tree (identifiers,
//!   wrapper types, packages)
//! - synth: per-node-shape member synthesis, one `match` over [`synth::NodeShape`]
//! - model + collector: two-phase builders frozen into value-equal members,
//!   accumulated in insertion-ordered sets
//! - class: walks a module and assembles [`model::GeneratedClass`]es
//!
//! Nothing here renders Java text; the model is handed to an external renderer.

pub mod class;
pub mod collector;
pub mod model;
pub mod names;
pub mod paths;
pub mod synth;
pub mod types;

pub use class::{generate_classes, ClassModel};
pub use collector::OrderedSet;
pub use model::{ClassKind, Field, GeneratedClass, Method, MethodGroup, Modifier, Param};
pub use names::{camelize, normalize};
pub use types::{Builtin, HostPrimitive, ResolvedType, WrapperType};
