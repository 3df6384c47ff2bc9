//! JNC Code Generation
//!
//! Compiles an already-parsed, annotated YANG schema tree into the class model
//! of a typed Java configuration API on top of the JNC runtime
//! (`com.tailf.jnc`), plus the tree metadata the runtime uses for path-based
//! lookups.
//!
//! ## Features
//!
//! - **Class Model**: root, container, list and typedef classes with their
//!   constructors, accessors, cloners and structural metadata methods
//! - **Type Resolution**: derived types, leafrefs and composite encodings mapped
//!   onto runtime wrappers and host primitives
//! - **Tree Metadata**: verbatim tagpaths, namespaces and occurrence bounds
//! - **Diagnostics**: recoverable problems collected once per distinct cause
//!
//! ## Architecture
//!
//! ```text
//! SchemaTree (arena, JSON or builder API)
//!   ├── codegen::paths / codegen::types   placement and wrapper types
//!   ├── codegen::synth                    members per node shape
//!   ├── codegen::class                    GeneratedClass assembly
//!   └── metadata                          tagpath / occurs tuples
//!          └── compiler::CompiledModule   handed to an external renderer
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use jnc_codegen::{Compiler, SchemaTree};
//!
//! let tree = SchemaTree::from_json(&std::fs::read_to_string("tree.json")?)?;
//! let mut compiler = Compiler::default();
//! for module in compiler.compile_named(&tree, "ietf-interfaces")? {
//!     println!("{}: {} classes", module.module, module.classes.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codegen;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod metadata;
pub mod schema;
pub mod session;

pub use codegen::{ClassKind, GeneratedClass, Method, OrderedSet};
pub use compiler::{compile_module, compile_with_augmented, CompiledModule, Compiler};
pub use config::CompilerConfig;
pub use diagnostics::{DiagnosticCode, DiagnosticItem, Diagnostics, Severity};
pub use error::{CompileError, Result, SchemaError};
pub use metadata::MetadataNode;
pub use schema::{NodeId, NodeKind, SchemaNode, SchemaTree, TypeRef};
pub use session::Session;
