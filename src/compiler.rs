//! Module compilation
//!
//! Drives one compilation run: fatal checks, the derivation cycle pass, class
//! generation, tree metadata, and the modules augmented by the compiled one.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::codegen::class::generate_classes;
use crate::codegen::collector::OrderedSet;
use crate::codegen::model::GeneratedClass;
use crate::codegen::paths::{resolve_module, schema_path};
use crate::config::CompilerConfig;
use crate::diagnostics::{DiagnosticItem, Diagnostics};
use crate::error::{CompileError, Result, SchemaError};
use crate::metadata::{self, MetadataNode};
use crate::schema::{derivation, NodeId, NodeKind, SchemaTree};
use crate::session::Session;

/// Everything generated for one module
#[derive(Debug, Clone, Serialize)]
pub struct CompiledModule {
    pub module: String,
    pub namespace: String,
    pub prefix: String,
    /// Root class, typedef classes, then element classes children first
    pub classes: Vec<GeneratedClass>,
    pub metadata: Vec<MetadataNode>,
    /// Package to class names
    pub class_hierarchy: IndexMap<String, OrderedSet<String>>,
    /// Modules whose trees this module augments
    pub augmented_modules: Vec<String>,
    /// Diagnostics raised while compiling this module
    pub diagnostics: Vec<DiagnosticItem>,
}

impl CompiledModule {
    pub fn class(&self, qualified_name: &str) -> Option<&GeneratedClass> {
        self.classes.iter().find(|c| c.qualified_name() == qualified_name)
    }

    pub fn metadata_at(&self, tagpath: &str) -> Option<&MetadataNode> {
        self.metadata.iter().find(|m| m.tagpath == tagpath)
    }
}

/// Compiler over one session; modules compiled by the same compiler share
/// the identifier cache and diagnostic deduplication
#[derive(Debug, Default)]
pub struct Compiler {
    session: Session,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            session: Session::new(config),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.session.diagnostics
    }

    /// Compile a single module
    pub fn compile(&mut self, tree: &SchemaTree, module: NodeId) -> Result<CompiledModule> {
        compile_module(tree, module, &mut self.session)
    }

    /// Compile a module followed by the modules it augments
    pub fn compile_with_augmented(&mut self, tree: &SchemaTree, module: NodeId) -> Result<Vec<CompiledModule>> {
        compile_with_augmented(tree, module, &mut self.session)
    }

    /// Look a module up by name and compile it with the modules it augments
    pub fn compile_named(&mut self, tree: &SchemaTree, name: &str) -> Result<Vec<CompiledModule>> {
        let module = tree
            .module_by_name(name)
            .ok_or_else(|| SchemaError::ModuleNotFound(name.to_string()))?;
        self.compile_with_augmented(tree, module)
    }
}

/// Compile `module`.
///
/// Fails before generating anything when `module` is not a module or lacks a
/// namespace or prefix. Everything else degrades to diagnostics.
pub fn compile_module(tree: &SchemaTree, module: NodeId, session: &mut Session) -> Result<CompiledModule> {
    tree.validate()?;
    let node = &tree[module];
    if node.kind != NodeKind::Module {
        return Err(CompileError::NotAModule {
            name: node.name.clone(),
            id: module,
        });
    }
    let namespace = node.namespace.clone().ok_or_else(|| CompileError::MissingNamespace {
        module: node.name.clone(),
    })?;
    let prefix = node.prefix.clone().ok_or_else(|| CompileError::MissingPrefix {
        module: node.name.clone(),
    })?;

    let start = session.diagnostics.len();
    let cycles = derivation::report_cycles(tree, &mut session.diagnostics);
    if cycles > 0 {
        debug!(module = %node.name, cycles, "Typedef derivation cycles found");
    }

    let augmented_modules = augment_targets(tree, module, session);

    let (classes, class_hierarchy) = if session.config.generation.classes {
        let model = generate_classes(tree, module, session);
        (model.classes, model.class_hierarchy)
    } else {
        (Vec::new(), IndexMap::new())
    };
    let metadata = if session.config.generation.schema {
        metadata::emit(tree, module, session)
    } else {
        Vec::new()
    };

    let diagnostics = session.diagnostics.all()[start..].to_vec();
    info!(
        module = %node.name,
        classes = classes.len(),
        metadata = metadata.len(),
        warnings = diagnostics.len(),
        "Compiled module"
    );

    Ok(CompiledModule {
        module: node.name.clone(),
        namespace,
        prefix,
        classes,
        metadata,
        class_hierarchy,
        augmented_modules,
        diagnostics,
    })
}

/// Compile `module`, then each module it augments, one level deep.
///
/// A failure in an augmented module is recorded as a diagnostic on the main
/// module and that module is left out.
pub fn compile_with_augmented(tree: &SchemaTree, module: NodeId, session: &mut Session) -> Result<Vec<CompiledModule>> {
    let mut main = compile_module(tree, module, session)?;
    let mut augmented = Vec::new();

    for name in main.augmented_modules.clone() {
        let result = tree
            .module_by_name(&name)
            .ok_or_else(|| CompileError::from(SchemaError::ModuleNotFound(name.clone())))
            .and_then(|id| compile_module(tree, id, session));
        match result {
            Ok(compiled) => augmented.push(compiled),
            Err(e) => {
                let start = session.diagnostics.len();
                session.diagnostics.augmented_module_skipped(&name, &e.to_string());
                main.diagnostics.extend_from_slice(&session.diagnostics.all()[start..]);
            }
        }
    }

    let mut res = vec![main];
    res.extend(augmented);
    Ok(res)
}

/// Names of the other modules targeted by the top-level augments of `module`
/// and its submodules
fn augment_targets(tree: &SchemaTree, module: NodeId, session: &mut Session) -> Vec<String> {
    let mut scopes = vec![module];
    scopes.extend(tree.submodules_of(&tree[module].name));

    let mut targets = OrderedSet::new();
    for scope in scopes {
        for &child in &tree[scope].children {
            if tree[child].kind != NodeKind::Augment {
                continue;
            }
            match tree[child].target {
                Some(target) => {
                    let target_module = resolve_module(tree, target);
                    if target_module != module {
                        targets.add(tree[target_module].name.clone());
                    }
                }
                None => {
                    session.diagnostics.missing_augment_target(&schema_path(tree, child));
                }
            }
        }
    }
    targets.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;
    use crate::schema::{SchemaNode, TypeRef};

    #[test]
    fn test_missing_prefix_is_fatal() {
        let mut tree = SchemaTree::new();
        let mut module = SchemaNode::module("m", "urn:m", "m");
        module.prefix = None;
        let m = tree.add_root(module);

        let mut compiler = Compiler::default();
        match compiler.compile(&tree, m) {
            Err(CompileError::MissingPrefix { module }) => assert_eq!(module, "m"),
            other => panic!("Expected MissingPrefix, got {:?}", other.map(|c| c.module)),
        }
    }

    #[test]
    fn test_not_a_module() {
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "m"));
        let top = tree.add_child(m, SchemaNode::new(NodeKind::Container, "top"));

        let mut compiler = Compiler::default();
        assert!(matches!(compiler.compile(&tree, top), Err(CompileError::NotAModule { .. })));
    }

    #[test]
    fn test_generation_switches() {
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "m"));
        let top = tree.add_child(m, SchemaNode::new(NodeKind::Container, "top"));
        tree.add_child(top, SchemaNode::leaf("name", TypeRef::builtin("string")));

        let mut config = CompilerConfig::default();
        config.generation.classes = false;
        let compiled = Compiler::new(config).compile(&tree, m).unwrap();
        assert!(compiled.classes.is_empty());
        assert_eq!(compiled.metadata.len(), 3);

        let mut config = CompilerConfig::default();
        config.generation.schema = false;
        let compiled = Compiler::new(config).compile(&tree, m).unwrap();
        assert_eq!(compiled.classes.len(), 2);
        assert!(compiled.metadata.is_empty());
    }

    #[test]
    fn test_augment_without_target() {
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "m"));
        tree.add_child(m, SchemaNode::new(NodeKind::Augment, "/other:top"));

        let mut compiler = Compiler::default();
        let compiled = compiler.compile(&tree, m).unwrap();
        assert!(compiled.augmented_modules.is_empty());
        assert_eq!(compiled.diagnostics.len(), 1);
        assert_eq!(compiled.diagnostics[0].code, DiagnosticCode::MissingAugmentTarget);
    }

    #[test]
    fn test_augmented_module_is_compiled_after() {
        let mut tree = SchemaTree::new();
        let base = tree.add_root(SchemaNode::module("base", "urn:base", "b"));
        let top = tree.add_child(base, SchemaNode::new(NodeKind::Container, "top"));
        let ext = tree.add_root(SchemaNode::module("ext", "urn:ext", "e"));
        let augment = tree.add_child(ext, SchemaNode::new(NodeKind::Augment, "/b:top"));
        tree[augment].target = Some(top);
        let mut extra = SchemaNode::new(NodeKind::Container, "extra");
        extra.origin = Some(ext);
        tree.add_child(top, extra);

        let mut compiler = Compiler::default();
        let compiled = compiler.compile_named(&tree, "ext").unwrap();
        let modules: Vec<&str> = compiled.iter().map(|c| c.module.as_str()).collect();
        assert_eq!(modules, vec!["ext", "base"]);
        assert_eq!(compiled[0].augmented_modules, vec!["base"]);

        let extra = compiled[1].class("gen.base.top.Extra").unwrap();
        let ctor = extra.constructors.first().unwrap();
        assert_eq!(
            ctor.body,
            vec!["super(E.NAMESPACE, \"extra\");", "setDefaultPrefix();", "setPrefix(E.PREFIX);"]
        );
        assert_eq!(compiled[1].metadata_at("/top/extra/").unwrap().namespace, "urn:ext");
    }

    #[test]
    fn test_failed_augmented_module_is_skipped() {
        let mut tree = SchemaTree::new();
        let mut base_node = SchemaNode::module("base", "urn:base", "b");
        base_node.namespace = None;
        let base = tree.add_root(base_node);
        let top = tree.add_child(base, SchemaNode::new(NodeKind::Container, "top"));
        let ext = tree.add_root(SchemaNode::module("ext", "urn:ext", "e"));
        let augment = tree.add_child(ext, SchemaNode::new(NodeKind::Augment, "/b:top"));
        tree[augment].target = Some(top);

        let compiled = Compiler::default().compile_named(&tree, "ext").unwrap();
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].diagnostics[0].code, DiagnosticCode::AugmentedModuleSkipped);
    }

    #[test]
    fn test_unknown_module_name() {
        let tree = SchemaTree::new();
        assert!(matches!(
            Compiler::default().compile_named(&tree, "nope"),
            Err(CompileError::Schema(SchemaError::ModuleNotFound(_)))
        ));
    }
}
