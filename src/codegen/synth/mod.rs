//! Method/Field Synthesis
//!
//! Decides which constructors, accessors and structural methods each
//! generated class gets. Every node is first classified into a closed
//! [`NodeShape`]; each generator is then a single `match` over the shape.
//!
//! - [`element`]: constructors, cloners, name getters, `addChild` and the
//!   access methods a container or list contributes to its parent
//! - [`leaf`]: the members a leaf or leaf-list contributes to its parent
//! - [`typedef`]: constructors, setters and `check` of typedef classes
//! - [`imports`]: canonical imports for every member

pub mod element;
pub mod imports;
pub mod leaf;
pub mod typedef;

pub use imports::ImportScope;

use crate::codegen::model::MethodBuilder;
use crate::codegen::paths::{
    data_children, is_config, module_package, resolve_module, resolve_package, resolve_parent, schema_path,
    ELEMENT_KINDS, LEAF_KINDS,
};
use crate::codegen::types::{resolve_node_type, resolve_value_base, Builtin, CompositeArgs, ResolvedType};
use crate::schema::{NodeId, NodeKind, SchemaTree, TypeRefKind};
use crate::session::Session;

// =============================================================================
// Node Shapes
// =============================================================================

/// A key leaf of a configuration list
#[derive(Debug, Clone)]
pub struct KeyInfo {
    pub node: NodeId,
    /// Identifier as written
    pub name: String,
    /// Camelized identifier
    pub var: String,
    pub resolved: ResolvedType,
    pub args: CompositeArgs,
}

#[derive(Debug, Clone)]
pub struct ListInfo {
    /// Configuration list with every key resolved
    pub config: bool,
    /// Empty unless `config`
    pub keys: Vec<KeyInfo>,
}

impl ListInfo {
    /// Some key is string-backed, so no primitive overloads
    pub fn is_string(&self) -> bool {
        self.keys.iter().any(|k| k.resolved.is_string())
    }
}

#[derive(Debug, Clone)]
pub struct LeafInfo {
    /// Leaf-list rather than leaf
    pub list: bool,
    pub resolved: ResolvedType,
    pub args: CompositeArgs,
    /// Neither a key nor mandatory; leaf-lists always are
    pub optional: bool,
    pub default: Option<String>,
}

impl LeafInfo {
    pub fn is_empty_type(&self) -> bool {
        self.resolved.wrapper.is_runtime(Builtin::Empty)
    }
}

#[derive(Debug, Clone)]
pub struct TypedefInfo {
    /// Resolved type of the typedef's own `type`; the wrapper is the superclass
    pub resolved: ResolvedType,
    /// Passed to `super` only when the superclass is a runtime composite
    pub args: CompositeArgs,
    /// The derivation chain restricts values, so a `check` method exists
    pub checked: bool,
    /// The base type is `bits` or an enumeration
    pub delegates_check: bool,
}

/// Closed classification of the nodes a generator can see
#[derive(Debug, Clone)]
pub enum NodeShape {
    Root,
    /// Container or notification
    Container,
    List(ListInfo),
    /// Leaf or leaf-list
    Leaf(LeafInfo),
    Typedef(TypedefInfo),
}

impl NodeShape {
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Container | Self::List(_))
    }
}

/// Classify `id`. Choice, case and augment nodes have no shape.
pub fn classify(tree: &SchemaTree, id: NodeId, session: &mut Session) -> Option<NodeShape> {
    let shape = match tree[id].kind {
        NodeKind::Module | NodeKind::Submodule => NodeShape::Root,
        NodeKind::Container | NodeKind::Notification => NodeShape::Container,
        NodeKind::List => NodeShape::List(list_info(tree, id, session)),
        NodeKind::Leaf | NodeKind::LeafList => NodeShape::Leaf(leaf_info(tree, id, session)),
        NodeKind::Typedef => NodeShape::Typedef(typedef_info(tree, id, session)),
        NodeKind::Choice | NodeKind::Case | NodeKind::Augment => return None,
    };
    Some(shape)
}

fn list_info(tree: &SchemaTree, id: NodeId, session: &mut Session) -> ListInfo {
    let node = &tree[id];
    if !is_config(tree, id) || node.keys.is_empty() {
        return ListInfo {
            config: false,
            keys: Vec::new(),
        };
    }

    let leaves = data_children(tree, id, LEAF_KINDS, session);
    let mut keys = Vec::new();
    let mut dangling = false;
    for key in &node.keys {
        let found = leaves
            .iter()
            .copied()
            .find(|&leaf| tree[leaf].kind == NodeKind::Leaf && &tree[leaf].name == key);
        match found {
            Some(leaf) => {
                let (resolved, args) = value_type(tree, leaf, session);
                keys.push(KeyInfo {
                    node: leaf,
                    name: key.clone(),
                    var: session.camelize(key),
                    resolved,
                    args,
                });
            }
            None => {
                session.diagnostics.dangling_key(&schema_path(tree, id), key);
                dangling = true;
            }
        }
    }

    if dangling {
        ListInfo {
            config: false,
            keys: Vec::new(),
        }
    } else {
        ListInfo { config: true, keys }
    }
}

fn leaf_info(tree: &SchemaTree, id: NodeId, session: &mut Session) -> LeafInfo {
    let node = &tree[id];
    let list = node.kind == NodeKind::LeafList;
    let (resolved, args) = value_type(tree, id, session);
    LeafInfo {
        list,
        resolved,
        args,
        optional: list || !(is_key(tree, id) || node.mandatory),
        default: node.default.clone(),
    }
}

fn typedef_info(tree: &SchemaTree, id: NodeId, session: &mut Session) -> TypedefInfo {
    let (resolved, args) = value_type(tree, id, session);
    let base = tree[id]
        .type_ref
        .as_ref()
        .map(|t| resolve_value_base(tree, t, session));
    let delegates_check = base
        .map(|b| !b.restrictions.bits.is_empty() || !b.restrictions.enums.is_empty())
        .unwrap_or(false);
    TypedefInfo {
        resolved,
        args,
        checked: chain_restricts(tree, id, session),
        delegates_check,
    }
}

/// Resolved type of a leafy or typedef node plus its composite arguments
fn value_type(tree: &SchemaTree, id: NodeId, session: &mut Session) -> (ResolvedType, CompositeArgs) {
    let resolved = resolve_node_type(tree, id, session);
    let args = match &tree[id].type_ref {
        Some(type_ref) => {
            let base = resolve_value_base(tree, type_ref, session);
            CompositeArgs::for_wrapper(tree, &resolved.wrapper, base, id, session)
        }
        None => CompositeArgs::None,
    };
    (resolved, args)
}

/// Whether any type along the typedef's derivation chain restricts values
fn chain_restricts(tree: &SchemaTree, typedef: NodeId, session: &Session) -> bool {
    let mut current = tree[typedef].type_ref.as_ref();
    for _ in 0..=session.config.resolver.max_derivation_depth {
        let Some(type_ref) = current else {
            return false;
        };
        if type_ref.restrictions.constrains_values() {
            return true;
        }
        if type_ref.kind != TypeRefKind::Derived {
            return false;
        }
        current = type_ref.target.and_then(|t| tree[t].type_ref.as_ref());
    }
    false
}

/// Leaf named as a key of its parent list
pub fn is_key(tree: &SchemaTree, id: NodeId) -> bool {
    resolve_parent(tree, id)
        .map(|p| tree[p].kind == NodeKind::List && tree[p].keys.iter().any(|k| k == &tree[id].name))
        .unwrap_or(false)
}

// =============================================================================
// Node Context
// =============================================================================

/// Names and placement of one node, shared by its generators
#[derive(Debug, Clone)]
pub struct NodeContext {
    pub id: NodeId,
    /// Identifier as written
    pub raw: String,
    pub kind: NodeKind,
    /// Normalized identifier, the class name
    pub class_name: String,
    /// Camelized identifier, used for fields and variables
    pub var: String,
    /// Package of the node's class
    pub package: String,
    /// Short name of the module's root class
    pub root: String,
    /// Direct child of a module
    pub top_level: bool,
    /// Defined by another module than its parent
    pub augmented: bool,
    pub scope: ImportScope,
}

impl NodeContext {
    pub fn new(tree: &SchemaTree, id: NodeId, session: &mut Session) -> Self {
        let node = &tree[id];
        let module = resolve_module(tree, id);
        let root = root_class_name(tree, module, session);
        let root_package = module_package(tree, module, session);
        let package = resolve_package(tree, id, session);
        let class_name = session.normalize(&node.name);
        let var = session.camelize(&node.name);

        let parent = resolve_parent(tree, id);
        let top_level = parent.map(|p| tree[p].kind.is_module_like()).unwrap_or(false);
        let augmented = match node.parent {
            Some(raw_parent) => resolve_module(tree, raw_parent) != module,
            None => false,
        };

        let child_package = if node.kind.is_module_like() {
            root_package.clone()
        } else {
            [package.as_str(), var.as_str()]
                .iter()
                .filter(|p| !p.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(".")
        };
        let children = data_children(tree, id, ELEMENT_KINDS, session)
            .into_iter()
            .map(|ch| session.normalize(&tree[ch].name))
            .collect();

        let scope = ImportScope {
            root: root.clone(),
            root_package,
            package: package.clone(),
            own_class: class_name.clone(),
            child_package,
            children,
            runtime_package: session.config.output.runtime_package.clone(),
        };

        Self {
            id,
            raw: node.name.clone(),
            kind: node.kind,
            class_name,
            var,
            package,
            root,
            top_level,
            augmented,
            scope,
        }
    }

    pub fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }

    /// `(<Root>.NAMESPACE, "<raw>");`
    pub fn root_namespace(&self, raw: &str) -> String {
        format!("({}.NAMESPACE, \"{}\");", self.root, raw)
    }

    /// `    /* Access methods for [optional ]<keyword> child: "<raw>". */`
    pub fn access_comment(&self, optional: bool) -> String {
        let optional = if optional { "optional " } else { "" };
        format!(
            "    /* Access methods for {}{} child: \"{}\". */",
            optional,
            self.keyword(),
            self.raw
        )
    }

    /// Skeleton of an access method this node contributes to its parent
    pub fn parent_template(&self, prefix: &str, returns_self: bool) -> MethodBuilder {
        let mut method = MethodBuilder::new(format!("{}{}", prefix, self.class_name));
        if returns_self {
            method.returns(&self.class_name);
        }
        method.exception("JNCException");
        method
    }
}

/// Name of a module's root class: its normalized prefix, or its name
/// when the prefix is missing
pub fn root_class_name(tree: &SchemaTree, module: NodeId, session: &mut Session) -> String {
    let node = &tree[module];
    session.normalize(node.prefix.as_deref().unwrap_or(&node.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;
    use crate::schema::{SchemaNode, TypeRef};

    fn fixture() -> (SchemaTree, NodeId, NodeId) {
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "pfx"));
        let top = tree.add_child(m, SchemaNode::new(NodeKind::Container, "top"));
        (tree, m, top)
    }

    #[test]
    fn test_list_with_resolved_keys_is_config() {
        let (mut tree, _, top) = fixture();
        let list = tree.add_child(top, SchemaNode::new(NodeKind::List, "items").with_keys(["id"]));
        tree.add_child(list, SchemaNode::leaf("id", TypeRef::builtin("uint32")));
        let mut session = Session::default();

        match classify(&tree, list, &mut session) {
            Some(NodeShape::List(info)) => {
                assert!(info.config);
                assert_eq!(info.keys.len(), 1);
                assert_eq!(info.keys[0].var, "id");
                assert!(!info.is_string());
            }
            other => panic!("Expected List, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_key_degrades_list() {
        let (mut tree, _, top) = fixture();
        let list = tree.add_child(top, SchemaNode::new(NodeKind::List, "items").with_keys(["missing"]));
        tree.add_child(list, SchemaNode::leaf("id", TypeRef::builtin("uint32")));
        let mut session = Session::default();

        match classify(&tree, list, &mut session) {
            Some(NodeShape::List(info)) => {
                assert!(!info.config);
                assert!(info.keys.is_empty());
            }
            other => panic!("Expected List, got {:?}", other),
        }
        let items: Vec<_> = session.diagnostics.with_code(DiagnosticCode::DanglingKey).collect();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_state_list_has_no_keys() {
        let (mut tree, _, top) = fixture();
        let list = tree.add_child(
            top,
            SchemaNode::new(NodeKind::List, "stats").with_keys(["id"]).with_config(false),
        );
        tree.add_child(list, SchemaNode::leaf("id", TypeRef::builtin("uint32")));
        let mut session = Session::default();

        match classify(&tree, list, &mut session) {
            Some(NodeShape::List(info)) => assert!(!info.config),
            other => panic!("Expected List, got {:?}", other),
        }
        assert!(session.diagnostics.is_empty());
    }

    #[test]
    fn test_leaf_optionality() {
        let (mut tree, _, top) = fixture();
        let list = tree.add_child(top, SchemaNode::new(NodeKind::List, "items").with_keys(["id"]));
        let key = tree.add_child(list, SchemaNode::leaf("id", TypeRef::builtin("uint32")));
        let plain = tree.add_child(list, SchemaNode::leaf("note", TypeRef::builtin("string")));
        let required = tree.add_child(top, SchemaNode::leaf("name", TypeRef::builtin("string")).mandatory());
        let tags = tree.add_child(top, SchemaNode::leaf_list("tags", TypeRef::builtin("string")));
        let mut session = Session::default();

        let optional = |id, session: &mut Session| match classify(&tree, id, session) {
            Some(NodeShape::Leaf(info)) => info.optional,
            other => panic!("Expected Leaf, got {:?}", other),
        };
        assert!(!optional(key, &mut session));
        assert!(optional(plain, &mut session));
        assert!(!optional(required, &mut session));
        assert!(optional(tags, &mut session));
    }

    #[test]
    fn test_typedef_check_follows_chain() {
        let (mut tree, m, _) = fixture();
        let base = tree.add_child(m, SchemaNode::typedef("base", TypeRef::builtin("string").with_length("1..8")));
        let derived = tree.add_child(m, SchemaNode::typedef("derived", TypeRef::derived("base", Some(base))));
        let free = tree.add_child(m, SchemaNode::typedef("free", TypeRef::builtin("int32")));
        let colors = tree.add_child(
            m,
            SchemaNode::typedef("colors", TypeRef::builtin("enumeration").with_enums(["red"])),
        );
        let mut session = Session::default();

        let info = |id, session: &mut Session| match classify(&tree, id, session) {
            Some(NodeShape::Typedef(info)) => info,
            other => panic!("Expected Typedef, got {:?}", other),
        };
        assert!(info(derived, &mut session).checked);
        assert_eq!(info(derived, &mut session).resolved.wrapper.class_name(), "Base");
        assert!(!info(free, &mut session).checked);
        let colors = info(colors, &mut session);
        assert!(colors.checked && colors.delegates_check);
        assert!(!colors.args.is_none());
    }

    #[test]
    fn test_node_context() {
        let (mut tree, m, top) = fixture();
        let inner = tree.add_child(top, SchemaNode::new(NodeKind::Container, "inner-box"));
        let mut session = Session::default();

        let ctx = NodeContext::new(&tree, top, &mut session);
        assert_eq!(ctx.class_name, "Top");
        assert_eq!(ctx.root, "Pfx");
        assert_eq!(ctx.package, "gen.m");
        assert!(ctx.top_level);
        assert!(!ctx.augmented);
        assert_eq!(ctx.scope.children, vec!["InnerBox".to_string()]);
        assert_eq!(ctx.scope.child_package, "gen.m.top");
        assert_eq!(ctx.root_namespace("top"), "(Pfx.NAMESPACE, \"top\");");

        let inner = NodeContext::new(&tree, inner, &mut session);
        assert!(!inner.top_level);
        assert_eq!(inner.var, "innerBox");

        let module = NodeContext::new(&tree, m, &mut session);
        assert_eq!(module.scope.child_package, "gen.m");
    }
}
