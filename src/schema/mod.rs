//! Schema Tree
//!
//! Arena representation of an already-parsed, annotated module. Nodes are
//! addressed by [`NodeId`] handles; parent links are handles too, so the tree
//! can be walked in both directions without shared ownership.
//!
//! The tree is produced by an external parser. It can be deserialized from
//! JSON or assembled with [`SchemaTree::add_root`] / [`SchemaTree::add_child`].

pub mod derivation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::SchemaError;

// =============================================================================
// Handles
// =============================================================================

/// Stable handle of a node in a [`SchemaTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source location of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePos {
    pub file: String,
    pub line: u32,
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

// =============================================================================
// Node Kind
// =============================================================================

/// Statement keyword of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Module,
    Submodule,
    Container,
    List,
    Leaf,
    LeafList,
    Typedef,
    Choice,
    Case,
    Augment,
    Notification,
}

impl NodeKind {
    /// The keyword as written in schema text
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Submodule => "submodule",
            Self::Container => "container",
            Self::List => "list",
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
            Self::Typedef => "typedef",
            Self::Choice => "choice",
            Self::Case => "case",
            Self::Augment => "augment",
            Self::Notification => "notification",
        }
    }

    /// Module or submodule
    pub fn is_module_like(&self) -> bool {
        matches!(self, Self::Module | Self::Submodule)
    }

    /// Choice and case never place anything
    pub fn is_grouping(&self) -> bool {
        matches!(self, Self::Choice | Self::Case)
    }

    /// Kinds that get a class of their own
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Container | Self::List | Self::Notification)
    }

    pub fn is_leafy(&self) -> bool {
        matches!(self, Self::Leaf | Self::LeafList)
    }

    /// Container or notification
    pub fn is_container_like(&self) -> bool {
        matches!(self, Self::Container | Self::Notification)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

// =============================================================================
// Type References
// =============================================================================

/// How a type reference is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeRefKind {
    /// One of the builtin scalar types
    Builtin,
    /// Named typedef; `target` is the typedef node
    Derived,
    /// leafref; `target` is the referenced leaf
    CrossReference,
    Enumeration,
    Union,
    Bits,
}

/// A named bit of a `bits` type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// Restriction substatements attached to a type reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restrictions {
    pub enums: Vec<String>,
    pub bits: Vec<BitDef>,
    /// Member types of a union, in declaration order
    pub members: Vec<TypeRef>,
    pub patterns: Vec<String>,
    pub length: Option<String>,
    pub range: Option<String>,
    pub fraction_digits: Option<u8>,
    /// leafref path as written
    pub path: Option<String>,
    pub require_instance: Option<bool>,
}

impl Restrictions {
    /// Whether values need checking beyond the wrapper's own parsing
    pub fn constrains_values(&self) -> bool {
        !self.enums.is_empty()
            || !self.bits.is_empty()
            || !self.patterns.is_empty()
            || self.length.is_some()
            || self.range.is_some()
    }
}

/// A `type` substatement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Type identifier as written, possibly prefixed (`inet:ipv4-address`)
    pub name: String,
    pub kind: TypeRefKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeId>,
    #[serde(default)]
    pub restrictions: Restrictions,
}

impl TypeRef {
    /// A builtin type; composite kinds are picked from the name
    pub fn builtin(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = match name.as_str() {
            "enumeration" => TypeRefKind::Enumeration,
            "union" => TypeRefKind::Union,
            "bits" => TypeRefKind::Bits,
            _ => TypeRefKind::Builtin,
        };
        Self {
            name,
            kind,
            target: None,
            restrictions: Restrictions::default(),
        }
    }

    /// A reference to a typedef. `target` may be unresolved.
    pub fn derived(name: impl Into<String>, target: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            kind: TypeRefKind::Derived,
            target,
            restrictions: Restrictions::default(),
        }
    }

    pub fn leafref(path: impl Into<String>, target: Option<NodeId>) -> Self {
        Self {
            name: "leafref".to_string(),
            kind: TypeRefKind::CrossReference,
            target,
            restrictions: Restrictions {
                path: Some(path.into()),
                ..Restrictions::default()
            },
        }
    }

    pub fn with_enums<I, S>(mut self, enums: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restrictions.enums = enums.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_bit(mut self, name: impl Into<String>, position: Option<u32>) -> Self {
        self.restrictions.bits.push(BitDef {
            name: name.into(),
            position,
        });
        self
    }

    pub fn with_member(mut self, member: TypeRef) -> Self {
        self.restrictions.members.push(member);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.restrictions.patterns.push(pattern.into());
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.restrictions.range = Some(range.into());
        self
    }

    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.restrictions.length = Some(length.into());
        self
    }

    pub fn with_fraction_digits(mut self, digits: u8) -> Self {
        self.restrictions.fraction_digits = Some(digits);
        self
    }

    /// Identifier without its module prefix
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }
}

// =============================================================================
// Schema Node
// =============================================================================

/// One statement of the schema tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub kind: NodeKind,
    /// Identifier as written in the schema
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeRef>,
    /// List key identifiers, in key order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    /// Explicit `config` statement, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<bool>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Owning module of a submodule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target node of an augment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeId>,
    /// Defining module of a node spliced in by an augment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePos>,
}

impl SchemaNode {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            type_ref: None,
            keys: Vec::new(),
            config: None,
            mandatory: false,
            unique: false,
            default: None,
            namespace: None,
            prefix: None,
            belongs_to: None,
            revision: None,
            description: None,
            target: None,
            origin: None,
            position: None,
        }
    }

    pub fn module(name: impl Into<String>, namespace: impl Into<String>, prefix: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Module, name);
        node.namespace = Some(namespace.into());
        node.prefix = Some(prefix.into());
        node
    }

    pub fn leaf(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self::new(NodeKind::Leaf, name).with_type(type_ref)
    }

    pub fn leaf_list(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self::new(NodeKind::LeafList, name).with_type(type_ref)
    }

    pub fn typedef(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self::new(NodeKind::Typedef, name).with_type(type_ref)
    }

    pub fn with_type(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = Some(type_ref);
        self
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config(mut self, config: bool) -> Self {
        self.config = Some(config);
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.position = Some(SourcePos {
            file: file.into(),
            line,
        });
        self
    }
}

// =============================================================================
// Schema Tree
// =============================================================================

/// Arena holding every node of one or more modules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTree {
    nodes: Vec<SchemaNode>,
}

impl SchemaTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tree from JSON and check its handles
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let tree: Self = serde_json::from_str(json)?;
        tree.validate()?;
        Ok(tree)
    }

    /// Add a parentless node (module, submodule)
    pub fn add_root(&mut self, mut node: SchemaNode) -> NodeId {
        node.parent = None;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Add `node` as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, mut node: SchemaNode) -> NodeId {
        node.parent = Some(parent);
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SchemaNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All handles in arena order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Find a module (not a submodule) by name
    pub fn module_by_name(&self, name: &str) -> Option<NodeId> {
        self.ids()
            .find(|&id| self[id].kind == NodeKind::Module && self[id].name == name)
    }

    /// Submodules that belong to `module_name`, in arena order
    pub fn submodules_of(&self, module_name: &str) -> Vec<NodeId> {
        self.ids()
            .filter(|&id| {
                self[id].kind == NodeKind::Submodule
                    && self[id].belongs_to.as_deref() == Some(module_name)
            })
            .collect()
    }

    /// First direct child with the given kind and identifier
    pub fn find_child(&self, parent: NodeId, kind: NodeKind, name: &str) -> Option<NodeId> {
        self[parent]
            .children
            .iter()
            .copied()
            .find(|&ch| self[ch].kind == kind && self[ch].name == name)
    }

    /// Check that every handle is in range, that parent and child links agree
    /// and that every parent chain ends at a root
    pub fn validate(&self) -> Result<(), SchemaError> {
        let len = self.nodes.len();
        let check = |node: NodeId, field: &'static str, handle: NodeId| {
            if handle.0 < len {
                Ok(())
            } else {
                Err(SchemaError::DanglingHandle {
                    node,
                    field,
                    handle,
                    len,
                })
            }
        };

        for id in self.ids() {
            let node = &self[id];
            if let Some(parent) = node.parent {
                check(id, "parent", parent)?;
            }
            for &child in &node.children {
                check(id, "children", child)?;
                if self[child].parent != Some(id) {
                    return Err(SchemaError::ParentMismatch {
                        parent: id,
                        child,
                        actual: self[child].parent,
                    });
                }
            }
            if let Some(target) = node.type_ref.as_ref().and_then(|t| t.target) {
                check(id, "type target", target)?;
            }
            if let Some(type_ref) = &node.type_ref {
                for member in &type_ref.restrictions.members {
                    if let Some(target) = member.target {
                        check(id, "union member target", target)?;
                    }
                }
            }
            if let Some(target) = node.target {
                check(id, "augment target", target)?;
            }
            if let Some(origin) = node.origin {
                check(id, "origin", origin)?;
            }
        }
        self.check_parent_chains()
    }

    fn check_parent_chains(&self) -> Result<(), SchemaError> {
        // 0 = unvisited, 1 = on the current walk, 2 = reaches a root
        let mut state = vec![0u8; self.nodes.len()];
        for start in self.ids() {
            let mut walk = Vec::new();
            let mut current = Some(start);
            while let Some(id) = current {
                match state[id.0] {
                    2 => break,
                    1 => return Err(SchemaError::ParentCycle { node: id }),
                    _ => {}
                }
                state[id.0] = 1;
                walk.push(id);
                current = self[id].parent;
            }
            for id in walk {
                state[id.0] = 2;
            }
        }
        Ok(())
    }
}

impl Index<NodeId> for SchemaTree {
    type Output = SchemaNode;

    fn index(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for SchemaTree {
    fn index_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.0]
    }
}
