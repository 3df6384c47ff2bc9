//! Tree Metadata
//!
//! Tagpath, namespace and occurrence bounds of the module root and every data
//! node below it, consumed by the runtime for path-based lookups. Tagpaths use
//! the identifiers as written; only the child lists are camelized.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codegen::paths::{data_children, resolve_module, resolve_parent, DATA_KINDS};
use crate::codegen::synth::is_key;
use crate::schema::{NodeId, NodeKind, SchemaTree};
use crate::session::Session;

// =============================================================================
// Occurrence Bounds
// =============================================================================

/// Occurrence bounds that can only ever be tightened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    min: u32,
    /// `None` is unbounded
    max: Option<u32>,
}

impl Default for Occurs {
    fn default() -> Self {
        Self { min: 0, max: None }
    }
}

impl Occurs {
    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }

    /// Raise the lower bound to at least 1
    pub fn require(&mut self) {
        self.min = self.min.max(1);
    }

    /// Lower the upper bound to at most 1
    pub fn single(&mut self) {
        self.max = Some(self.max.map_or(1, |max| max.min(1)));
    }

    /// Exactly once
    pub fn exactly_one(&mut self) {
        self.require();
        self.single();
    }
}

/// Occurrence bounds of `id`, applying the rules in order
pub fn occurs(tree: &SchemaTree, id: NodeId) -> Occurs {
    let node = &tree[id];
    let parent_kind = resolve_parent(tree, id).map(|p| tree[p].kind);
    let mut occurs = Occurs::default();

    let structural_parent = matches!(
        parent_kind,
        Some(NodeKind::Module | NodeKind::Submodule | NodeKind::Container | NodeKind::List | NodeKind::Notification)
    );
    let singleton_container = matches!(node.kind, NodeKind::Container | NodeKind::Notification) && structural_parent;
    if is_key(tree, id) || node.kind.is_module_like() || singleton_container {
        occurs.exactly_one();
    }

    let contained = matches!(
        parent_kind,
        Some(NodeKind::Container | NodeKind::List | NodeKind::Notification)
    );
    let non_repeating = matches!(
        node.kind,
        NodeKind::Leaf | NodeKind::Container | NodeKind::Notification
    );
    if node.unique || (non_repeating && contained) {
        occurs.single();
    }

    if node.mandatory {
        occurs.require();
    }
    occurs
}

// =============================================================================
// Metadata Nodes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataNode {
    pub tagpath: String,
    pub namespace: String,
    pub min_occurs: u32,
    /// `None` is unbounded
    pub max_occurs: Option<u32>,
    /// Camelized identifiers of the data children, in order
    pub children: Vec<String>,
}

/// Metadata for `module` and every data node below it, in pre-order
pub fn emit(tree: &SchemaTree, module: NodeId, session: &mut Session) -> Vec<MetadataNode> {
    let mut out = Vec::new();
    visit(tree, module, "/".to_string(), session, &mut out);
    out
}

fn visit(tree: &SchemaTree, id: NodeId, tagpath: String, session: &mut Session, out: &mut Vec<MetadataNode>) {
    let children = data_children(tree, id, DATA_KINDS, session);
    let namespace = tree[resolve_module(tree, id)].namespace.clone().unwrap_or_default();
    let bounds = occurs(tree, id);

    debug!(tagpath = %tagpath, min = bounds.min(), max = ?bounds.max(), "Metadata node");
    out.push(MetadataNode {
        tagpath: tagpath.clone(),
        namespace,
        min_occurs: bounds.min(),
        max_occurs: bounds.max(),
        children: children.iter().map(|&c| session.camelize(&tree[c].name)).collect(),
    });

    for child in children {
        let child_path = format!("{}{}/", tagpath, tree[child].name);
        visit(tree, child, child_path, session, out);
    }
}
