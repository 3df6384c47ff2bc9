//! Path Resolution
//!
//! Places nodes in packages. Choice and case never contribute a package
//! segment, and a submodule is replaced by the module it belongs to, so two
//! siblings under the same structural parent always land in the same package.
//! Every import emitted for a sibling class goes through [`resolve_package`].

use std::collections::{HashSet, VecDeque};

use crate::schema::{NodeId, NodeKind, SchemaTree};
use crate::session::Session;

/// Kinds that get a class of their own
pub const ELEMENT_KINDS: &[NodeKind] = &[NodeKind::Container, NodeKind::List, NodeKind::Notification];

/// Kinds that contribute members to their parent's class
pub const LEAF_KINDS: &[NodeKind] = &[NodeKind::Leaf, NodeKind::LeafList];

/// Every data-bearing kind
pub const DATA_KINDS: &[NodeKind] = &[
    NodeKind::Container,
    NodeKind::List,
    NodeKind::Notification,
    NodeKind::Leaf,
    NodeKind::LeafList,
];

/// The module a submodule belongs to, if it is in the tree
pub fn owning_module(tree: &SchemaTree, submodule: NodeId) -> Option<NodeId> {
    tree[submodule]
        .belongs_to
        .as_deref()
        .and_then(|name| tree.module_by_name(name))
}

/// Nearest structurally significant ancestor.
///
/// Choice and case are skipped; a submodule parent resolves to its owning
/// module; a parent without a parent of its own is returned as-is.
pub fn resolve_parent(tree: &SchemaTree, id: NodeId) -> Option<NodeId> {
    let mut current = id;
    loop {
        let parent = tree[current].parent?;
        let node = &tree[parent];
        if node.kind == NodeKind::Submodule {
            return Some(owning_module(tree, parent).unwrap_or(parent));
        }
        if node.parent.is_none() || !node.kind.is_grouping() {
            return Some(parent);
        }
        current = parent;
    }
}

/// The module that defines `id`.
///
/// An `origin` on the node or any ancestor wins, so nodes spliced in by an
/// augment belong to the augmenting module.
pub fn resolve_module(tree: &SchemaTree, id: NodeId) -> NodeId {
    let mut current = id;
    loop {
        let node = &tree[current];
        if let Some(origin) = node.origin {
            return match tree[origin].kind {
                NodeKind::Submodule => owning_module(tree, origin).unwrap_or(origin),
                _ => origin,
            };
        }
        match node.kind {
            NodeKind::Module => return current,
            NodeKind::Submodule => return owning_module(tree, current).unwrap_or(current),
            _ => {}
        }
        match node.parent {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

/// Package of the root class and of module-scope typedef classes
pub fn module_package(tree: &SchemaTree, module: NodeId, session: &mut Session) -> String {
    let camel = session.camelize(&tree[module].name);
    session.config.module_package(&camel)
}

/// Package of the class generated for `id`
pub fn resolve_package(tree: &SchemaTree, id: NodeId, session: &mut Session) -> String {
    let mut segments = VecDeque::new();
    let mut parent = resolve_parent(tree, id);
    while let Some(p) = parent {
        segments.push_front(session.camelize(&tree[p].name));
        parent = resolve_parent(tree, p);
    }

    let root = &session.config.output.root_package;
    std::iter::once(root.as_str())
        .chain(segments.iter().map(String::as_str))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Whether `id` is configuration data.
///
/// Nothing inside a notification is; otherwise the nearest explicit `config`
/// on the node or an ancestor decides, defaulting to `true`.
pub fn is_config(tree: &SchemaTree, id: NodeId) -> bool {
    let mut explicit = None;
    let mut current = Some(id);
    while let Some(n) = current {
        let node = &tree[n];
        if node.kind == NodeKind::Notification {
            return false;
        }
        if explicit.is_none() {
            explicit = node.config;
        }
        current = node.parent;
    }
    explicit.unwrap_or(true)
}

/// Children of `id` whose kind is in `kinds`, with choice and case flattened.
///
/// A module also yields the children of its submodules. Entries are
/// deduplicated by kind and camelized identifier, first one wins.
pub fn data_children(tree: &SchemaTree, id: NodeId, kinds: &[NodeKind], session: &mut Session) -> Vec<NodeId> {
    let mut sources: Vec<NodeId> = vec![id];
    if tree[id].kind == NodeKind::Module {
        sources.extend(tree.submodules_of(&tree[id].name));
    }

    let bypass = !kinds.iter().any(NodeKind::is_grouping);
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for source in sources {
        collect(tree, source, kinds, bypass, session, &mut seen, &mut out);
    }
    out
}

fn collect(
    tree: &SchemaTree,
    id: NodeId,
    kinds: &[NodeKind],
    bypass: bool,
    session: &mut Session,
    seen: &mut HashSet<(NodeKind, String)>,
    out: &mut Vec<NodeId>,
) {
    for &child in &tree[id].children {
        let node = &tree[child];
        if bypass && node.kind.is_grouping() {
            collect(tree, child, kinds, bypass, session, seen, out);
            continue;
        }
        if !kinds.contains(&node.kind) {
            continue;
        }
        if seen.insert((node.kind, session.camelize(&node.name))) {
            out.push(child);
        }
    }
}

/// Slash-joined identifiers of the structural ancestors and the node itself
pub fn schema_path(tree: &SchemaTree, id: NodeId) -> String {
    let mut parts = VecDeque::new();
    parts.push_front(tree[id].name.as_str());
    let mut parent = resolve_parent(tree, id);
    while let Some(p) = parent {
        parts.push_front(tree[p].name.as_str());
        parent = resolve_parent(tree, p);
    }
    format!("/{}", parts.into_iter().collect::<Vec<_>>().join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaNode, TypeRef};

    fn container(name: &str) -> SchemaNode {
        SchemaNode::new(NodeKind::Container, name)
    }

    #[test]
    fn test_top_level_package_is_module_package() {
        let mut session = Session::default();
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("my-mod", "urn:m", "m"));
        let top = tree.add_child(m, container("top"));
        let t = tree.add_child(m, SchemaNode::typedef("t", TypeRef::builtin("string")));

        assert_eq!(resolve_package(&tree, top, &mut session), "gen.myMod");
        assert_eq!(resolve_package(&tree, t, &mut session), "gen.myMod");
        assert_eq!(module_package(&tree, m, &mut session), "gen.myMod");
        assert_eq!(resolve_package(&tree, m, &mut session), "gen");
    }

    #[test]
    fn test_choice_and_case_are_transparent() {
        let mut session = Session::default();

        let mut with_choice = SchemaTree::new();
        let m = with_choice.add_root(SchemaNode::module("m", "urn:m", "m"));
        let top = with_choice.add_child(m, container("top"));
        let choice = with_choice.add_child(top, SchemaNode::new(NodeKind::Choice, "how"));
        let case = with_choice.add_child(choice, SchemaNode::new(NodeKind::Case, "fast"));
        let inner = with_choice.add_child(case, container("inner"));
        let deep = with_choice.add_child(inner, SchemaNode::leaf("speed", TypeRef::builtin("uint8")));

        let mut plain = SchemaTree::new();
        let m2 = plain.add_root(SchemaNode::module("m", "urn:m", "m"));
        let top2 = plain.add_child(m2, container("top"));
        let inner2 = plain.add_child(top2, container("inner"));
        let direct = plain.add_child(inner2, SchemaNode::leaf("speed", TypeRef::builtin("uint8")));

        assert_eq!(resolve_parent(&with_choice, inner), Some(top));
        assert_eq!(
            resolve_package(&with_choice, deep, &mut session),
            resolve_package(&plain, direct, &mut session)
        );
        assert_eq!(resolve_package(&plain, direct, &mut session), "gen.m.top.inner");
        assert_eq!(data_children(&with_choice, top, DATA_KINDS, &mut session), vec![inner]);
        assert_eq!(schema_path(&with_choice, deep), "/m/top/inner/speed");
    }

    #[test]
    fn test_submodule_resolves_to_owner() {
        let mut session = Session::default();
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "m"));
        let own = tree.add_child(m, container("a"));
        let mut sub = SchemaNode::new(NodeKind::Submodule, "m-sub");
        sub.belongs_to = Some("m".to_string());
        let sub = tree.add_root(sub);
        let b = tree.add_child(sub, container("b"));

        assert_eq!(resolve_parent(&tree, b), Some(m));
        assert_eq!(resolve_module(&tree, b), m);
        assert_eq!(resolve_package(&tree, b, &mut session), "gen.m");
        assert_eq!(data_children(&tree, m, ELEMENT_KINDS, &mut session), vec![own, b]);
    }

    #[test]
    fn test_origin_overrides_module() {
        let mut tree = SchemaTree::new();
        let target = tree.add_root(SchemaNode::module("base", "urn:base", "b"));
        let augmenting = tree.add_root(SchemaNode::module("ext", "urn:ext", "e"));
        let top = tree.add_child(target, container("top"));
        let mut spliced = container("extra");
        spliced.origin = Some(augmenting);
        let spliced = tree.add_child(top, spliced);
        let leaf = tree.add_child(spliced, SchemaNode::leaf("x", TypeRef::builtin("string")));

        assert_eq!(resolve_module(&tree, top), target);
        assert_eq!(resolve_module(&tree, spliced), augmenting);
        assert_eq!(resolve_module(&tree, leaf), augmenting);
    }

    #[test]
    fn test_is_config() {
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "m"));
        let state = tree.add_child(m, container("state").with_config(false));
        let counters = tree.add_child(state, container("counters"));
        let cfg = tree.add_child(m, container("cfg"));
        let notif = tree.add_child(m, SchemaNode::new(NodeKind::Notification, "alarm"));
        let inner = tree.add_child(notif, container("detail").with_config(true));

        assert!(!is_config(&tree, counters));
        assert!(is_config(&tree, cfg));
        assert!(!is_config(&tree, inner));
    }

    #[test]
    fn test_data_children_dedup_by_camelized_name() {
        let mut session = Session::default();
        let mut tree = SchemaTree::new();
        let m = tree.add_root(SchemaNode::module("m", "urn:m", "m"));
        let top = tree.add_child(m, container("top"));
        let first = tree.add_child(top, SchemaNode::leaf("if-name", TypeRef::builtin("string")));
        tree.add_child(top, SchemaNode::leaf("ifName", TypeRef::builtin("string")));
        let list = tree.add_child(top, SchemaNode::new(NodeKind::List, "ifName"));

        assert_eq!(data_children(&tree, top, DATA_KINDS, &mut session), vec![first, list]);
    }
}
