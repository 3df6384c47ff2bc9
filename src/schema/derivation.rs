//! Typedef Derivation Graph
//!
//! Typedefs form a graph through their `type` statements (and through the
//! member types of unions). Input trees are expected to be acyclic, but a
//! cycle must not hang the resolver, so cycles are found once up front with
//! an SCC pass and reported.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use super::{NodeId, NodeKind, SchemaTree, TypeRef, TypeRefKind};
use crate::diagnostics::Diagnostics;

/// Typedef nodes as graph vertices, derivation links as edges
pub struct DerivationGraph {
    graph: DiGraph<NodeId, ()>,
    index: HashMap<NodeId, NodeIndex>,
}

impl DerivationGraph {
    /// Build the graph over every typedef in the arena
    pub fn build(tree: &SchemaTree) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        for id in tree.ids().filter(|&id| tree[id].kind == NodeKind::Typedef) {
            index.insert(id, graph.add_node(id));
        }

        for (&from, &from_idx) in &index {
            let Some(type_ref) = &tree[from].type_ref else {
                continue;
            };
            let mut targets = Vec::new();
            collect_targets(type_ref, &mut targets);
            for target in targets {
                if let Some(&to_idx) = index.get(&target) {
                    graph.add_edge(from_idx, to_idx, ());
                }
            }
        }

        Self { graph, index }
    }

    pub fn typedef_count(&self) -> usize {
        self.index.len()
    }

    /// Every group of typedefs that derive from each other, including self-loops
    pub fn cycles(&self) -> Vec<Vec<NodeId>> {
        let mut cycles: Vec<Vec<NodeId>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut members: Vec<NodeId> = scc.into_iter().map(|idx| self.graph[idx]).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }
}

fn collect_targets(type_ref: &TypeRef, out: &mut Vec<NodeId>) {
    if type_ref.kind == TypeRefKind::Derived {
        if let Some(target) = type_ref.target {
            out.push(target);
        }
    }
    for member in &type_ref.restrictions.members {
        collect_targets(member, out);
    }
}

/// Find typedef cycles and push one diagnostic per cycle
pub fn report_cycles(tree: &SchemaTree, diagnostics: &mut Diagnostics) -> usize {
    let cycles = DerivationGraph::build(tree).cycles();
    for cycle in &cycles {
        let names: Vec<String> = cycle.iter().map(|&id| tree[id].name.clone()).collect();
        diagnostics.derivation_cycle(&names);
    }
    cycles.len()
}
