//! Referential-integrity and acyclicity validation of the built graph.
//!
//! Requires/Before edges are normalized into a single "realized before"
//! direction and checked for cycles with a DFS coloring over a `petgraph`
//! directed graph. Notifies/SubscribesTo edges carry refresh semantics only
//! and do not participate in the ordering relation.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use katello_common::error::{KatelloError, Result};
use katello_common::types::{Edge, EdgeKind, NodeRef};
use petgraph::graph::NodeIndex;

use crate::builder::ResourceNode;
use crate::external::ExternalRegistry;

/// Validates the built catalog graph.
///
/// Every edge endpoint must be a built node or a registered external
/// identity, and the ordering relation over Requires/Before edges must be
/// acyclic. Both failures indicate a bug in catalog construction rather
/// than a caller input problem.
///
/// # Errors
///
/// Returns [`KatelloError::DanglingReference`] for an endpoint that is
/// neither built nor registered, and [`KatelloError::CycleDetected`] with
/// the ordered node identities of the cycle.
pub fn validate(
    nodes: &[ResourceNode],
    edges: &[Edge],
    registry: &ExternalRegistry,
) -> Result<()> {
    tracing::debug!(nodes = nodes.len(), edges = edges.len(), "validating catalog graph");
    check_references(nodes, edges, registry)?;
    check_acyclic(edges)
}

fn check_references(
    nodes: &[ResourceNode],
    edges: &[Edge],
    registry: &ExternalRegistry,
) -> Result<()> {
    let built: BTreeSet<_> = nodes.iter().map(|n| &n.id).collect();

    for edge in edges {
        for endpoint in [&edge.from, &edge.to] {
            let declared = match endpoint {
                NodeRef::Resource(id) => built.contains(id),
                NodeRef::External(id) => registry.contains(id),
            };
            if !declared {
                return Err(KatelloError::DanglingReference {
                    edge: edge.to_string(),
                    node: endpoint.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_acyclic(edges: &[Edge]) -> Result<()> {
    let mut graph = petgraph::Graph::<String, ()>::new();
    let mut indices = BTreeMap::<String, NodeIndex>::new();

    let mut index_of = |graph: &mut petgraph::Graph<String, ()>, node: &NodeRef| {
        let key = node.to_string();
        *indices
            .entry(key.clone())
            .or_insert_with(|| graph.add_node(key))
    };

    for edge in edges {
        // Normalize to "realized before": Requires(a, b) means b before a,
        // Before(a, b) means a before b.
        let (first, second) = match edge.kind {
            EdgeKind::Requires => (&edge.to, &edge.from),
            EdgeKind::Before => (&edge.from, &edge.to),
            EdgeKind::Notifies | EdgeKind::SubscribesTo => continue,
        };
        let from = index_of(&mut graph, first);
        let to = index_of(&mut graph, second);
        let _ = graph.add_edge(from, to, ());
    }

    match find_cycle(&graph) {
        Some(path) => Err(KatelloError::CycleDetected { path }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Grey,
    Black,
}

fn find_cycle(graph: &petgraph::Graph<String, ()>) -> Option<Vec<String>> {
    let mut marks = vec![Mark::White; graph.node_count()];
    let mut stack = Vec::new();

    for start in graph.node_indices() {
        if marks[start.index()] == Mark::White {
            if let Some(path) = dfs(graph, start, &mut marks, &mut stack) {
                return Some(path);
            }
        }
    }
    None
}

fn dfs(
    graph: &petgraph::Graph<String, ()>,
    node: NodeIndex,
    marks: &mut [Mark],
    stack: &mut Vec<NodeIndex>,
) -> Option<Vec<String>> {
    marks[node.index()] = Mark::Grey;
    stack.push(node);

    for next in graph.neighbors(node) {
        match marks[next.index()] {
            Mark::Black => {}
            Mark::Grey => {
                // Grey nodes are always on the stack.
                let pos = stack.iter().position(|&n| n == next).unwrap_or(0);
                let mut path: Vec<String> =
                    stack[pos..].iter().map(|&n| graph[n].clone()).collect();
                path.push(graph[next].clone());
                return Some(path);
            }
            Mark::White => {
                if let Some(path) = dfs(graph, next, marks, stack) {
                    return Some(path);
                }
            }
        }
    }

    let _ = stack.pop();
    marks[node.index()] = Mark::Black;
    None
}
