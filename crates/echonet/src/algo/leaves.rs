use super::crosses_any;
use crate::graph::{Graph, NodeId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeafStats {
    /// Full passes over the leaf set.
    pub passes: usize,
    /// Second connections made.
    pub attached: usize,
    /// Degree-1 nodes left afterwards.
    pub remaining: usize,
}

pub fn leaves(graph: &Graph) -> Vec<NodeId> {
    graph.ids().filter(|&id| graph.degree(id) == 1).collect()
}

fn nearest_partner(graph: &Graph, leaf: NodeId, max_degree: usize) -> Option<NodeId> {
    let current = graph.neighbors(leaf)[0];
    let edges = graph.edges();
    let origin = graph.pos(leaf);
    graph
        .ids()
        .filter(|&n| n != leaf && n != current && graph.degree(n) < max_degree)
        .filter(|&n| !crosses_any(graph, &edges, leaf, n, None))
        .min_by(|&x, &y| {
            origin
                .distance_to(graph.pos(x))
                .total_cmp(&origin.distance_to(graph.pos(y)))
        })
}

/// Gives degree-1 nodes a second, non-crossing edge to their nearest available node.
///
/// Passes repeat until there are no leaves, a pass connects nothing, or `max_passes` is hit.
/// Leaves without a valid partner stay leaves.
pub fn attach_leaves(graph: &mut Graph, max_degree: usize, max_passes: usize) -> LeafStats {
    let mut stats = LeafStats::default();

    while stats.passes < max_passes {
        let current = leaves(graph);
        if current.is_empty() {
            break;
        }
        stats.passes += 1;

        let mut attached_this_pass = 0;
        for leaf in current {
            // An earlier leaf in this pass may already have linked to this one.
            if graph.degree(leaf) != 1 || max_degree < 2 {
                continue;
            }
            if let Some(partner) = nearest_partner(graph, leaf, max_degree) {
                graph.connect(leaf, partner);
                attached_this_pass += 1;
            }
        }
        stats.attached += attached_this_pass;
        if attached_this_pass == 0 {
            break;
        }
    }

    stats.remaining = leaves(graph).len();
    if stats.remaining > 0 {
        tracing::debug!(remaining = stats.remaining, "leaves without a second connection");
    }
    tracing::debug!(
        passes = stats.passes,
        attached = stats.attached,
        "leaf attachment done"
    );
    stats
}
