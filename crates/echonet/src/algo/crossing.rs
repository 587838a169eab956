use super::crosses_any;
use crate::config::RepairConfig;
use crate::geom::segments_intersect;
use crate::graph::{Edge, Graph, NodeId};
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Edges crossing repair must never remove.
pub type ProtectedEdges = FxHashSet<Edge>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrossingStats {
    /// Loop iterations that modified the graph.
    pub iterations: usize,
    /// Edges removed for good.
    pub removed: usize,
    /// Removals whose freed endpoint was connected to a new neighbor.
    pub rerouted: usize,
    /// Removals rolled back because they would have split the graph.
    pub restored: usize,
    /// Crossings still present when the loop stopped.
    pub unresolved: usize,
    /// The iteration budget ran out while a fixable crossing remained.
    pub exhausted: bool,
}

fn edges_cross(graph: &Graph, e1: Edge, e2: Edge) -> bool {
    if e1.shares_endpoint(&e2) {
        return false;
    }
    let (p1, p2) = graph.segment(e1);
    let (p3, p4) = graph.segment(e2);
    segments_intersect(p1, p2, p3, p4)
}

/// Every crossing edge pair, in edge enumeration order.
pub fn crossing_pairs(graph: &Graph) -> Vec<(Edge, Edge)> {
    let edges = graph.edges();
    let mut out = Vec::new();
    for (i, &e1) in edges.iter().enumerate() {
        for &e2 in &edges[i + 1..] {
            if edges_cross(graph, e1, e2) {
                out.push((e1, e2));
            }
        }
    }
    out
}

/// First crossing pair in which at least one edge may be removed.
pub fn find_crossing(
    graph: &Graph,
    edges: &[Edge],
    protected: &ProtectedEdges,
) -> Option<(Edge, Edge)> {
    for (i, &e1) in edges.iter().enumerate() {
        for &e2 in &edges[i + 1..] {
            if protected.contains(&e1) && protected.contains(&e2) {
                continue;
            }
            if edges_cross(graph, e1, e2) {
                return Some((e1, e2));
            }
        }
    }
    None
}

/// Nearest node `from` can link to without crossing `edges` (minus `removed`).
fn reroute_target(
    graph: &Graph,
    edges: &[Edge],
    from: NodeId,
    removed: Edge,
    max_degree: usize,
) -> Option<NodeId> {
    if graph.degree(from) >= max_degree {
        return None;
    }
    let origin = graph.pos(from);
    let mut candidates: Vec<(NodeId, f64)> = graph
        .ids()
        .filter(|&n| n != from && !graph.has_edge(from, n) && graph.degree(n) < max_degree)
        .map(|n| (n, origin.distance_to(graph.pos(n))))
        .collect();
    candidates.sort_by(|x, y| x.1.total_cmp(&y.1));
    candidates
        .into_iter()
        .map(|(n, _)| n)
        .find(|&n| !crosses_any(graph, edges, from, n, Some(removed)))
}

/// Removes crossings one at a time until none remain or the budget is spent.
///
/// For each crossing pair one removable edge is dropped (a coin flip when both are), and its
/// lower-id endpoint is linked to the nearest node that takes the new edge without crossing.
/// If dropping the edge would leave its endpoints disconnected the change is undone and the
/// edge joins `protected`, so the repair never splits the graph.
pub fn repair_crossings<R: Rng + ?Sized>(
    graph: &mut Graph,
    config: &RepairConfig,
    max_degree: usize,
    protected: &mut ProtectedEdges,
    rng: &mut R,
) -> CrossingStats {
    let mut stats = CrossingStats::default();

    while stats.iterations < config.max_iterations {
        let edges = graph.edges();
        let Some((first, second)) = find_crossing(graph, &edges, protected) else {
            break;
        };
        stats.iterations += 1;

        let removed = match (protected.contains(&first), protected.contains(&second)) {
            (false, false) => {
                if rng.random::<f64>() < 0.5 {
                    first
                } else {
                    second
                }
            }
            (false, true) => first,
            _ => second,
        };
        let (from, to) = (removed.a, removed.b);
        graph.disconnect(from, to);

        let target = reroute_target(graph, &edges, from, removed, max_degree);
        if let Some(t) = target {
            graph.connect(from, t);
        }

        if !graph.path_exists(from, to) {
            if let Some(t) = target {
                graph.disconnect(from, t);
            }
            graph.connect(from, to);
            protected.insert(removed);
            stats.restored += 1;
            tracing::debug!(
                a = graph.node(from).name(),
                b = graph.node(to).name(),
                "crossing edge is a bridge; kept and protected"
            );
            continue;
        }

        stats.removed += 1;
        if target.is_some() {
            stats.rerouted += 1;
        }
    }

    let edges = graph.edges();
    stats.exhausted = stats.iterations >= config.max_iterations
        && find_crossing(graph, &edges, protected).is_some();
    stats.unresolved = crossing_pairs(graph).len();

    if stats.exhausted {
        tracing::warn!(
            iterations = stats.iterations,
            "crossing repair ran out of iterations"
        );
    }
    if stats.unresolved > 0 {
        tracing::warn!(crossings = stats.unresolved, "crossings left unresolved");
    }
    tracing::debug!(
        iterations = stats.iterations,
        removed = stats.removed,
        rerouted = stats.rerouted,
        restored = stats.restored,
        "crossing repair done"
    );
    stats
}
