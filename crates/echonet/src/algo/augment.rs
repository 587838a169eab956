use super::crosses_any;
use super::spanning::Candidate;
use crate::config::AugmentConfig;
use crate::geom::{angle_degrees, distance_point_to_segment};
use crate::graph::{Edge, Graph, NodeId};

/// Why a candidate pair was turned down. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Connected,
    DegreeCap,
    Crossing,
    Clearance,
    Angle,
}

fn passes_near_third_node(graph: &Graph, a: NodeId, b: NodeId, clearance: f64) -> bool {
    let (pa, pb) = (graph.pos(a), graph.pos(b));
    graph
        .nodes()
        .filter(|n| n.id() != a && n.id() != b)
        .any(|n| distance_point_to_segment(n.pos, pa, pb) < clearance)
}

fn makes_narrow_angle(graph: &Graph, a: NodeId, b: NodeId, min_angle_deg: f64) -> bool {
    [(a, b), (b, a)].into_iter().any(|(vertex, other)| {
        let v = graph.pos(vertex);
        let o = graph.pos(other);
        graph
            .neighbors(vertex)
            .iter()
            .any(|&nb| angle_degrees(v, graph.pos(nb), o) < min_angle_deg)
    })
}

/// Checks a candidate pair against the current graph and running edge list.
pub fn check_candidate(
    graph: &Graph,
    edges: &[Edge],
    a: NodeId,
    b: NodeId,
    config: &AugmentConfig,
) -> Result<(), Rejection> {
    if graph.degree(a) >= config.max_degree || graph.degree(b) >= config.max_degree {
        return Err(Rejection::DegreeCap);
    }
    if graph.has_edge(a, b) {
        return Err(Rejection::Connected);
    }
    if crosses_any(graph, edges, a, b, None) {
        return Err(Rejection::Crossing);
    }
    if passes_near_third_node(graph, a, b, config.clearance) {
        return Err(Rejection::Clearance);
    }
    if makes_narrow_angle(graph, a, b, config.min_angle_deg) {
        return Err(Rejection::Angle);
    }
    Ok(())
}

/// Greedily adds extra edges in candidate order. Accepted edges immediately constrain the
/// candidates after them; nothing is revisited. Returns the number of edges added.
pub fn augment_edges(graph: &mut Graph, candidates: &[Candidate], config: &AugmentConfig) -> usize {
    let mut edges = graph.edges();
    let mut added = 0;
    for c in candidates {
        match check_candidate(graph, &edges, c.a, c.b, config) {
            Ok(()) => {
                graph.connect(c.a, c.b);
                edges.push(Edge::new(c.a, c.b));
                added += 1;
            }
            Err(reason) => {
                tracing::trace!(a = c.a.index(), b = c.b.index(), ?reason, "candidate rejected");
            }
        }
    }
    tracing::debug!(added, total = edges.len(), "augmentation done");
    added
}
