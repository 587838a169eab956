//! Generation stages, in pipeline order:
//! [`placement`], [`spanning`], [`augment`], [`relax`], [`crossing`], [`leaves`], [`roles`].
//!
//! Each stage mutates the shared [`Graph`] in place and reports what it did.

pub mod augment;
pub mod crossing;
pub mod leaves;
pub mod placement;
pub mod relax;
pub mod roles;
pub mod spanning;

use crate::geom::segments_intersect;
use crate::graph::{Edge, Graph, NodeId};

/// True when segment `a-b` crosses any of `edges`. Edges sharing an endpoint with `a-b` are
/// skipped, as is `ignore`.
pub(crate) fn crosses_any(
    graph: &Graph,
    edges: &[Edge],
    a: NodeId,
    b: NodeId,
    ignore: Option<Edge>,
) -> bool {
    let candidate = Edge::new(a, b);
    let (pa, pb) = (graph.pos(a), graph.pos(b));
    edges.iter().any(|e| {
        if Some(*e) == ignore || e.shares_endpoint(&candidate) {
            return false;
        }
        let (p3, p4) = graph.segment(*e);
        segments_intersect(pa, pb, p3, p4)
    })
}
