//! Post-hoc invariant report.
//!
//! Generation is best effort, so a finished map can still carry a few geometric violations.
//! [`audit`] lists them by node name; it never changes the graph.

use crate::algo::crossing::crossing_pairs;
use crate::config::GeneratorConfig;
use crate::geom::{angle_degrees, distance, distance_point_to_segment};
use crate::graph::{Edge, Graph};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClearanceViolation {
    pub edge: [String; 2],
    pub node: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrowAngle {
    pub vertex: String,
    pub arms: [String; 2],
    pub degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdedPair {
    pub nodes: [String; 2],
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Audit {
    pub nodes: usize,
    pub edges: usize,
    pub connected: bool,
    pub unreachable: Vec<String>,
    pub over_degree: Vec<String>,
    pub leaves: Vec<String>,
    pub crossings: Vec<[[String; 2]; 2]>,
    pub clearance_violations: Vec<ClearanceViolation>,
    pub narrow_angles: Vec<NarrowAngle>,
    pub crowded_pairs: Vec<CrowdedPair>,
}

impl Audit {
    /// True when the hard invariants hold: connectivity, degree cap, and no crossings.
    pub fn is_sound(&self) -> bool {
        self.connected && self.over_degree.is_empty() && self.crossings.is_empty()
    }

    /// True when additionally no clearance or angle constraint is violated.
    pub fn is_clean(&self) -> bool {
        self.is_sound() && self.clearance_violations.is_empty() && self.narrow_angles.is_empty()
    }
}

fn edge_names(graph: &Graph, e: Edge) -> [String; 2] {
    [
        graph.node(e.a).name().to_string(),
        graph.node(e.b).name().to_string(),
    ]
}

pub fn audit(graph: &Graph, config: &GeneratorConfig) -> Audit {
    let edges = graph.edges();
    let name = |id| graph.node(id).name().to_string();

    let reach = match graph.hub().or_else(|| graph.ids().next()) {
        Some(start) => graph.reachable_from(start),
        None => Vec::new(),
    };
    let unreachable: Vec<String> = graph.ids().filter(|id| !reach[id.index()]).map(name).collect();

    let over_degree = graph
        .ids()
        .filter(|&id| graph.degree(id) > config.augment.max_degree)
        .map(name)
        .collect();
    let leaves = graph
        .ids()
        .filter(|&id| graph.degree(id) == 1)
        .map(name)
        .collect();

    let crossings = crossing_pairs(graph)
        .into_iter()
        .map(|(e1, e2)| [edge_names(graph, e1), edge_names(graph, e2)])
        .collect();

    let mut clearance_violations = Vec::new();
    for &e in &edges {
        let (pa, pb) = graph.segment(e);
        for node in graph.nodes().filter(|n| !e.touches(n.id())) {
            let d = distance_point_to_segment(node.pos, pa, pb);
            if d < config.augment.clearance {
                clearance_violations.push(ClearanceViolation {
                    edge: edge_names(graph, e),
                    node: node.name().to_string(),
                    distance: d,
                });
            }
        }
    }

    let mut narrow_angles = Vec::new();
    for node in graph.nodes() {
        let nbs = node.neighbors();
        for (i, &x) in nbs.iter().enumerate() {
            for &y in &nbs[i + 1..] {
                let degrees = angle_degrees(node.pos, graph.pos(x), graph.pos(y));
                if degrees < config.augment.min_angle_deg {
                    narrow_angles.push(NarrowAngle {
                        vertex: node.name().to_string(),
                        arms: [name(x), name(y)],
                        degrees,
                    });
                }
            }
        }
    }

    let mut crowded_pairs = Vec::new();
    let all: Vec<_> = graph.nodes().collect();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            let d = distance(a.pos, b.pos);
            if d < config.placement.min_separation {
                crowded_pairs.push(CrowdedPair {
                    nodes: [a.name().to_string(), b.name().to_string()],
                    distance: d,
                });
            }
        }
    }

    Audit {
        nodes: graph.len(),
        edges: edges.len(),
        connected: unreachable.is_empty(),
        unreachable,
        over_degree,
        leaves,
        crossings,
        clearance_violations,
        narrow_angles,
        crowded_pairs,
    }
}
