use crate::config::PlacementConfig;
use crate::geom::{Point, distance};
use crate::graph::{Graph, NodeId, NodeKind};
use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;

pub const HUB_NAME: &str = "hub";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementStats {
    /// Non-hub nodes placed.
    pub placed: usize,
    /// Nodes accepted without meeting the minimum separation.
    pub fallbacks: usize,
}

/// Number of non-hub nodes to scatter: the fixed override, or a uniform draw from
/// `min_nodes..=max_nodes`.
pub fn random_node_count<R: Rng + ?Sized>(config: &PlacementConfig, rng: &mut R) -> usize {
    match config.node_count {
        Some(n) => n,
        None => rng.random_range(config.min_nodes..=config.max_nodes),
    }
}

fn sample_point<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    margin: f64,
    rng: &mut R,
) -> Point {
    let x = rng.random::<f64>() * (width - 2.0 * margin) + margin;
    let y = rng.random::<f64>() * (height - 2.0 * margin) + margin;
    Point::new(x, y)
}

fn roll_state<R: Rng + ?Sized>(graph: &mut Graph, id: NodeId, rng: &mut R) {
    let state = &mut graph.node_mut(id).state;
    state.resistance = rng.random_range(10..=50);
    state.random_phase = rng.random::<f64>() * TAU;
}

/// Scatters the hub and `count` data nodes inside the canvas.
///
/// Each data node gets up to `max_tries` samples to land at least `min_separation` away
/// from every node placed so far; after that the last sample is kept anyway.
pub fn place_nodes<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    count: usize,
    config: &PlacementConfig,
    rng: &mut R,
) -> (Graph, PlacementStats) {
    let mut graph = Graph::new(width, height);
    let mut stats = PlacementStats::default();

    let hub_pos = sample_point(width, height, config.margin, rng);
    let hub = graph.add_node(HUB_NAME, NodeKind::Hub, hub_pos);
    roll_state(&mut graph, hub, rng);

    let mut placed: Vec<Point> = vec![hub_pos];
    for i in 0..count {
        let mut tries = 0;
        let pos = loop {
            let candidate = sample_point(width, height, config.margin, rng);
            tries += 1;
            let crowded = placed
                .iter()
                .any(|p| distance(*p, candidate) < config.min_separation);
            if !crowded {
                break candidate;
            }
            if tries >= config.max_tries {
                stats.fallbacks += 1;
                tracing::debug!(node = i, tries, "placement fell back to a crowded sample");
                break candidate;
            }
        };
        let id = graph.add_node(format!("node{i}"), NodeKind::Data, pos);
        roll_state(&mut graph, id, rng);
        placed.push(pos);
        stats.placed += 1;
    }

    if stats.fallbacks > 0 {
        tracing::warn!(
            fallbacks = stats.fallbacks,
            min_separation = config.min_separation,
            "some nodes were placed closer than the minimum separation"
        );
    }
    (graph, stats)
}
