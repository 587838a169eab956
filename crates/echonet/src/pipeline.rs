use crate::algo::augment::augment_edges;
use crate::algo::crossing::{CrossingStats, ProtectedEdges, repair_crossings};
use crate::algo::leaves::{LeafStats, attach_leaves};
use crate::algo::placement::{PlacementStats, place_nodes, random_node_count};
use crate::algo::relax::{RelaxStats, relax_layout};
use crate::algo::roles::{RoleStats, assign_roles};
use crate::algo::spanning::{candidate_pairs, connect_spanning_tree};
use crate::audit::{Audit, audit};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::graph::Graph;
use crate::rng::XorShift64Star;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineStats {
    pub placement: PlacementStats,
    pub spanning_edges: usize,
    pub augmented_edges: usize,
    pub relax: RelaxStats,
    pub crossings: CrossingStats,
    pub leaves: LeafStats,
    pub roles: RoleStats,
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub graph: Graph,
    pub stats: PipelineStats,
    pub audit: Audit,
}

/// Runs the full generation pipeline with the caller's random source.
///
/// Only an invalid `config` is an error. Geometric compromises left by the bounded repair
/// loops are reported in [`Generated::audit`] instead.
pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<Generated> {
    config.validate()?;
    let mut stats = PipelineStats::default();

    let count = random_node_count(&config.placement, rng);
    let mut graph = {
        let _span = tracing::debug_span!("placement", count).entered();
        let (graph, placement) =
            place_nodes(config.width, config.height, count, &config.placement, rng);
        stats.placement = placement;
        graph
    };

    let candidates = candidate_pairs(&graph);
    let tree = {
        let _span = tracing::debug_span!("spanning_tree").entered();
        connect_spanning_tree(&mut graph, &candidates, config.augment.max_degree)
    };
    stats.spanning_edges = tree.len();
    graph.assert_symmetric();

    stats.augmented_edges = {
        let _span = tracing::debug_span!("augment").entered();
        augment_edges(&mut graph, &candidates, &config.augment)
    };
    graph.assert_symmetric();

    stats.relax = {
        let _span = tracing::debug_span!("relax").entered();
        relax_layout(&mut graph, &config.relax)
    };

    let mut protected = ProtectedEdges::default();
    if config.repair.protect_spanning_tree {
        protected.extend(tree.iter().copied());
    }
    stats.crossings = {
        let _span = tracing::debug_span!("crossing_repair").entered();
        repair_crossings(
            &mut graph,
            &config.repair,
            config.augment.max_degree,
            &mut protected,
            rng,
        )
    };
    graph.assert_symmetric();

    stats.leaves = {
        let _span = tracing::debug_span!("leaf_attachment").entered();
        attach_leaves(
            &mut graph,
            config.augment.max_degree,
            config.repair.leaf_max_iterations,
        )
    };
    graph.assert_symmetric();

    stats.roles = assign_roles(&mut graph, &config.roles, rng);

    let report = audit(&graph, config);
    if !report.is_sound() {
        tracing::warn!(
            connected = report.connected,
            over_degree = report.over_degree.len(),
            crossings = report.crossings.len(),
            "generated map violates hard invariants"
        );
    }
    tracing::debug!(
        nodes = report.nodes,
        edges = report.edges,
        leaves = report.leaves.len(),
        narrow_angles = report.narrow_angles.len(),
        clearance_violations = report.clearance_violations.len(),
        "map generated"
    );

    Ok(Generated {
        graph,
        stats,
        audit: report,
    })
}

/// [`generate`] with a fresh [`XorShift64Star`] seeded from `seed`.
pub fn generate_seeded(config: &GeneratorConfig, seed: u64) -> Result<Generated> {
    let mut rng = XorShift64Star::new(seed);
    generate(config, &mut rng)
}
