use crate::config::RelaxConfig;
use crate::graph::Graph;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RelaxStats {
    pub steps: usize,
    /// Stopped because movement fell below the threshold rather than the step cap.
    pub converged: bool,
    /// Largest per-node displacement (|dx| + |dy|) of the final step.
    pub last_max_move: f64,
}

/// Force-directed relaxation: inverse-square repulsion between all pairs plus a linear spring
/// on each edge. Forces become the step displacement after damping; nothing carries over
/// between steps. The hub never moves and other nodes stay `margin` inside the canvas.
pub fn relax_layout(graph: &mut Graph, config: &RelaxConfig) -> RelaxStats {
    let mut stats = RelaxStats::default();
    if graph.is_empty() {
        stats.converged = true;
        return stats;
    }

    let edges = graph.edges();
    let ids: Vec<_> = graph.ids().collect();
    let hub = graph.hub();
    let (min_x, max_x) = (config.margin, graph.width() - config.margin);
    let (min_y, max_y) = (config.margin, graph.height() - config.margin);
    let mut force = vec![(0.0_f64, 0.0_f64); ids.len()];

    for _ in 0..config.max_steps {
        stats.steps += 1;

        for i in 0..ids.len() {
            let pi = graph.pos(ids[i]);
            for j in i + 1..ids.len() {
                let pj = graph.pos(ids[j]);
                let (dx, dy) = (pi.x - pj.x, pi.y - pj.y);
                let dist = (dx * dx + dy * dy).sqrt() + config.epsilon;
                let f = config.repulsion / (dist * dist);
                let (fx, fy) = (f * dx / dist, f * dy / dist);
                force[i].0 += fx;
                force[i].1 += fy;
                force[j].0 -= fx;
                force[j].1 -= fy;
            }
        }

        for e in &edges {
            let (pa, pb) = graph.segment(*e);
            let (dx, dy) = (pb.x - pa.x, pb.y - pa.y);
            let dist = (dx * dx + dy * dy).sqrt() + config.epsilon;
            let f = config.spring_k * (dist - config.spring_length);
            let (fx, fy) = (f * dx / dist, f * dy / dist);
            force[e.a.index()].0 += fx;
            force[e.a.index()].1 += fy;
            force[e.b.index()].0 -= fx;
            force[e.b.index()].1 -= fy;
        }

        let mut max_move = 0.0_f64;
        for (idx, &id) in ids.iter().enumerate() {
            let (fx, fy) = std::mem::take(&mut force[idx]);
            if Some(id) == hub {
                continue;
            }
            let (mx, my) = (fx * config.damping, fy * config.damping);
            let node = graph.node_mut(id);
            node.pos.x = (node.pos.x + mx).clamp(min_x, max_x);
            node.pos.y = (node.pos.y + my).clamp(min_y, max_y);
            max_move = max_move.max(mx.abs() + my.abs());
        }
        stats.last_max_move = max_move;

        if max_move < config.min_movement {
            stats.converged = true;
            break;
        }
    }

    tracing::debug!(
        steps = stats.steps,
        converged = stats.converged,
        last_max_move = stats.last_max_move,
        "relaxation done"
    );
    stats
}
