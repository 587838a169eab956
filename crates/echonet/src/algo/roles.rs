use crate::config::RoleConfig;
use crate::graph::{Graph, NodeId, NodeKind};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleStats {
    pub cpu_nodes: usize,
    pub data_caches: usize,
}

fn promote<R: Rng + ?Sized>(
    graph: &mut Graph,
    kind: NodeKind,
    min: usize,
    max: usize,
    rng: &mut R,
) -> usize {
    let mut candidates: Vec<NodeId> = graph
        .nodes()
        .filter(|n| n.kind == NodeKind::Data)
        .map(|n| n.id())
        .collect();
    let wanted = rng.random_range(min..=max);
    let mut promoted = 0;
    for _ in 0..wanted {
        if candidates.is_empty() {
            break;
        }
        let idx = rng.random_range(0..candidates.len());
        let id = candidates.remove(idx);
        graph.node_mut(id).kind = kind;
        promoted += 1;
    }
    promoted
}

/// Turns a few random data nodes into cpu nodes, then a few others into data caches.
pub fn assign_roles<R: Rng + ?Sized>(
    graph: &mut Graph,
    config: &RoleConfig,
    rng: &mut R,
) -> RoleStats {
    let cpu_nodes = promote(
        graph,
        NodeKind::CpuNode,
        config.min_cpu_nodes,
        config.max_cpu_nodes,
        rng,
    );
    let data_caches = promote(
        graph,
        NodeKind::DataCache,
        config.min_data_caches,
        config.max_data_caches,
        rng,
    );
    RoleStats {
        cpu_nodes,
        data_caches,
    }
}
