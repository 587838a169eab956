use crate::graph::{Edge, Graph, NodeId};

/// Disjoint-set forest over `0..n` with path compression.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets of `x` and `y`. Returns false if they were already one set.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        self.parent[rx] = ry;
        true
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub a: NodeId,
    pub b: NodeId,
    pub distance: f64,
}

/// All node pairs ordered by ascending distance. Ties keep node order.
pub fn candidate_pairs(graph: &Graph) -> Vec<Candidate> {
    let ids: Vec<NodeId> = graph.ids().collect();
    let mut out = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1) / 2);
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            out.push(Candidate {
                a,
                b,
                distance: graph.pos(a).distance_to(graph.pos(b)),
            });
        }
    }
    out.sort_by(|x, y| x.distance.total_cmp(&y.distance));
    out
}

/// Kruskal over the sorted `candidates`; returns the selected tree edges.
///
/// The first pass skips pairs with an endpoint already at `max_degree`. Every tree component
/// keeps a leaf below the cap, so this pass spans the graph whenever `max_degree >= 2`. For
/// smaller caps a second pass joins the remaining components ignoring the cap.
pub fn connect_spanning_tree(
    graph: &mut Graph,
    candidates: &[Candidate],
    max_degree: usize,
) -> Vec<Edge> {
    let target = graph.len().saturating_sub(1);
    let mut sets = UnionFind::new(graph.len());
    let mut tree = Vec::with_capacity(target);

    for capped in [true, false] {
        for c in candidates {
            if tree.len() >= target {
                break;
            }
            if capped && (graph.degree(c.a) >= max_degree || graph.degree(c.b) >= max_degree) {
                continue;
            }
            if sets.union(c.a.index(), c.b.index()) {
                graph.connect(c.a, c.b);
                tree.push(Edge::new(c.a, c.b));
            }
        }
        if tree.len() >= target {
            break;
        }
        tracing::warn!(
            joined = tree.len(),
            needed = target,
            max_degree,
            "degree cap split the spanning forest; joining the rest uncapped"
        );
    }

    tracing::debug!(edges = tree.len(), "spanning tree built");
    tree
}

#[cfg(test)]
mod tests {
    use super::UnionFind;

    #[test]
    fn union_find_tracks_components() {
        let mut uf = UnionFind::new(6);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(!uf.connected(1, 2));
        assert!(uf.union(1, 3));
        assert!(uf.connected(0, 2));
        assert!(!uf.union(0, 3));
        assert!(!uf.connected(4, 5));
    }

    #[test]
    fn find_compresses_long_chains() {
        let n = 10_000;
        let mut uf = UnionFind::new(n);
        for i in 0..n - 1 {
            uf.union(i, i + 1);
        }
        let root = uf.find(0);
        assert_eq!(root, n - 1);
        assert_eq!(uf.parent[0], root);
        assert_eq!(uf.parent[n / 2], n - 1);
    }
}
