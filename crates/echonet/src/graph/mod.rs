//! Arena-backed map graph.
//!
//! Nodes live in a `Vec` and are addressed by [`NodeId`]; adjacency is a short list of ids per
//! node, kept symmetric by [`Graph::connect`] and [`Graph::disconnect`]. Edges are not stored
//! on their own: an edge exists when both endpoints list each other.

use crate::geom::Point;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Hub,
    Data,
    CpuNode,
    DataCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    #[default]
    Neutral,
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    Miner,
    Shield,
    Sentry,
    Overclocker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(rename = "type")]
    pub kind: ProgramKind,
    pub level: u32,
}

/// Gameplay fields carried on every node. The generator only initializes them; game logic
/// owns them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeState {
    pub owner: Owner,
    pub program: Option<Program>,
    pub resistance: u32,
    pub random_phase: f64,
    pub shield_health: f64,
    pub max_shield_health: f64,
    pub is_capturing: bool,
    pub capture_progress: f64,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            owner: Owner::Neutral,
            program: None,
            resistance: 10,
            random_phase: 0.0,
            shield_health: 0.0,
            max_shield_health: 100.0,
            is_capturing: false,
            capture_progress: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    pub kind: NodeKind,
    pub pos: Point,
    neighbors: Vec<NodeId>,
    pub state: NodeState,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Unordered node pair, stored with the smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    pub fn new(x: NodeId, y: NodeId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.a == id || self.b == id
    }

    pub fn shares_endpoint(&self, other: &Edge) -> bool {
        self.touches(other.a) || self.touches(other.b)
    }
}

#[derive(Debug, Clone)]
pub struct Graph {
    width: f64,
    height: f64,
    nodes: Vec<Node>,
    by_name: FxHashMap<String, NodeId>,
    hub: Option<NodeId>,
}

impl Graph {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
            by_name: FxHashMap::default(),
            hub: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn hub(&self) -> Option<NodeId> {
        self.hub
    }

    /// Appends a node. Names must be unique and only the first hub is recorded as the hub.
    pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind, pos: Point) -> NodeId {
        let name = name.into();
        let id = NodeId::from_index(self.nodes.len());
        assert!(
            !self.by_name.contains_key(&name),
            "duplicate node name `{name}`"
        );
        if kind == NodeKind::Hub && self.hub.is_none() {
            self.hub = Some(id);
        }
        self.by_name.insert(name.clone(), id);
        self.nodes.push(Node {
            id,
            name,
            kind,
            pos,
            neighbors: Vec::new(),
            state: NodeState::default(),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()].pos
    }

    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].neighbors
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes[id.index()].neighbors.len()
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes[a.index()].neighbors.contains(&b)
    }

    /// Adds the undirected edge `a - b`. Returns false for self-loops and existing edges.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || self.has_edge(a, b) {
            return false;
        }
        self.nodes[a.index()].neighbors.push(b);
        self.nodes[b.index()].neighbors.push(a);
        true
    }

    /// Removes the undirected edge `a - b`. Returns false when it did not exist.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> bool {
        if !self.has_edge(a, b) {
            return false;
        }
        self.nodes[a.index()].neighbors.retain(|n| *n != b);
        self.nodes[b.index()].neighbors.retain(|n| *n != a);
        true
    }

    /// Replaces a node's adjacency wholesale. Callers must keep the lists mirrored.
    pub(crate) fn set_neighbors(&mut self, id: NodeId, neighbors: Vec<NodeId>) {
        self.nodes[id.index()].neighbors = neighbors;
    }

    /// Every edge once, in node order and then neighbor insertion order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut out = Vec::new();
        for node in &self.nodes {
            for &nb in &node.neighbors {
                if node.id < nb {
                    out.push(Edge { a: node.id, b: nb });
                }
            }
        }
        out
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum::<usize>() / 2
    }

    pub fn segment(&self, edge: Edge) -> (Point, Point) {
        (self.pos(edge.a), self.pos(edge.b))
    }

    pub fn reachable_from(&self, start: NodeId) -> Vec<bool> {
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        seen[start.index()] = true;
        queue.push_back(start);
        while let Some(cur) = queue.pop_front() {
            for &nb in &self.nodes[cur.index()].neighbors {
                if !seen[nb.index()] {
                    seen[nb.index()] = true;
                    queue.push_back(nb);
                }
            }
        }
        seen
    }

    /// True when every node is reachable from the hub (or from the first node if there is no
    /// hub). The empty graph is connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.hub.or_else(|| self.ids().next()) else {
            return true;
        };
        self.reachable_from(start).into_iter().all(|seen| seen)
    }

    pub fn path_exists(&self, from: NodeId, to: NodeId) -> bool {
        from == to || self.reachable_from(from)[to.index()]
    }

    /// Breadth-first shortest path (by hop count), including both endpoints.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        let mut prev: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        seen[from.index()] = true;
        queue.push_back(from);
        while let Some(cur) = queue.pop_front() {
            if cur == to {
                let mut path = vec![to];
                let mut at = to;
                while let Some(p) = prev[at.index()] {
                    path.push(p);
                    at = p;
                }
                path.reverse();
                return Some(path);
            }
            for &nb in &self.nodes[cur.index()].neighbors {
                if !seen[nb.index()] {
                    seen[nb.index()] = true;
                    prev[nb.index()] = Some(cur);
                    queue.push_back(nb);
                }
            }
        }
        None
    }

    /// Panics if any adjacency entry is not mirrored or is a self-loop.
    ///
    /// Edge bookkeeping only goes through `connect`/`disconnect`, so a failure here is a bug.
    pub fn assert_symmetric(&self) {
        for node in &self.nodes {
            for &nb in &node.neighbors {
                assert!(nb != node.id, "self-loop on `{}`", node.name);
                assert!(
                    self.nodes[nb.index()].neighbors.contains(&node.id),
                    "asymmetric adjacency: `{}` lists `{}` but not vice versa",
                    node.name,
                    self.nodes[nb.index()].name
                );
            }
        }
    }
}
