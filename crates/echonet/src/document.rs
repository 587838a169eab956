//! The generated map as plain data, keyed by node id.
//!
//! This is the artifact handed to renderers, the game loop, and training bridges; each
//! serializes it however it likes. JSON via `serde_json` is the default.

use crate::error::{Error, Result};
use crate::geom::Point;
use crate::graph::{Graph, NodeId, NodeKind, NodeState};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub neighbors: Vec<String>,
    #[serde(flatten)]
    pub state: NodeState,
}

/// Node id to record, in generation order.
pub type GraphDocument = IndexMap<String, NodeRecord>;

impl Graph {
    pub fn to_document(&self) -> GraphDocument {
        self.nodes()
            .map(|n| {
                let record = NodeRecord {
                    id: n.name().to_string(),
                    x: n.pos.x,
                    y: n.pos.y,
                    kind: n.kind,
                    neighbors: n
                        .neighbors()
                        .iter()
                        .map(|&nb| self.node(nb).name().to_string())
                        .collect(),
                    state: n.state.clone(),
                };
                (record.id.clone(), record)
            })
            .collect()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let doc = self.to_document();
        let json = if pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(json)
    }

    /// Rebuilds a graph from a document, rejecting inconsistent adjacency.
    pub fn from_document(doc: &GraphDocument, width: f64, height: f64) -> Result<Self> {
        for (key, record) in doc {
            if *key != record.id {
                return Err(Error::IdMismatch {
                    key: key.clone(),
                    id: record.id.clone(),
                });
            }
            for nb in &record.neighbors {
                if nb == key {
                    return Err(Error::SelfLoop { node: key.clone() });
                }
                let Some(peer) = doc.get(nb) else {
                    return Err(Error::UnknownNeighbor {
                        node: key.clone(),
                        neighbor: nb.clone(),
                    });
                };
                if !peer.neighbors.contains(key) {
                    return Err(Error::AsymmetricEdge {
                        a: key.clone(),
                        b: nb.clone(),
                    });
                }
            }
        }
        if !doc.values().any(|r| r.kind == NodeKind::Hub) {
            return Err(Error::MissingHub);
        }

        let mut graph = Graph::new(width, height);
        for record in doc.values() {
            let id = graph.add_node(record.id.clone(), record.kind, Point::new(record.x, record.y));
            graph.node_mut(id).state = record.state.clone();
        }
        for record in doc.values() {
            let mut neighbors: Vec<NodeId> = Vec::with_capacity(record.neighbors.len());
            for nb in &record.neighbors {
                // Every name was checked above.
                if let Some(peer) = graph.find(nb) {
                    if !neighbors.contains(&peer) {
                        neighbors.push(peer);
                    }
                }
            }
            if let Some(id) = graph.find(&record.id) {
                graph.set_neighbors(id, neighbors);
            }
        }
        graph.assert_symmetric();
        Ok(graph)
    }

    pub fn from_json(json: &str, width: f64, height: f64) -> Result<Self> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(&doc, width, height)
    }
}
