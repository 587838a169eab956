#![forbid(unsafe_code)]

//! Map generation for Network Echo, a node-capture strategy game.
//!
//! The map is a connected planar-looking graph of hub/data/cpu/cache nodes. It is built once
//! per game by a forward pipeline: scatter points, connect them with a minimum spanning tree,
//! add extra edges under degree/crossing/clearance/angle constraints, relax the layout with a
//! force simulation, repair crossings the relaxation introduced, and give leaves a second
//! link. Every stage draws randomness from the caller's generator, so a fixed seed yields a
//! byte-identical map.

pub mod algo;
pub mod audit;
pub mod config;
pub mod document;
pub mod error;
pub mod geom;
pub mod graph;
pub mod pipeline;
pub mod rng;

pub use audit::Audit;
pub use config::GeneratorConfig;
pub use document::{GraphDocument, NodeRecord};
pub use error::{Error, Result};
pub use geom::Point;
pub use graph::{Edge, Graph, Node, NodeId, NodeKind, NodeState, Owner, Program, ProgramKind};
pub use pipeline::{Generated, PipelineStats, generate, generate_seeded};
pub use rng::XorShift64Star;
