//! graph-walk-core: undirected graph and walk search.
//!
//! A pure Rust library that maintains a symmetric adjacency matrix over a
//! fixed node set and finds a walk between two nodes with a Tarry-style
//! edge-consuming depth-first search. No I/O; input collection and rendering
//! live in the `graph-walk-cli` crate.

mod error;
mod graph;
mod traversal;

pub use error::{GraphError, InvalidNode};
pub use graph::{Graph, NodeId, DEFAULT_DENSITY};
pub use traversal::{find_walk, SearchReport, SearchStats, Walk, WalkFinder, WalkOutcome};
