use thiserror::Error;

use crate::graph::NodeId;

/// Why a node index (or pair of indices) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidNode {
    #[error("node {node} is outside the graph range 0..{node_count}")]
    OutOfRange { node: NodeId, node_count: usize },

    #[error("nodes must be different, got {node} twice")]
    SameEndpoints { node: NodeId },
}

/// Errors raised by graph mutation/query and by the walk search.
///
/// Not finding a walk is not an error; see [`crate::WalkOutcome::NoWalkFound`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("invalid node: {0}")]
    InvalidNode(#[from] InvalidNode),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Only raised when a step budget was configured on the [`crate::WalkFinder`].
    #[error("walk search exceeded its budget of {budget} steps")]
    StepBudgetExceeded { budget: usize },
}

impl GraphError {
    pub fn is_invalid_node(&self) -> bool {
        matches!(self, GraphError::InvalidNode(_))
    }
}
