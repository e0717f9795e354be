use std::fmt;

use rand::Rng;
use tracing::debug;

use crate::error::{GraphError, InvalidNode};

/// Node index, always in `0..node_count`.
pub type NodeId = usize;

/// Probability of each unordered pair being an edge in a random graph.
pub const DEFAULT_DENSITY: f64 = 0.5;

/// Undirected simple graph over a fixed node universe.
///
/// Stored as a flat row-major n×n boolean matrix. Every mutation writes both
/// `(u, v)` and `(v, u)`, and the diagonal is never set, so the matrix stays
/// symmetric with no self-loops. `Clone` yields fully independent storage,
/// which is what the walk search relies on to consume edges destructively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    adjacency: Vec<bool>,
}

impl Graph {
    /// Empty graph with `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::InvalidArgument(
                "node count must be a positive integer".to_string(),
            ));
        }
        let cells = node_count.checked_mul(node_count).ok_or_else(|| {
            GraphError::InvalidArgument(format!("node count {} is too large", node_count))
        })?;
        Ok(Self {
            node_count,
            adjacency: vec![false; cells],
        })
    }

    /// Empty or randomly seeded graph, depending on `randomize`.
    pub fn construct(node_count: usize, randomize: bool) -> Result<Self, GraphError> {
        if randomize {
            Self::random(node_count)
        } else {
            Self::new(node_count)
        }
    }

    /// Random graph using the thread RNG and [`DEFAULT_DENSITY`].
    pub fn random(node_count: usize) -> Result<Self, GraphError> {
        Self::random_with(node_count, DEFAULT_DENSITY, &mut rand::thread_rng())
    }

    /// Random graph where each unordered pair is an edge with probability `density`.
    ///
    /// Only the upper triangle is sampled and mirrored, so symmetry holds by
    /// construction.
    pub fn random_with<R: Rng + ?Sized>(
        node_count: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, GraphError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GraphError::InvalidArgument(format!(
                "edge density must be within 0.0..=1.0, got {}",
                density
            )));
        }
        let mut graph = Self::new(node_count)?;
        for i in 0..node_count {
            for j in (i + 1)..node_count {
                if rng.gen_bool(density) {
                    graph.set(i, j, true);
                }
            }
        }
        debug!(
            node_count,
            edge_count = graph.edge_count(),
            density,
            "graph_walk: random graph generated"
        );
        Ok(graph)
    }

    /// Build from an explicit edge list. Any invalid pair aborts the whole build.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::new(node_count)?;
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Returns `true` when an edge exists between `u` and `v`.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.adjacency[self.index(u, v)])
    }

    /// Add an undirected edge. Returns `false` if it was already present.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        let was_present = self.adjacency[self.index(u, v)];
        self.set(u, v, true);
        Ok(!was_present)
    }

    /// Remove an undirected edge. Returns `false` if there was nothing to remove.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        let was_present = self.adjacency[self.index(u, v)];
        self.set(u, v, false);
        Ok(was_present)
    }

    /// Neighbors of `node` in ascending index order.
    pub fn neighbors(&self, node: NodeId) -> Result<impl Iterator<Item = NodeId> + '_, GraphError> {
        self.check_node(node)?;
        let row = &self.adjacency[node * self.node_count..(node + 1) * self.node_count];
        Ok(row
            .iter()
            .enumerate()
            .filter(|&(_, &present)| present)
            .map(|(i, _)| i))
    }

    pub fn degree(&self, node: NodeId) -> Result<usize, GraphError> {
        Ok(self.neighbors(node)?.count())
    }

    /// Every undirected edge once, as `(i, j)` with `i < j`, in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let n = self.node_count;
        (0..n).flat_map(move |i| {
            ((i + 1)..n)
                .filter(move |&j| self.adjacency[i * n + j])
                .map(move |j| (i, j))
        })
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        size_of::<Self>() + self.adjacency.capacity() * size_of::<bool>()
    }

    pub(crate) fn check_node(&self, node: NodeId) -> Result<(), InvalidNode> {
        if node >= self.node_count {
            return Err(InvalidNode::OutOfRange {
                node,
                node_count: self.node_count,
            });
        }
        Ok(())
    }

    /// Validate an endpoint pair before any read or write touches the matrix.
    pub(crate) fn check_pair(&self, u: NodeId, v: NodeId) -> Result<(), InvalidNode> {
        if u == v {
            return Err(InvalidNode::SameEndpoints { node: u });
        }
        self.check_node(u)?;
        self.check_node(v)
    }

    /// Unchecked read for callers that already validated `u` and `v`.
    pub(crate) fn contains(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency[self.index(u, v)]
    }

    fn index(&self, u: NodeId, v: NodeId) -> usize {
        u * self.node_count + v
    }

    fn set(&mut self, u: NodeId, v: NodeId, present: bool) {
        let (uv, vu) = (self.index(u, v), self.index(v, u));
        self.adjacency[uv] = present;
        self.adjacency[vu] = present;
    }
}

/// Adjacency matrix as rows of `0`/`1`.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.adjacency.chunks(self.node_count) {
            let cells: Vec<&str> = row.iter().map(|&b| if b { "1" } else { "0" }).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}
