use tracing::{debug, trace};

use crate::error::GraphError;
use crate::graph::{Graph, NodeId};

/// A walk: a node sequence where each consecutive pair is an edge.
///
/// Nodes and edges may repeat. Always holds at least two nodes when produced
/// by the search, since `start != end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    nodes: Vec<NodeId>,
}

impl Walk {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edge traversals in the walk.
    pub fn hops(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Consecutive `(from, to)` pairs in walk order.
    pub fn steps(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// True when every step of the walk is an edge of `graph`.
    pub fn is_valid_in(&self, graph: &Graph) -> bool {
        self.steps()
            .all(|(u, v)| graph.has_edge(u, v).unwrap_or(false))
    }
}

/// Result of a walk search. Not finding a walk is an ordinary outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    Found(Walk),
    NoWalkFound,
}

impl WalkOutcome {
    pub fn walk(&self) -> Option<&Walk> {
        match self {
            WalkOutcome::Found(walk) => Some(walk),
            WalkOutcome::NoWalkFound => None,
        }
    }

    pub fn into_walk(self) -> Option<Walk> {
        match self {
            WalkOutcome::Found(walk) => Some(walk),
            WalkOutcome::NoWalkFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, WalkOutcome::Found(_))
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Edges consumed. Never exceeds the input graph's edge count.
    pub advances: usize,
    /// Dead ends resolved by popping the walk stack.
    pub backtracks: usize,
}

impl SearchStats {
    pub fn steps(&self) -> usize {
        self.advances + self.backtracks
    }
}

/// Outcome plus search counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: WalkOutcome,
    pub stats: SearchStats,
}

/// Tarry-style walk search: depth-first, consuming each edge as it is
/// traversed, backtracking along the walk stack at dead ends.
///
/// The search works on a private copy of the input graph. Each node keeps a
/// resume cursor so that revisits skip neighbors already scanned and
/// consumed. Every advance deletes an edge from the copy and every backtrack
/// pops a node pushed by an advance, so a search performs at most `E`
/// advances and `E` backtracks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkFinder {
    step_budget: Option<usize>,
}

impl WalkFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort with [`GraphError::StepBudgetExceeded`] after `budget` steps
    /// (advances plus backtracks). `None` means no limit.
    pub fn with_step_budget(mut self, budget: Option<usize>) -> Self {
        self.step_budget = budget;
        self
    }

    pub fn step_budget(&self) -> Option<usize> {
        self.step_budget
    }

    /// Search for a walk from `start` to `end` in `graph`.
    ///
    /// `graph` is never modified. Fails with `InvalidNode` if `start == end`
    /// or either endpoint is out of range; this check precedes any search
    /// work.
    pub fn find(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<SearchReport, GraphError> {
        graph.check_pair(start, end)?;

        let node_count = graph.node_count();
        debug!(
            start,
            end,
            node_count,
            edge_count = graph.edge_count(),
            "graph_walk: walk search started"
        );

        let mut working = graph.clone();
        let mut resume: Vec<NodeId> = vec![0; node_count];
        let mut walk: Vec<NodeId> = Vec::new();
        let mut stats = SearchStats::default();
        let mut current = start;

        while current != end {
            // Edges below the cursor were consumed or absent on an earlier
            // scan, and consumed edges never come back.
            let next = (resume[current]..node_count)
                .find(|&i| i != current && working.contains(current, i));

            match next {
                Some(i) => {
                    self.check_budget(&stats)?;
                    walk.push(current);
                    resume[current] = i;
                    working.remove_edge(current, i)?;
                    stats.advances += 1;
                    trace!(from = current, to = i, "graph_walk: advance");
                    current = i;
                }
                None => match walk.pop() {
                    Some(previous) => {
                        self.check_budget(&stats)?;
                        stats.backtracks += 1;
                        trace!(from = current, to = previous, "graph_walk: backtrack");
                        current = previous;
                    }
                    None => {
                        debug!(start, end, ?stats, "graph_walk: no walk found");
                        return Ok(SearchReport {
                            outcome: WalkOutcome::NoWalkFound,
                            stats,
                        });
                    }
                },
            }
        }

        walk.push(current);
        debug!(start, end, hops = walk.len() - 1, ?stats, "graph_walk: walk found");
        Ok(SearchReport {
            outcome: WalkOutcome::Found(Walk { nodes: walk }),
            stats,
        })
    }

    /// Fails if taking one more step would exceed the budget.
    fn check_budget(&self, stats: &SearchStats) -> Result<(), GraphError> {
        match self.step_budget {
            Some(budget) if stats.steps() + 1 > budget => {
                debug!(budget, ?stats, "graph_walk: step budget exhausted");
                Err(GraphError::StepBudgetExceeded { budget })
            }
            _ => Ok(()),
        }
    }
}

/// Find a walk from `start` to `end` with default settings.
pub fn find_walk(graph: &Graph, start: NodeId, end: NodeId) -> Result<WalkOutcome, GraphError> {
    WalkFinder::new()
        .find(graph, start, end)
        .map(|report| report.outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidNode;

    fn make_chain(n: usize) -> Graph {
        Graph::from_edges(n, (0..n - 1).map(|i| (i, i + 1))).unwrap()
    }

    fn make_cycle(n: usize) -> Graph {
        Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
    }

    fn make_complete(n: usize) -> Graph {
        let mut g = Graph::new(n).unwrap();
        for i in 0..n {
            for j in (i + 1)..n {
                g.add_edge(i, j).unwrap();
            }
        }
        g
    }

    fn expect_walk(outcome: WalkOutcome) -> Walk {
        match outcome {
            WalkOutcome::Found(walk) => walk,
            WalkOutcome::NoWalkFound => panic!("expected a walk"),
        }
    }

    #[test]
    fn test_walk_simple_path() {
        let g = make_chain(4);
        let walk = expect_walk(find_walk(&g, 0, 3).unwrap());
        assert_eq!(walk.nodes(), &[0, 1, 2, 3]);
        assert_eq!(walk.hops(), 3);
    }

    #[test]
    fn test_walk_disconnected() {
        let g = Graph::from_edges(4, vec![(0, 1), (2, 3)]).unwrap();
        assert_eq!(find_walk(&g, 0, 3).unwrap(), WalkOutcome::NoWalkFound);
    }

    #[test]
    fn test_walk_triangle_is_valid() {
        let g = make_complete(3);
        let walk = expect_walk(find_walk(&g, 0, 1).unwrap());
        assert_eq!(walk.start(), 0);
        assert_eq!(walk.end(), 1);
        assert!(walk.is_valid_in(&g));
    }

    #[test]
    fn test_walk_reverse_chain() {
        let g = make_chain(5);
        let walk = expect_walk(find_walk(&g, 4, 0).unwrap());
        assert_eq!(walk.nodes(), &[4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_walk_requires_backtracking() {
        // 0-1 is a dead-end spur scanned before the route 0-2-3.
        let g = Graph::from_edges(4, vec![(0, 1), (0, 2), (2, 3)]).unwrap();
        let report = WalkFinder::new().find(&g, 0, 3).unwrap();
        let walk = expect_walk(report.outcome);
        assert_eq!(walk.nodes(), &[0, 2, 3]);
        assert_eq!(report.stats.advances, 3);
        assert_eq!(report.stats.backtracks, 1);
    }

    #[test]
    fn test_walk_cycle() {
        let g = make_cycle(6);
        let walk = expect_walk(find_walk(&g, 0, 3).unwrap());
        assert_eq!(walk.start(), 0);
        assert_eq!(walk.end(), 3);
        assert!(walk.is_valid_in(&g));
    }

    #[test]
    fn test_walk_does_not_mutate_input() {
        let g = make_complete(5);
        let before = g.clone();
        find_walk(&g, 0, 4).unwrap();
        assert_eq!(g, before);
    }

    #[test]
    fn test_walk_isolated_start() {
        let g = Graph::from_edges(4, vec![(1, 2), (2, 3)]).unwrap();
        let report = WalkFinder::new().find(&g, 0, 3).unwrap();
        assert_eq!(report.outcome, WalkOutcome::NoWalkFound);
        assert_eq!(report.stats, SearchStats::default());
    }

    #[test]
    fn test_walk_empty_graph() {
        let g = Graph::new(2).unwrap();
        assert_eq!(find_walk(&g, 0, 1).unwrap(), WalkOutcome::NoWalkFound);
    }

    #[test]
    fn test_walk_same_endpoints_rejected() {
        let g = make_chain(3);
        let err = find_walk(&g, 1, 1).unwrap_err();
        assert_eq!(err, GraphError::InvalidNode(InvalidNode::SameEndpoints { node: 1 }));
    }

    #[test]
    fn test_walk_out_of_range_rejected() {
        let g = make_chain(3);
        assert!(find_walk(&g, 0, 3).unwrap_err().is_invalid_node());
        assert!(find_walk(&g, 7, 0).unwrap_err().is_invalid_node());
    }

    #[test]
    fn test_walk_exhausts_component_before_failing() {
        // Start component is a triangle plus a tail; target lives elsewhere.
        let g = Graph::from_edges(6, vec![(0, 1), (1, 2), (2, 0), (2, 3), (4, 5)]).unwrap();
        let report = WalkFinder::new().find(&g, 0, 5).unwrap();
        assert_eq!(report.outcome, WalkOutcome::NoWalkFound);
        assert!(report.stats.advances <= g.edge_count());
    }

    #[test]
    fn test_step_budget_exceeded() {
        let g = make_chain(10);
        let err = WalkFinder::new()
            .with_step_budget(Some(3))
            .find(&g, 0, 9)
            .unwrap_err();
        assert_eq!(err, GraphError::StepBudgetExceeded { budget: 3 });
    }

    #[test]
    fn test_step_budget_sufficient() {
        let g = make_chain(10);
        let report = WalkFinder::new()
            .with_step_budget(Some(9))
            .find(&g, 0, 9)
            .unwrap();
        assert!(report.outcome.is_found());
        assert_eq!(report.stats.steps(), 9);
    }

    #[test]
    fn test_step_budget_exact_without_walk() {
        // 0 -> 1, dead end, back to 0, dead end: two steps, no walk.
        let g = Graph::from_edges(3, vec![(0, 1)]).unwrap();
        let report = WalkFinder::new()
            .with_step_budget(Some(2))
            .find(&g, 0, 2)
            .unwrap();
        assert_eq!(report.outcome, WalkOutcome::NoWalkFound);
        assert_eq!(report.stats.steps(), 2);

        let err = WalkFinder::new()
            .with_step_budget(Some(1))
            .find(&g, 0, 2)
            .unwrap_err();
        assert_eq!(err, GraphError::StepBudgetExceeded { budget: 1 });
    }

    #[test]
    fn test_step_budget_zero_isolated_start() {
        let g = Graph::new(2).unwrap();
        let report = WalkFinder::new()
            .with_step_budget(Some(0))
            .find(&g, 0, 1)
            .unwrap();
        assert_eq!(report.outcome, WalkOutcome::NoWalkFound);
        assert_eq!(report.stats.steps(), 0);
    }

    #[test]
    fn test_walk_steps() {
        let g = make_chain(3);
        let walk = expect_walk(find_walk(&g, 0, 2).unwrap());
        assert_eq!(walk.steps().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
        assert_eq!(walk.into_nodes(), vec![0, 1, 2]);
    }
}
