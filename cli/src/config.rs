use clap::{ArgAction, Parser, ValueEnum};
use graph_walk_core::{NodeId, DEFAULT_DENSITY};

use crate::util;

/// How the graph's edges are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphMode {
    /// Edges entered by hand (prompted, or given with --edge)
    Manual,
    /// Each pair of nodes is connected with probability --density
    Random,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Edge list, adjacency matrix and walk as node labels
    #[default]
    Text,
    /// Graphviz document, walk edges in red
    Dot,
    /// vis-network style {nodes, edges} document, walk edges in red
    Json,
}

/// Settings for one run. Every setting can come from a flag or a
/// `GRAPH_WALK_*` environment variable; anything left unset that the run
/// needs is prompted for on stdin.
///
/// Node labels on the command line and at prompts start at 1.
#[derive(Debug, Clone, Parser)]
#[command(name = "graph-walk")]
#[command(version, about = "Find a walk between two nodes of an undirected graph (Tarry's algorithm)")]
pub struct Config {
    /// Number of nodes in the graph
    #[arg(short, long, env = "GRAPH_WALK_NODES", value_parser = util::parse_node_count)]
    pub nodes: Option<usize>,

    /// Manual or random graph
    #[arg(short, long, value_enum, env = "GRAPH_WALK_MODE")]
    pub mode: Option<GraphMode>,

    /// Edge probability for random graphs (0.0 to 1.0)
    #[arg(long, env = "GRAPH_WALK_DENSITY", default_value_t = DEFAULT_DENSITY, value_parser = util::parse_density)]
    pub density: f64,

    /// Seed for reproducible random graphs
    #[arg(long, env = "GRAPH_WALK_SEED")]
    pub seed: Option<u64>,

    /// An edge between two node labels; repeat for more edges (implies manual mode)
    #[arg(
        long = "edge",
        num_args = 2,
        value_names = ["U", "V"],
        action = ArgAction::Append,
        value_parser = util::parse_label
    )]
    pub edges: Vec<NodeId>,

    /// Start node label
    #[arg(short, long, requires = "end", value_parser = util::parse_label)]
    pub start: Option<NodeId>,

    /// End node label
    #[arg(short, long, requires = "start", value_parser = util::parse_label)]
    pub end: Option<NodeId>,

    /// Abort the search after this many steps (advances plus backtracks)
    #[arg(long, env = "GRAPH_WALK_STEP_BUDGET")]
    pub step_budget: Option<usize>,

    /// Output format for the rendered graph and walk
    #[arg(short, long, value_enum, env = "GRAPH_WALK_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Mode from flags, falling back to manual when edges were supplied.
    pub fn resolved_mode(&self) -> Option<GraphMode> {
        self.mode
            .or_else(|| (!self.edges.is_empty()).then_some(GraphMode::Manual))
    }

    /// Edges given with `--edge`, as 0-based pairs.
    pub fn edge_pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        self.start.zip(self.end)
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("graph-walk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.nodes, None);
        assert_eq!(config.mode, None);
        assert_eq!(config.density, DEFAULT_DENSITY);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.step_budget, None);
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_edges_are_zero_based_pairs() {
        let config = parse(&["-n", "4", "--edge", "1", "2", "--edge", "3", "4"]);
        assert_eq!(config.edge_pairs().collect::<Vec<_>>(), vec![(0, 1), (2, 3)]);
        assert_eq!(config.resolved_mode(), Some(GraphMode::Manual));
    }

    #[test]
    fn test_endpoints_need_both() {
        assert_eq!(parse(&[]).endpoints(), None);
        assert_eq!(parse(&["--start", "2", "--end", "5"]).endpoints(), Some((1, 4)));
        assert!(Config::try_parse_from(["graph-walk", "--start", "2"]).is_err());
        assert!(Config::try_parse_from(["graph-walk", "--end", "5"]).is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        for args in [
            vec!["graph-walk", "--nodes", "0"],
            vec!["graph-walk", "--density", "1.5"],
            vec!["graph-walk", "--start", "0"],
            vec!["graph-walk", "--edge", "1"],
        ] {
            assert!(Config::try_parse_from(args).is_err());
        }
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["-vv"]).log_filter(), "debug");
        assert_eq!(parse(&["-vvvv"]).log_filter(), "trace");
    }
}
