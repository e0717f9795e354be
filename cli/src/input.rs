//! Input boundary: turns flags and interactive answers into a validated
//! `(graph, start, end)` request for the walk search.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use graph_walk_core::{Graph, GraphError, NodeId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::{Config, GraphMode};
use crate::util;

/// A validated search request. `start != end`, both within the graph.
#[derive(Debug)]
pub struct WalkRequest {
    pub graph: Graph,
    pub start: NodeId,
    pub end: NodeId,
}

/// Line-oriented question/answer channel. Stdin/stdout in the binary,
/// in-memory buffers in tests.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line. End of input is an error.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("graph_walk: input ended while waiting for an answer");
        }
        Ok(line.trim().to_string())
    }

    pub fn node_count(&mut self) -> Result<usize> {
        loop {
            let line = self.ask("Enter number of nodes: ")?;
            match util::parse_node_count(&line) {
                Ok(n) => return Ok(n),
                Err(msg) => self.say(&format!("{}. Enter again.", msg))?,
            }
        }
    }

    pub fn mode(&mut self) -> Result<GraphMode> {
        loop {
            let line = self.ask("Manual or random graph? [m/r] ")?;
            match line.to_lowercase().as_str() {
                "m" | "manual" => return Ok(GraphMode::Manual),
                "r" | "random" => return Ok(GraphMode::Random),
                _ => self.say("Answer 'm' for manual or 'r' for random.")?,
            }
        }
    }

    /// Number of edges to enter; bounded by the pairs available so that
    /// duplicate rejection cannot loop forever.
    pub fn edge_count(&mut self, node_count: usize) -> Result<usize> {
        let max_edges = node_count * (node_count - 1) / 2;
        loop {
            let line = self.ask("Enter number of edges: ")?;
            match line.parse::<usize>() {
                Ok(e) if e <= max_edges => return Ok(e),
                Ok(_) => self.say(&format!(
                    "A graph with {} nodes has at most {} edges. Enter again.",
                    node_count, max_edges
                ))?,
                Err(_) => self.say("Enter a whole number. Enter again.")?,
            }
        }
    }

    /// Read `count` distinct edges into `graph`, one pair of labels per line.
    ///
    /// Invalid or duplicate pairs are reported and read again; they do not
    /// count towards `count`.
    pub fn edges(&mut self, graph: &mut Graph, count: usize) -> Result<()> {
        if count > 0 {
            self.say("Enter the nodes the edge is between (two nodes each line)")?;
        }
        let mut entered = 0;
        while entered < count {
            let ((u, v), present) = self.node_pair("", graph)?;
            if present {
                self.say("This edge is already entered. Continue with the other edges.")?;
                continue;
            }
            graph.add_edge(u, v)?;
            entered += 1;
        }
        Ok(())
    }

    pub fn endpoints(&mut self, graph: &Graph) -> Result<(NodeId, NodeId)> {
        let (pair, _) = self.node_pair("Enter start and end nodes: ", graph)?;
        Ok(pair)
    }

    /// Read two labels and validate them against `graph` with `has_edge`.
    /// Returns the pair and whether the edge is already present.
    fn node_pair(&mut self, prompt: &str, graph: &Graph) -> Result<((NodeId, NodeId), bool)> {
        loop {
            let line = self.ask(prompt)?;
            let (u, v) = match util::parse_label_pair(&line) {
                Ok(pair) => pair,
                Err(msg) => {
                    self.say(&format!("{}. Enter again.", msg))?;
                    continue;
                }
            };
            match graph.has_edge(u, v) {
                Ok(present) => return Ok(((u, v), present)),
                Err(GraphError::InvalidNode(reason)) => {
                    self.say(&format!("{}. Enter again.", util::reprompt_message(reason)))?
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Build the graph from `config`, prompting for whatever it leaves open.
pub fn build_graph<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<Graph> {
    let node_count = match config.nodes {
        Some(n) => n,
        None => prompter.node_count()?,
    };
    let mode = match config.resolved_mode() {
        Some(mode) => mode,
        None => prompter.mode()?,
    };

    if mode == GraphMode::Random && !config.edges.is_empty() {
        bail!("graph_walk: --edge cannot be combined with a random graph");
    }

    let graph = match mode {
        GraphMode::Random => {
            let graph = match config.seed {
                Some(seed) => {
                    Graph::random_with(node_count, config.density, &mut StdRng::seed_from_u64(seed))?
                }
                None => Graph::random_with(node_count, config.density, &mut rand::thread_rng())?,
            };
            info!(
                node_count,
                edge_count = graph.edge_count(),
                seed = ?config.seed,
                "graph_walk: random graph built"
            );
            graph
        }
        GraphMode::Manual if !config.edges.is_empty() => {
            let graph = Graph::from_edges(node_count, config.edge_pairs())
                .context("graph_walk: invalid --edge")?;
            info!(node_count, edge_count = graph.edge_count(), "graph_walk: graph built from --edge");
            graph
        }
        GraphMode::Manual => {
            let mut graph = Graph::new(node_count)?;
            if node_count > 1 {
                let count = prompter.edge_count(node_count)?;
                prompter.edges(&mut graph, count)?;
            }
            info!(node_count, edge_count = graph.edge_count(), "graph_walk: graph entered");
            graph
        }
    };

    Ok(graph)
}

/// Pick the walk endpoints from `config`, or show the graph and prompt.
pub fn choose_endpoints<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
    graph: &Graph,
) -> Result<(NodeId, NodeId)> {
    if graph.node_count() < 2 {
        bail!("graph_walk: a walk needs at least two nodes");
    }
    match config.endpoints() {
        Some((start, end)) => {
            graph
                .has_edge(start, end)
                .context("graph_walk: invalid --start/--end")?;
            Ok((start, end))
        }
        None => {
            prompter.say(&format!("Adjacency matrix:\n{}", graph))?;
            prompter.endpoints(graph)
        }
    }
}

/// Full boundary: graph plus endpoints, validated.
pub fn collect_request<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<WalkRequest> {
    let graph = build_graph(config, prompter)?;
    let (start, end) = choose_endpoints(config, prompter, &graph)?;
    Ok(WalkRequest { graph, start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Cursor;

    fn config(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("graph-walk").chain(args.iter().copied())).unwrap()
    }

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_interactive_manual_session() {
        let mut p = prompter("4\nm\n3\n1 2\n2 3\n3 4\n1 4\n");
        let request = collect_request(&config(&[]), &mut p).unwrap();
        assert_eq!(request.graph.node_count(), 4);
        assert_eq!(request.graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!((request.start, request.end), (0, 3));
        let out = transcript(p);
        assert!(out.contains("Enter the nodes the edge is between"));
        assert!(out.contains("Adjacency matrix:"));
    }

    #[test]
    fn test_edge_reprompts() {
        // same nodes, out of range, garbage, duplicate, then a valid edge
        let mut p = prompter("2\n2 2\n1 9\nfoo\n1 2\n2 1\n2 3\n");
        let mut graph = Graph::new(3).unwrap();
        let count = p.edge_count(3).unwrap();
        p.edges(&mut graph, count).unwrap();
        assert_eq!(graph.edge_count(), 2);
        let out = transcript(p);
        assert!(out.contains("Nodes must be different. Enter again."));
        assert!(out.contains("Node indexes must be within a graph range. Enter again."));
        assert!(out.contains("Enter two node numbers separated by a space. Enter again."));
        assert!(out.contains("This edge is already entered. Continue with the other edges."));
    }

    #[test]
    fn test_edge_count_bounded() {
        let mut p = prompter("4\n3\n");
        assert_eq!(p.edge_count(3).unwrap(), 3);
        assert!(transcript(p).contains("at most 3 edges"));
    }

    #[test]
    fn test_endpoint_reprompts() {
        let graph = Graph::new(3).unwrap();
        let mut p = prompter("1 1\n0 2\n3 1\n");
        assert_eq!(p.endpoints(&graph).unwrap(), (2, 0));
    }

    #[test]
    fn test_mode_prompt() {
        let mut p = prompter("x\nR\n");
        assert_eq!(p.mode().unwrap(), GraphMode::Random);
    }

    #[test]
    fn test_end_of_input_is_error() {
        let mut p = prompter("");
        assert!(p.node_count().is_err());
    }

    #[test]
    fn test_flags_need_no_prompts() {
        let cfg = config(&["-n", "3", "--edge", "1", "2", "--edge", "2", "3", "-s", "1", "-e", "3"]);
        let mut p = prompter("");
        let request = collect_request(&cfg, &mut p).unwrap();
        assert_eq!(request.graph.edge_count(), 2);
        assert_eq!((request.start, request.end), (0, 2));
        assert!(transcript(p).is_empty());
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let cfg = config(&["-n", "12", "-m", "random", "--seed", "42"]);
        let a = build_graph(&cfg, &mut prompter("")).unwrap();
        let b = build_graph(&cfg, &mut prompter("")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_flag_edge_rejected() {
        let cfg = config(&["-n", "3", "--edge", "1", "5"]);
        assert!(build_graph(&cfg, &mut prompter("")).is_err());
    }

    #[test]
    fn test_edges_with_random_mode_rejected() {
        let cfg = config(&["-n", "3", "-m", "random", "--edge", "1", "2"]);
        let err = build_graph(&cfg, &mut prompter("")).unwrap_err();
        assert!(err.to_string().contains("--edge"));

        let cfg = config(&["-n", "3", "--edge", "1", "2", "-m", "manual"]);
        assert!(build_graph(&cfg, &mut prompter("")).is_ok());
    }

    #[test]
    fn test_invalid_flag_endpoints_rejected() {
        let cfg = config(&["-n", "3", "-m", "manual", "--edge", "1", "2", "-s", "2", "-e", "2"]);
        assert!(collect_request(&cfg, &mut prompter("")).is_err());
    }

    #[test]
    fn test_single_node_graph_has_no_walk_request() {
        let cfg = config(&["-n", "1", "-m", "manual"]);
        assert!(collect_request(&cfg, &mut prompter("")).is_err());
    }
}
