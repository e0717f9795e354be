//! Rendering of the user's graph with the walk highlighted.
//!
//! Always draws the original graph: edges consumed by the search are an
//! implementation detail of the search and still belong to the picture.

use std::collections::HashSet;
use std::fmt::{self, Write as _};

use anyhow::Result;
use graph_walk_core::{Graph, NodeId, Walk, WalkOutcome};
use serde_json::{json, Value};

use crate::config::OutputFormat;
use crate::util::{format_labels, label};

const WALK_COLOR: &str = "red";

pub fn render(format: OutputFormat, graph: &Graph, outcome: &WalkOutcome) -> Result<String> {
    let walk = outcome.walk();
    Ok(match format {
        OutputFormat::Text => render_text(graph, walk)?,
        OutputFormat::Dot => render_dot(graph, walk)?,
        OutputFormat::Json => serde_json::to_string_pretty(&render_json(graph, walk))?,
    })
}

/// Undirected walk steps, normalized to `(min, max)`.
fn walk_edges(walk: Option<&Walk>) -> HashSet<(NodeId, NodeId)> {
    walk.map(|w| w.steps().map(|(u, v)| (u.min(v), u.max(v))).collect())
        .unwrap_or_default()
}

/// Node count, edge list, adjacency matrix, then the walk.
fn render_text(graph: &Graph, walk: Option<&Walk>) -> Result<String, fmt::Error> {
    let edges: Vec<String> = graph
        .edges()
        .map(|(u, v)| format!("{}-{}", label(u), label(v)))
        .collect();
    let mut out = String::new();
    writeln!(out, "Nodes: {}", graph.node_count())?;
    if edges.is_empty() {
        writeln!(out, "Edges: none")?;
    } else {
        writeln!(out, "Edges: {}", edges.join(", "))?;
    }
    write!(out, "Adjacency matrix:\n{}", graph)?;
    match walk {
        Some(w) => writeln!(out, "Walk: {}", format_labels(w.nodes()))?,
        None => writeln!(out, "Unable to find a walk")?,
    }
    Ok(out)
}

fn render_dot(graph: &Graph, walk: Option<&Walk>) -> Result<String, fmt::Error> {
    let highlighted = walk_edges(walk);
    let mut out = String::from("graph walk {\n    node [shape=circle];\n");
    for node in 0..graph.node_count() {
        writeln!(out, "    {} [label=\"{}\"];", node, label(node))?;
    }
    for (u, v) in graph.edges() {
        if highlighted.contains(&(u, v)) {
            writeln!(out, "    {} -- {} [color={}, penwidth=2];", u, v, WALK_COLOR)?;
        } else {
            writeln!(out, "    {} -- {};", u, v)?;
        }
    }
    out.push_str("}\n");
    Ok(out)
}

/// vis-network data: `nodes` with 1-based labels, `edges` of the original
/// graph, walk edges colored, plus the walk itself (or null).
fn render_json(graph: &Graph, walk: Option<&Walk>) -> Value {
    let highlighted = walk_edges(walk);
    let nodes: Vec<Value> = (0..graph.node_count())
        .map(|n| json!({ "id": n, "label": label(n).to_string() }))
        .collect();
    let edges: Vec<Value> = graph
        .edges()
        .map(|(u, v)| {
            if highlighted.contains(&(u, v)) {
                json!({ "from": u, "to": v, "color": WALK_COLOR, "width": 2 })
            } else {
                json!({ "from": u, "to": v })
            }
        })
        .collect();
    json!({
        "nodes": nodes,
        "edges": edges,
        "walk": walk.map(|w| w.nodes().iter().map(|&n| label(n)).collect::<Vec<_>>()),
    })
}
