use graph_walk_core::{InvalidNode, NodeId};

/// Human-facing label of a node (labels start at 1).
pub fn label(node: NodeId) -> usize {
    node + 1
}

/// Parse a 1-based node label into a node index.
pub fn parse_label(s: &str) -> Result<NodeId, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a node number", s.trim()))?;
    value
        .checked_sub(1)
        .ok_or_else(|| "Node indexes must be within a graph range".to_string())
}

/// Parse a line holding exactly two node labels.
pub fn parse_label_pair(line: &str) -> Result<(NodeId, NodeId), String> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(u), Some(v), None) => Ok((parse_label(u)?, parse_label(v)?)),
        _ => Err("Enter two node numbers separated by a space".to_string()),
    }
}

pub fn parse_node_count(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("number of nodes must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid number of nodes", s.trim())),
    }
}

pub fn parse_density(s: &str) -> Result<f64, String> {
    let density: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s.trim()))?;
    if !(0.0..=1.0).contains(&density) {
        return Err(format!("density must be between 0.0 and 1.0, got {}", density));
    }
    Ok(density)
}

/// Message shown before asking for a node pair again.
pub fn reprompt_message(reason: InvalidNode) -> &'static str {
    match reason {
        InvalidNode::SameEndpoints { .. } => "Nodes must be different",
        InvalidNode::OutOfRange { .. } => "Node indexes must be within a graph range",
    }
}

/// Node labels formatted like `[1, 2, 3]`.
pub fn format_labels(nodes: &[NodeId]) -> String {
    let labels: Vec<String> = nodes.iter().map(|&n| label(n).to_string()).collect();
    format!("[{}]", labels.join(", "))
}
