use graph_walk_core::{Graph, WalkFinder, WalkOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200);

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-walk-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all       Run all generators and benchmark each (default)");
        println!("  chain     Simple path 0-1-...-(n-1) (no backtracking)");
        println!("  cycle     Ring; the search runs the long way round");
        println!("  star      Hub with leaves (backtracks out of every leaf)");
        println!("  random    Erdos-Renyi, each pair with probability 0.5");
        println!("  sparse    Erdos-Renyi with ~2 edges per node");
        println!("  barbell   Two dense cliques connected by a thin bridge");
        println!("  grid      Square lattice");
        println!("  split     Two disconnected cliques (no walk exists)");
        println!();
        println!("Default node_count: 200");
        return;
    }

    if node_count < 4 {
        eprintln!("node_count must be at least 4");
        return;
    }

    println!("graph-walk-bench");
    println!("================");
    println!();

    let generators: Vec<(&str, fn(usize) -> Graph)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "cycle" => vec![("Cycle", gen_cycle)],
        "star" => vec![("Star", gen_star)],
        "random" => vec![("Erdos-Renyi p=0.5", gen_random)],
        "sparse" => vec![("Erdos-Renyi sparse", gen_sparse)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "grid" => vec![("Grid lattice", gen_grid)],
        "split" => vec![("Split (two components)", gen_split)],
        "all" => vec![
            ("Chain", gen_chain as fn(usize) -> Graph),
            ("Cycle", gen_cycle),
            ("Star", gen_star),
            ("Erdos-Renyi p=0.5", gen_random),
            ("Erdos-Renyi sparse", gen_sparse),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("Grid lattice", gen_grid),
            ("Split (two components)", gen_split),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(usize) -> Graph, node_count: usize) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}ms — {} nodes, {} edges, ~{:.1}KB",
        gen_time.as_secs_f64() * 1000.0,
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1024.0
    );

    let far_node = graph.node_count() - 1;
    let t = Instant::now();
    let report = match WalkFinder::new().find(&graph, 0, far_node) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Walk search failed: {}", e);
            return;
        }
    };
    let elapsed = t.elapsed();

    println!();
    println!("{:>10} {:>10} {:>12} {:>10}", "hops", "advances", "backtracks", "time");
    println!("{:->10} {:->10} {:->12} {:->10}", "", "", "", "");
    let hops = match &report.outcome {
        WalkOutcome::Found(walk) => walk.hops().to_string(),
        WalkOutcome::NoWalkFound => "none".to_string(),
    };
    println!(
        "{:>10} {:>10} {:>12} {:>8.3}ms",
        hops,
        report.stats.advances,
        report.stats.backtracks,
        elapsed.as_secs_f64() * 1000.0
    );
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic (seeded), single-threaded
// ---------------------------------------------------------------------------

fn connect(graph: &mut Graph, u: usize, v: usize) {
    if u != v {
        // Indices come from the generators' own bounds.
        let _ = graph.add_edge(u, v);
    }
}

fn empty(node_count: usize) -> Graph {
    Graph::new(node_count).unwrap_or_else(|e| panic!("generator: {}", e))
}

fn gen_chain(node_count: usize) -> Graph {
    let mut graph = empty(node_count);
    for i in 0..node_count - 1 {
        connect(&mut graph, i, i + 1);
    }
    graph
}

/// Ring. The scan order takes 0 → 1 first, so the walk to n-1 goes the long way.
fn gen_cycle(node_count: usize) -> Graph {
    let mut graph = gen_chain(node_count);
    connect(&mut graph, node_count - 1, 0);
    graph
}

/// Hub at node 0, target is the last leaf: every earlier leaf is a dead end.
fn gen_star(node_count: usize) -> Graph {
    let mut graph = empty(node_count);
    for leaf in 1..node_count {
        connect(&mut graph, 0, leaf);
    }
    graph
}

fn gen_random(node_count: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(54321);
    Graph::random_with(node_count, 0.5, &mut rng).unwrap_or_else(|e| panic!("generator: {}", e))
}

/// Roughly two edges per node, near the connectivity threshold.
fn gen_sparse(node_count: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(12345);
    let density = (4.0 / node_count as f64).min(1.0);
    Graph::random_with(node_count, density, &mut rng).unwrap_or_else(|e| panic!("generator: {}", e))
}

/// Barbell: two dense random cliques joined by a chain of bridge nodes.
///
/// Node 0 sits in clique A, node n-1 in clique B, so the search has to
/// find the bridge after wandering through A.
fn gen_barbell(node_count: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(99999);
    let bridge_len = (node_count / 10).max(1);
    let clique_size = (node_count - bridge_len) / 2;
    let mut graph = empty(node_count);

    // Clique A: 0..clique_size
    for i in 0..clique_size {
        for j in (i + 1)..clique_size {
            if rng.gen_bool(0.6) {
                connect(&mut graph, i, j);
            }
        }
    }

    // Bridge: chain from the last node of A to the first node of B
    let bridge_start = clique_size;
    connect(&mut graph, clique_size - 1, bridge_start);
    for i in 1..bridge_len {
        connect(&mut graph, bridge_start + i - 1, bridge_start + i);
    }

    // Clique B: remaining nodes
    let b_start = bridge_start + bridge_len;
    let b_size = node_count - b_start;
    connect(&mut graph, b_start - 1, b_start);
    for i in 0..b_size {
        for j in (i + 1)..b_size {
            if rng.gen_bool(0.6) {
                connect(&mut graph, b_start + i, b_start + j);
            }
        }
    }
    // The last node must stay reachable inside B.
    connect(&mut graph, b_start, node_count - 1);

    graph
}

/// Square lattice, row-major, truncated to `node_count` nodes.
fn gen_grid(node_count: usize) -> Graph {
    let side = (node_count as f64).sqrt().ceil() as usize;
    let mut graph = empty(node_count);
    for id in 0..node_count {
        let col = id % side;
        if col + 1 < side && id + 1 < node_count {
            connect(&mut graph, id, id + 1);
        }
        if id + side < node_count {
            connect(&mut graph, id, id + side);
        }
    }
    graph
}

/// Two dense components with node 0 and node n-1 on opposite sides.
fn gen_split(node_count: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(77777);
    let half = node_count / 2;
    let mut graph = empty(node_count);
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let same_side = (i < half) == (j < half);
            if same_side && rng.gen_bool(0.5) {
                connect(&mut graph, i, j);
            }
        }
    }
    graph
}
