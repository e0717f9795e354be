//! graph-walk: build an undirected graph and find a walk between two nodes.
//!
//! Collects the graph and endpoints from flags, environment, or prompts,
//! runs the walk search from graph-walk-core, and prints the original graph
//! with the walk highlighted.

use std::io;

use anyhow::Result;
use clap::Parser;
use graph_walk_core::WalkFinder;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod render;
mod util;

use config::Config;
use input::Prompter;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let request = input::collect_request(&config, &mut prompter)?;

    let finder = WalkFinder::new().with_step_budget(config.step_budget);
    let report = finder.find(&request.graph, request.start, request.end)?;
    info!(
        start = util::label(request.start),
        end = util::label(request.end),
        found = report.outcome.is_found(),
        advances = report.stats.advances,
        backtracks = report.stats.backtracks,
        "graph_walk: search finished"
    );

    let rendered = render::render(config.format, &request.graph, &report.outcome)?;
    prompter.say(rendered.trim_end())?;
    Ok(())
}
