mod manifest;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use depgraph_graph::{
    AllowList, BoundedBreadthFirst, BreadthFirst, DependencyGraphBuilder, DirectedGraph,
    TraversalStrategy,
};
use graph_layout::{
    spiral_positions, ForceDirectedLayout, ForceSimulation, NodeExecutor, Point,
    Sequential,
};
use manifest::{Manifest, SAMPLE_ROOT};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Discover a dependency graph and lay it out with a spring simulation
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// RON map of entity to dependencies, the built-in sample tree when omitted
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Entity to start discovery from
    #[arg(long)]
    root: Option<String>,

    /// Entity in scope, repeatable; every entity of the manifest when omitted
    #[arg(long = "allow")]
    allowed: Vec<String>,

    /// Also list the entities within this many breadth-first levels of the root
    #[arg(long)]
    depth: Option<usize>,

    /// Number of layout ticks
    #[arg(long, default_value_t = ForceDirectedLayout::default().iterations)]
    iterations: usize,

    /// Canvas area the layout spreads over
    #[arg(long, default_value_t = ForceDirectedLayout::default().area)]
    area: f32,

    /// Radius of the disc the nodes start in
    #[arg(long, default_value_t = 10.0)]
    radius: f32,

    /// Run the repulsion pass on the calling thread only
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let (manifest, root) = match &args.manifest {
        Some(path) => {
            let Some(root) = args.root.clone() else {
                bail!("--root is required with --manifest");
            };
            (Manifest::load(path)?, root)
        }
        None => (
            Manifest::sample(),
            args.root.clone().unwrap_or_else(|| SAMPLE_ROOT.to_string()),
        ),
    };

    let in_scope = if args.allowed.is_empty() {
        AllowList::new(manifest.entities())
    } else {
        AllowList::new(args.allowed.iter().cloned())
    };

    let mut builder = DependencyGraphBuilder::new(manifest.into_table(), in_scope);
    let graph = builder.build(root.clone());
    if graph.is_empty() {
        bail!("root entity {root:?} is not in scope");
    }
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Discovered dependency graph"
    );

    println!("Dependencies:");
    print!("{graph}");

    let mut reachable = BreadthFirst::new(Vec::<String>::new());
    reachable.traverse(&graph, &root)?;
    println!("\nBreadth-first order: {}", reachable.into_visitor().join(", "));

    if let Some(depth) = args.depth {
        let mut nearby = BoundedBreadthFirst::new(Vec::<String>::new(), depth);
        nearby.traverse(&graph, &root)?;
        println!("Within depth {depth}: {}", nearby.into_visitor().join(", "));
    }

    let positions = if args.sequential {
        lay_out(&graph, &args, Sequential)?
    } else {
        lay_out(&graph, &args, ForceDirectedLayout::default().executor())?
    };

    println!("\nPositions after {} ticks:", args.iterations);
    for node in graph.nodes() {
        let position = positions[node];
        println!("{node:>12} ({:>8.3}, {:>8.3})", position.x, position.y);
    }

    Ok(())
}

fn lay_out<E: NodeExecutor>(
    graph: &DirectedGraph<String>,
    args: &Args,
    executor: E,
) -> Result<HashMap<String, Point>> {
    let initial = spiral_positions(graph.nodes().iter().cloned(), args.radius);
    let nodes = graph
        .nodes()
        .iter()
        .map(|node| (node.clone(), initial[node]));

    let mut simulation = ForceSimulation::new(nodes, graph.edges(), args.area, executor)
        .context("starting layout")?;
    debug!(k = simulation.ideal_edge_length(), "Running layout");
    simulation.run(args.iterations);

    Ok(simulation.into_positions())
}
