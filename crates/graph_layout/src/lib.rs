//! Force-directed graph layout
//!
//! This crate computes 2D positions for graph nodes with a spring model:
//! edges attract their endpoints and every pair of nodes repels. It works
//! with any graph implementing petgraph's visitor traits.
//!
//! # Layout Engines
//!
//! - [`ForceDirectedLayout`]: Fruchterman-Reingold style layout, either run
//!   to completion through [`LayoutEngine`] or stepped frame by frame through
//!   a [`ForceSimulation`]
//!
//! # Example
//!
//! ```
//! use graph_layout::{spiral_positions, ForceDirectedLayout, LayoutEngine};
//! use petgraph::graphmap::DiGraphMap;
//!
//! // Create a graph
//! let mut graph = DiGraphMap::<u32, ()>::new();
//! graph.add_edge(1, 2, ());
//! graph.add_edge(2, 3, ());
//!
//! // Spread the nodes out to start from
//! let initial = spiral_positions(graph.nodes(), 10.0);
//!
//! // Use the LayoutEngine trait (simple, runs every iteration):
//! let engine = ForceDirectedLayout::new(100.0);
//! let positions = engine.layout(&graph, &initial).unwrap();
//!
//! // Or step the simulation yourself, e.g. once per rendered frame
//! let mut simulation = engine.simulation(&graph, &initial).unwrap();
//! simulation.tick();
//! let frame: Vec<_> = simulation.positions().collect();
//! ```

mod engine;
mod geometry;
mod positions;

pub mod executor;
pub mod force;

// Re-export core types and traits
pub use engine::LayoutEngine;
pub use geometry::{Point, Vec2};
pub use positions::{spiral_positions, InitialPositions};

// Re-export petgraph visitor traits for graph abstraction
pub use petgraph::visit::{GraphBase, IntoNeighbors, IntoNodeIdentifiers};

// Re-export force-directed layout types
pub use executor::{Adaptive, NodeExecutor, Parallel, Sequential};
pub use force::{ForceDirectedLayout, ForceSimulation, LayoutError};
