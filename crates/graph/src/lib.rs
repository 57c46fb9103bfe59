//! Directed graphs of dependencies
//!
//! This crate provides the in-memory graph model used by the explorer:
//!
//! - [`DirectedGraph`]: adjacency-list digraph that keeps insertion order
//! - [`BreadthFirst`] and [`BoundedBreadthFirst`]: traversal strategies
//!   reporting nodes to a [`Visitor`]
//! - [`DependencyGraphBuilder`]: discovers a graph from a seed entity through
//!   an [`Introspector`], scoped by a [`Validator`]
//!
//! [`DirectedGraph`] implements petgraph's visitor traits when its node type is
//! `Copy`, so it can be handed to layout engines and petgraph algorithms.
//!
//! # Example
//!
//! ```
//! use depgraph_graph::{AcceptAll, BreadthFirst, DependencyGraphBuilder, TraversalStrategy};
//! use std::collections::{HashMap, HashSet};
//!
//! let mut table: HashMap<&str, HashSet<&str>> = HashMap::new();
//! table.insert("app", HashSet::from(["ui", "core"]));
//! table.insert("ui", HashSet::from(["core"]));
//!
//! let graph = DependencyGraphBuilder::new(table, AcceptAll).build("app");
//! assert!(graph.contains_edge(&"ui", &"core"));
//!
//! let mut bfs = BreadthFirst::new(Vec::<&str>::new());
//! bfs.traverse(&graph, &"app").unwrap();
//! assert_eq!(bfs.into_visitor()[0], "app");
//! ```

mod graph;
mod traversal;

pub mod builder;

pub use graph::{DirectedGraph, GraphError};
pub use traversal::{BoundedBreadthFirst, BreadthFirst, TracingVisitor, TraversalStrategy, Visitor};

pub use builder::{
    AcceptAll, AllowList, DependencyGraphBuilder, Facets, GraphSink, Introspector, Validator,
};
