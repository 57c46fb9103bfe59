use crate::{DirectedGraph, GraphError};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;
use tracing::{info, trace};

/// Callback invoked for every node a traversal reaches
pub trait Visitor<N> {
    fn visit(&mut self, node: &N);
}

// Blanket implementation for closures
impl<N, F> Visitor<N> for F
where
    F: FnMut(&N),
{
    fn visit(&mut self, node: &N) {
        self(node);
    }
}

/// Records visits in order
impl<N: Clone> Visitor<N> for Vec<N> {
    fn visit(&mut self, node: &N) {
        self.push(node.clone());
    }
}

/// Logs every visited node at `info` level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingVisitor;

impl<N: fmt::Debug> Visitor<N> for TracingVisitor {
    fn visit(&mut self, node: &N) {
        info!(?node, "Visited node");
    }
}

/// A way of walking a graph from a start node, reporting nodes to a visitor
pub trait TraversalStrategy<N>
where
    N: fmt::Debug,
{
    /// Walk `graph` starting at `start`
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] if `start` is not in the graph
    fn traverse(&mut self, graph: &DirectedGraph<N>, start: &N) -> Result<(), GraphError<N>>;
}

/// Breadth-first traversal visiting every reachable node exactly once
#[derive(Debug, Clone)]
pub struct BreadthFirst<V> {
    visitor: V,
}

impl<V> BreadthFirst<V> {
    pub fn new(visitor: V) -> Self {
        Self { visitor }
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }
}

impl<N, V> TraversalStrategy<N> for BreadthFirst<V>
where
    N: Clone + Eq + Hash + fmt::Debug,
    V: Visitor<N>,
{
    fn traverse(&mut self, graph: &DirectedGraph<N>, start: &N) -> Result<(), GraphError<N>> {
        if !graph.contains_node(start) {
            return Err(GraphError::NodeNotFound(start.clone()));
        }
        trace!(?start, "Starting breadth-first traversal");

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(node) = queue.pop_front() {
            if visited.contains(&node) {
                continue;
            }

            self.visitor.visit(&node);
            queue.extend(graph.neighbours(&node)?);
            visited.insert(node);
        }

        Ok(())
    }
}

/// Breadth-first traversal limited to `max_depth` levels
///
/// Nodes are not deduplicated, so a node reachable through several paths is
/// visited once per path, and cycles repeat until the depth limit. The whole
/// traversal stops at the first dequeued entry whose depth reached the limit.
#[derive(Debug, Clone)]
pub struct BoundedBreadthFirst<V> {
    visitor: V,
    max_depth: usize,
}

impl<V> BoundedBreadthFirst<V> {
    pub fn new(visitor: V, max_depth: usize) -> Self {
        Self { visitor, max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }
}

impl<N, V> TraversalStrategy<N> for BoundedBreadthFirst<V>
where
    N: Clone + Eq + Hash + fmt::Debug,
    V: Visitor<N>,
{
    fn traverse(&mut self, graph: &DirectedGraph<N>, start: &N) -> Result<(), GraphError<N>> {
        if self.max_depth == 0 {
            return Ok(());
        }
        if !graph.contains_node(start) {
            return Err(GraphError::NodeNotFound(start.clone()));
        }
        trace!(?start, max_depth = self.max_depth, "Starting bounded breadth-first traversal");

        let mut queue = VecDeque::from([(start.clone(), 0)]);

        while let Some((node, depth)) = queue.pop_front() {
            // Entries are queued in non-decreasing depth order, so nothing
            // behind the first entry at the limit can be shallower
            if depth >= self.max_depth {
                trace!(?node, depth, "Depth limit reached, stopping traversal");
                break;
            }

            self.visitor.visit(&node);
            queue.extend(
                graph
                    .neighbours(&node)?
                    .into_iter()
                    .map(|neighbour| (neighbour, depth + 1)),
            );
        }

        Ok(())
    }
}
