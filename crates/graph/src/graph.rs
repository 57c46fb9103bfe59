use petgraph::visit::{GraphBase, IntoNeighbors, IntoNodeIdentifiers, Visitable};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::iter::Copied;
use std::slice;
use thiserror::Error;

/// Errors raised by graph lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<N>
where
    N: fmt::Debug,
{
    /// The node was never added to the graph
    #[error("node {0:?} not found in graph")]
    NodeNotFound(N),
}

/// Adjacency-list directed graph keyed by node value
///
/// Nodes keep their registration order and each adjacency list keeps the
/// order in which its edges were added. Adding a node or an edge twice is a
/// no-op, and adding an edge registers both of its endpoints.
#[derive(Debug, Clone)]
pub struct DirectedGraph<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    adjacency: Vec<Vec<N>>,
}

impl<N> Default for DirectedGraph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }
}

impl<N> DirectedGraph<N>
where
    N: Clone + Eq + Hash,
{
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, returning `false` if it was already present
    pub fn add_node(&mut self, node: N) -> bool {
        self.slot(node).1
    }

    /// Add the edge `from -> to`, registering both endpoints
    ///
    /// Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, from: N, to: N) -> bool {
        let (source, _) = self.slot(from);
        self.slot(to.clone());

        // Fan-out is expected to stay small, a linear scan is enough
        let neighbours = &mut self.adjacency[source];
        if neighbours.contains(&to) {
            return false;
        }
        neighbours.push(to);
        true
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        self.adjacent(from)
            .is_some_and(|neighbours| neighbours.contains(to))
    }

    /// Ordered copy of the direct successors of `node`
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] if `node` was never added
    pub fn neighbours(&self, node: &N) -> Result<Vec<N>, GraphError<N>>
    where
        N: fmt::Debug,
    {
        self.adjacent(node)
            .map(<[N]>::to_vec)
            .ok_or_else(|| GraphError::NodeNotFound(node.clone()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in registration order
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Every `(from, to)` pair, grouped by source in registration order
    pub fn edges(&self) -> Vec<(N, N)> {
        self.nodes
            .iter()
            .zip(&self.adjacency)
            .flat_map(|(from, neighbours)| {
                neighbours.iter().map(move |to| (from.clone(), to.clone()))
            })
            .collect()
    }

    fn adjacent(&self, node: &N) -> Option<&[N]> {
        self.index
            .get(node)
            .map(|&slot| self.adjacency[slot].as_slice())
    }

    /// Index of `node`, and whether it was inserted by this call
    fn slot(&mut self, node: N) -> (usize, bool) {
        if let Some(&slot) = self.index.get(&node) {
            return (slot, false);
        }
        let slot = self.nodes.len();
        self.nodes.push(node.clone());
        self.adjacency.push(Vec::new());
        self.index.insert(node, slot);
        (slot, true)
    }
}

impl<N> Extend<(N, N)> for DirectedGraph<N>
where
    N: Clone + Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (N, N)>>(&mut self, edges: I) {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }
}

impl<N> FromIterator<(N, N)> for DirectedGraph<N>
where
    N: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (N, N)>>(edges: I) -> Self {
        let mut graph = Self::new();
        graph.extend(edges);
        graph
    }
}

/// One `from --> to` line per edge
impl<N> fmt::Display for DirectedGraph<N>
where
    N: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, neighbours) in self.nodes.iter().zip(&self.adjacency) {
            for to in neighbours {
                writeln!(f, "{from} --> {to}")?;
            }
        }
        Ok(())
    }
}

// petgraph visitor traits, so layout engines and petgraph algorithms can walk
// the graph without copying it

impl<N> GraphBase for DirectedGraph<N>
where
    N: Copy + Eq + Hash,
{
    type EdgeId = (N, N);
    type NodeId = N;
}

impl<'a, N> IntoNeighbors for &'a DirectedGraph<N>
where
    N: Copy + Eq + Hash,
{
    type Neighbors = Copied<slice::Iter<'a, N>>;

    /// Unknown nodes have no neighbours
    fn neighbors(self, node: N) -> Self::Neighbors {
        self.adjacent(&node).unwrap_or(&[]).iter().copied()
    }
}

impl<'a, N> IntoNodeIdentifiers for &'a DirectedGraph<N>
where
    N: Copy + Eq + Hash,
{
    type NodeIdentifiers = Copied<slice::Iter<'a, N>>;

    fn node_identifiers(self) -> Self::NodeIdentifiers {
        self.nodes.iter().copied()
    }
}

impl<N> Visitable for DirectedGraph<N>
where
    N: Copy + Eq + Hash,
{
    type Map = HashSet<N>;

    fn visit_map(&self) -> Self::Map {
        HashSet::with_capacity(self.node_count())
    }

    fn reset_map(&self, map: &mut Self::Map) {
        map.clear();
    }
}
