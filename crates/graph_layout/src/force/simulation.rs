use super::forces::{attraction, repulsion};
use super::LayoutError;
use crate::executor::{Adaptive, NodeExecutor};
use crate::{Point, Vec2};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// A running force-directed layout
///
/// Holds a position and a displacement per node. Each [`tick`](Self::tick)
/// moves every node one unit step along its net force: edges pull their
/// endpoints together and every pair of nodes pushes apart. There is no
/// convergence detection, callers decide how many ticks to run.
#[derive(Debug, Clone)]
pub struct ForceSimulation<N, E = Adaptive> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    positions: Vec<Point>,
    displacements: Vec<Vec2>,
    edges: Vec<(usize, usize)>,
    k: f32,
    ticks: usize,
    executor: E,
}

impl<N, E> ForceSimulation<N, E>
where
    N: Clone + Eq + Hash + fmt::Debug,
    E: NodeExecutor,
{
    /// Start a layout session over `area` square units of canvas
    ///
    /// The ideal edge length is `sqrt(area / node_count)`. A node listed twice
    /// keeps its last position.
    ///
    /// # Errors
    /// Returns an error if `area` is not a positive finite number, if a position
    /// is not finite, or if an edge references a node without a position
    pub fn new(
        nodes: impl IntoIterator<Item = (N, Point)>,
        edges: impl IntoIterator<Item = (N, N)>,
        area: f32,
        executor: E,
    ) -> Result<Self, LayoutError<N>> {
        if !area.is_finite() || area <= 0.0 {
            return Err(LayoutError::InvalidArea(area));
        }

        let mut simulation = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            positions: Vec::new(),
            displacements: Vec::new(),
            edges: Vec::new(),
            k: 0.0,
            ticks: 0,
            executor,
        };

        for (node, position) in nodes {
            if !position.is_finite() {
                return Err(LayoutError::InvalidPosition(node));
            }
            match simulation.index.get(&node) {
                Some(&slot) => simulation.positions[slot] = position,
                None => {
                    simulation.index.insert(node.clone(), simulation.nodes.len());
                    simulation.nodes.push(node);
                    simulation.positions.push(position);
                    simulation.displacements.push(Vec2::zero());
                }
            }
        }

        for (from, to) in edges {
            let source = simulation.slot(&from)?;
            let target = simulation.slot(&to)?;
            simulation.edges.push((source, target));
        }

        simulation.k = (area / simulation.nodes.len().max(1) as f32).sqrt();
        debug!(
            nodes = simulation.nodes.len(),
            edges = simulation.edges.len(),
            k = simulation.k,
            "Created force simulation"
        );

        Ok(simulation)
    }

    /// Advance the layout by one step
    pub fn tick(&mut self) {
        let k = self.k;
        let positions = &self.positions;

        // Repulsion only reads positions and writes the node's own slot
        self.executor
            .for_each_node(&mut self.displacements, |v, displacement| {
                *displacement = repulsion(v, positions, k);
            });

        // Edges sharing an endpoint write the same slot, keep this sequential
        for &(source, target) in &self.edges {
            let force = attraction(positions[source], positions[target], k);
            self.displacements[target] -= force;
            self.displacements[source] += force;
        }

        for (position, displacement) in self.positions.iter_mut().zip(&mut self.displacements) {
            *position += displacement.normalized();
            *displacement = Vec2::zero();
        }

        self.ticks += 1;
        trace!(tick = self.ticks, "Force simulation tick");
    }

    /// Run `ticks` steps
    pub fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    fn slot(&self, node: &N) -> Result<usize, LayoutError<N>> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| LayoutError::UnknownEndpoint(node.clone()))
    }
}

impl<N, E> ForceSimulation<N, E>
where
    N: Eq + Hash,
{
    /// Ideal edge length `k`
    pub fn ideal_edge_length(&self) -> f32 {
        self.k
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn position(&self, node: &N) -> Option<Point> {
        self.index.get(node).map(|&slot| self.positions[slot])
    }

    /// Pending displacement of a node, zero between ticks
    pub fn displacement(&self, node: &N) -> Option<Vec2> {
        self.index.get(node).map(|&slot| self.displacements[slot])
    }

    /// Nodes with their current positions, in insertion order
    pub fn positions(&self) -> impl Iterator<Item = (&N, Point)> + '_ {
        self.nodes.iter().zip(self.positions.iter().copied())
    }

    /// Edges as `(from, to)` pairs, for drawing
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.edges
            .iter()
            .map(|&(source, target)| (&self.nodes[source], &self.nodes[target]))
    }

    /// End the session, keeping the final positions
    pub fn into_positions(self) -> HashMap<N, Point> {
        self.nodes.into_iter().zip(self.positions).collect()
    }
}
