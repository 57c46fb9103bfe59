mod forces;
mod simulation;

use crate::executor::Adaptive;
use crate::{InitialPositions, LayoutEngine, Point};
use petgraph::visit::{IntoNeighbors, IntoNodeIdentifiers};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

pub use simulation::ForceSimulation;

/// Errors that can occur when setting up a force-directed layout
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError<N>
where
    N: fmt::Debug,
{
    /// The canvas area must be a positive finite number
    #[error("canvas area must be positive and finite, got {0}")]
    InvalidArea(f32),

    /// A node has no initial position
    #[error("node {0:?} has no initial position")]
    MissingPosition(N),

    /// A node was given a non-finite initial position
    #[error("node {0:?} has a non-finite initial position")]
    InvalidPosition(N),

    /// An edge references a node that is not part of the layout
    #[error("edge endpoint {0:?} is not part of the layout")]
    UnknownEndpoint(N),
}

/// Configuration for the force-directed (Fruchterman-Reingold style) layout
#[derive(Debug, Clone)]
pub struct ForceDirectedLayout {
    /// Canvas area the layout spreads over, sets the ideal edge length
    pub area: f32,

    /// Number of ticks run by [`LayoutEngine::layout`]
    pub iterations: usize,

    /// Node count from which the repulsion pass runs in parallel
    pub parallel_threshold: usize,
}

impl Default for ForceDirectedLayout {
    fn default() -> Self {
        Self {
            area: 100.0,
            iterations: 500,
            parallel_threshold: Adaptive::default().threshold,
        }
    }
}

impl ForceDirectedLayout {
    /// Create a new force-directed layout over the given canvas area
    pub fn new(area: f32) -> Self {
        Self {
            area,
            ..Default::default()
        }
    }

    pub fn executor(&self) -> Adaptive {
        Adaptive {
            threshold: self.parallel_threshold,
        }
    }

    /// Start a tick-by-tick session for `graph`
    ///
    /// Use this when positions are consumed between steps, e.g. one tick per
    /// rendered frame.
    ///
    /// # Errors
    /// Returns an error if a node has no initial position, or if the
    /// configured area is invalid
    pub fn simulation<G, P>(
        &self,
        graph: G,
        initial: &P,
    ) -> Result<ForceSimulation<G::NodeId>, LayoutError<G::NodeId>>
    where
        G: IntoNodeIdentifiers + IntoNeighbors,
        G::NodeId: Eq + Hash + fmt::Debug,
        P: InitialPositions<G::NodeId>,
    {
        let nodes = graph
            .node_identifiers()
            .map(|node| {
                initial
                    .initial_position(&node)
                    .map(|position| (node, position))
                    .ok_or(LayoutError::MissingPosition(node))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edges: Vec<_> = graph
            .node_identifiers()
            .flat_map(move |node| graph.neighbors(node).map(move |next| (node, next)))
            .collect();

        ForceSimulation::new(nodes, edges, self.area, self.executor())
    }
}

// Implement LayoutEngine for any graph with the required capabilities
impl<G> LayoutEngine<G> for ForceDirectedLayout
where
    G: IntoNodeIdentifiers + IntoNeighbors,
    G::NodeId: Eq + Hash + fmt::Debug,
{
    type NodeId = G::NodeId;
    type Error = LayoutError<G::NodeId>;

    fn layout<P>(&self, graph: G, initial: &P) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        P: InitialPositions<Self::NodeId>,
    {
        let mut simulation = self.simulation(graph, initial)?;
        simulation.run(self.iterations);
        Ok(simulation.into_positions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spiral_positions;
    use petgraph::graphmap::DiGraphMap;
    use test_log::test;

    fn sample() -> DiGraphMap<u32, ()> {
        DiGraphMap::from_edges([(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)])
    }

    #[test]
    fn test_layout_petgraph_graph() {
        let graph = sample();
        let initial = spiral_positions(graph.nodes(), 10.0);
        let layout = ForceDirectedLayout {
            iterations: 100,
            ..Default::default()
        };

        let positions = layout.layout(&graph, &initial).unwrap();

        assert_eq!(positions.len(), 5);
        assert!(positions.values().all(|p| p.is_finite()));
    }

    #[test]
    fn test_simulation_from_graph() {
        let graph = sample();
        let initial = spiral_positions(graph.nodes(), 10.0);

        let simulation = ForceDirectedLayout::new(25.0)
            .simulation(&graph, &initial)
            .unwrap();

        assert_eq!(simulation.node_count(), 5);
        assert_eq!(simulation.edge_count(), 5);
        assert!((simulation.ideal_edge_length() - 5.0_f32.sqrt()).abs() < 1e-6);
        assert_eq!(simulation.position(&3), initial.get(&3).copied());
    }

    #[test]
    fn test_missing_initial_position() {
        let graph = sample();
        let initial: HashMap<u32, Point> = HashMap::from([(0, Point::origin())]);

        let result = ForceDirectedLayout::default().layout(&graph, &initial);

        assert!(matches!(result, Err(LayoutError::MissingPosition(1))));
    }

    #[test]
    fn test_zero_iterations_keeps_initial_positions() {
        let graph = sample();
        let initial = |node: &u32| Point::new(*node as f32, 0.0);
        let layout = ForceDirectedLayout {
            iterations: 0,
            ..Default::default()
        };

        let positions = layout.layout(&graph, &initial).unwrap();

        for (node, position) in positions {
            assert_eq!(position, Point::new(node as f32, 0.0));
        }
    }

    #[test]
    fn test_invalid_area_is_reported() {
        let graph = sample();
        let initial = spiral_positions(graph.nodes(), 10.0);
        let result = ForceDirectedLayout::new(-4.0).layout(&graph, &initial);
        assert_eq!(result, Err(LayoutError::InvalidArea(-4.0)));
    }
}
