use crate::{InitialPositions, Point};
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that can compute positions for graph nodes
///
/// This trait is generic over the graph type `G`, allowing different layout
/// engines to work with different graph requirements. The force-directed
/// engine accepts any graph exposing petgraph's `IntoNodeIdentifiers` and
/// `IntoNeighbors`.
pub trait LayoutEngine<G> {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Eq + Hash;

    /// The error returned when a layout cannot be computed
    type Error;

    /// Compute node positions for the given graph, starting from `initial`
    ///
    /// # Errors
    /// Returns an error if the layout computation fails (e.g., a node has no
    /// initial position, or the engine configuration is invalid)
    fn layout<P>(&self, graph: G, initial: &P) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        P: InitialPositions<Self::NodeId>;
}
