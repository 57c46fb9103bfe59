use crate::{Point, Vec2};
use std::collections::HashMap;
use std::hash::Hash;

/// Golden angle in radians, successive spiral points never line up
pub(crate) const GOLDEN_ANGLE: f32 = 2.399_963;

/// Trait for providing the starting position of each node
pub trait InitialPositions<N> {
    /// Get the position of a node, `None` if it has none
    fn initial_position(&self, node: &N) -> Option<Point>;
}

// Blanket implementation for closures
impl<N, F> InitialPositions<N> for F
where
    F: Fn(&N) -> Point,
{
    fn initial_position(&self, node: &N) -> Option<Point> {
        Some(self(node))
    }
}

// Implementation for HashMap
impl<N: Eq + Hash> InitialPositions<N> for HashMap<N, Point> {
    fn initial_position(&self, node: &N) -> Option<Point> {
        self.get(node).copied()
    }
}

/// Spread nodes on a sunflower spiral filling a disc of `radius` around the origin
///
/// Placement is deterministic and no two nodes share a position, so a layout
/// started from it never begins with coincident nodes.
pub fn spiral_positions<N>(nodes: impl IntoIterator<Item = N>, radius: f32) -> HashMap<N, Point>
where
    N: Eq + Hash,
{
    let nodes: Vec<N> = nodes.into_iter().collect();
    let count = nodes.len() as f32;

    nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            let i = i as f32;
            let distance = radius * ((i + 0.5) / count).sqrt();
            (node, Point::origin() + Vec2::angled(i * GOLDEN_ANGLE) * distance)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_spiral_stays_inside_disc() {
        let positions = spiral_positions(0..50, 10.0);
        assert_eq!(positions.len(), 50);
        for position in positions.values() {
            assert!(position.distance(Point::origin()) <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_spiral_positions_are_distinct() {
        let positions: Vec<Point> = {
            let map = spiral_positions(0..30, 5.0);
            (0..30).map(|i| map[&i]).collect()
        };
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(a.distance(*b) > 1e-3);
            }
        }
    }

    #[test]
    fn test_closure_and_map_providers() {
        let closure = |node: &u8| Point::new(f32::from(*node), 0.0);
        assert_eq!(closure.initial_position(&3), Some(Point::new(3.0, 0.0)));

        let map = HashMap::from([("a", Point::new(1.0, 1.0))]);
        assert_eq!(map.initial_position(&"a"), Some(Point::new(1.0, 1.0)));
        assert_eq!(map.initial_position(&"b"), None);
    }
}
