use crate::positions::GOLDEN_ANGLE;
use crate::{Point, Vec2};

/// Separations shorter than this are treated as this long when computing the
/// repulsion magnitude
pub(crate) const MIN_DISTANCE: f32 = 0.01;

/// Net repulsion on node `v` from every other node
pub(crate) fn repulsion(v: usize, positions: &[Point], k: f32) -> Vec2 {
    let position = positions[v];
    positions
        .iter()
        .enumerate()
        .filter(|&(u, _)| u != v)
        .fold(Vec2::zero(), |total, (u, &other)| {
            total + repulsive_force(v, u, position - other, k)
        })
}

/// Force pushing `v` away from `u`, where `delta` is `pos(v) - pos(u)`
///
/// Magnitude is `k² / |delta|`. Coincident nodes get a fixed direction picked
/// from their indices, opposite for the two nodes of the pair.
fn repulsive_force(v: usize, u: usize, delta: Vec2, k: f32) -> Vec2 {
    let distance = delta.length();
    let direction = if distance > f32::EPSILON {
        delta / distance
    } else {
        separation(v, u)
    };
    direction * (k * k / distance.max(MIN_DISTANCE))
}

/// Force pulling the edge source towards its target
///
/// Magnitude is `|delta|² / k`. Added to the source and subtracted from the
/// target.
pub(crate) fn attraction(from: Point, to: Point, k: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    delta.normalized() * (distance * distance / k)
}

fn separation(v: usize, u: usize) -> Vec2 {
    let (low, high) = (v.min(u), v.max(u));
    let direction = Vec2::angled((low * 31 + high) as f32 * GOLDEN_ANGLE);
    if v < u {
        direction
    } else {
        -direction
    }
}
