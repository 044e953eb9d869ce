//! Sphere Layout: Fibonacci-sphere placement of sibling nodes.
//!
//! Index i of n walks y from +R to −R in equal steps while the azimuth
//! advances by the golden angle, which spreads points evenly with no
//! clustering at the poles. Positions depend only on (i, n, R); inserting a
//! sibling shifts every later ordinal and therefore moves existing nodes.

use glam::Vec3;

use crate::fast_math::{fma, GOLDEN_ANGLE};
use crate::model::{Node, NodeId};

/// A node with its position for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: NodeId,
    pub name: String,
    pub color: crate::color::Rgba,
    pub position: Vec3,
}

/// Point `i` of an `n`-point Fibonacci sphere of radius `radius`.
///
/// `n == 1` is pinned to (0, 0, R), straight in front of the root camera.
pub fn fibonacci_point(i: usize, n: usize, radius: f32) -> Vec3 {
    if n == 1 {
        return Vec3::new(0.0, 0.0, radius);
    }
    let denom = (n.saturating_sub(1)).max(1) as f32;
    let y_norm = 1.0 - (i as f32 / denom) * 2.0;
    // Clamp guards tiny negative values from rounding at the poles
    let radius_at_y = fma(-y_norm, y_norm, 1.0).max(0.0).sqrt();
    let theta = GOLDEN_ANGLE * i as f32;
    Vec3::new(
        radius * radius_at_y * theta.cos(),
        radius * y_norm,
        radius * radius_at_y * theta.sin(),
    )
}

/// All `n` points of the sphere, in index order. Empty for `n == 0`.
pub fn fibonacci_sphere(n: usize, radius: f32) -> Vec<Vec3> {
    (0..n).map(|i| fibonacci_point(i, n, radius)).collect()
}

/// Place an ordered sibling list on the sphere.
///
/// Non-finite positions (e.g. a NaN radius) are dropped instead of being
/// handed to the renderer.
pub fn place_nodes(siblings: &[&Node], radius: f32) -> Vec<PlacedNode> {
    let n = siblings.len();
    siblings
        .iter()
        .enumerate()
        .filter_map(|(i, node)| {
            let position = fibonacci_point(i, n, radius);
            if !position.is_finite() {
                log::warn!("skipping node {}: non-finite position", node.id);
                return None;
            }
            Some(PlacedNode {
                id: node.id.clone(),
                name: node.name.clone(),
                color: node.color,
                position,
            })
        })
        .collect()
}
