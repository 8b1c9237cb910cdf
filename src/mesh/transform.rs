//! Coordinate transforms.
//!
//! A transform maps each vertex independently to a new position. Topology,
//! cell count, and boundary tags are untouched; nothing checks that the
//! mapped mesh is still valid (a strong enough transform can invert cells).

use super::mesh2d::Mesh2D;
use super::traits::Point;

/// A point-to-point coordinate mapping.
///
/// Implemented by any `Fn(P) -> P`, so plain functions and closures work
/// directly. Implement it by hand for mappings that carry configuration:
///
/// ```
/// use gridkit_rs::mesh::transform::PointMap;
///
/// struct Scale {
///     factor: f64,
/// }
///
/// impl PointMap<[f64; 2]> for Scale {
///     fn map(&self, p: [f64; 2]) -> [f64; 2] {
///         [self.factor * p[0], self.factor * p[1]]
///     }
/// }
/// ```
pub trait PointMap<P: Point> {
    fn map(&self, p: P) -> P;
}

impl<P: Point, F: Fn(P) -> P> PointMap<P> for F {
    fn map(&self, p: P) -> P {
        self(p)
    }
}

/// Apply `map` to every vertex exactly once.
///
/// Vertices are shared between cells, so a vertex on a cell interface moves
/// once, not once per adjacent cell.
pub fn transform(mesh: &mut Mesh2D, map: &impl PointMap<[f64; 2]>) {
    for v in &mut mesh.vertices {
        *v = map.map(*v);
    }
}
