//! Curved boundary descriptions for refinement.
//!
//! When a boundary edge is split during refinement, the new midpoint vertex
//! normally sits on the straight chord between the edge endpoints. For meshes
//! approximating curved domains that flattens the boundary a little more with
//! every refinement. A [`BoundaryShape`] places the midpoint on the true
//! curve instead.
//!
//! Shapes are associated with boundary tags through a [`BoundaryShapes`]
//! registry owned by the caller and passed by reference into refinement, so
//! an association can never outlive the shape it points to. Use
//! [`BoundaryShapes::detach`] to drop an association once refinement under it
//! is done.

use std::collections::HashMap;

use super::boundary_tags::BoundaryTag;

/// Placement rule for new vertices on a curved boundary.
pub trait BoundaryShape {
    /// Position for a vertex inserted between two boundary vertices.
    ///
    /// `a` and `b` are the coordinates of the edge endpoints; the returned
    /// point replaces the straight chord midpoint.
    fn midpoint(&self, a: [f64; 2], b: [f64; 2]) -> [f64; 2];
}

/// Circular boundary: midpoints are pushed radially onto the circle.
#[derive(Clone, Copy, Debug)]
pub struct CircleBoundary {
    /// Circle center
    pub center: [f64; 2],
    /// Circle radius
    pub radius: f64,
}

impl CircleBoundary {
    pub fn new(center: [f64; 2], radius: f64) -> Self {
        Self { center, radius }
    }
}

impl BoundaryShape for CircleBoundary {
    fn midpoint(&self, a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
        let mx = 0.5 * (a[0] + b[0]) - self.center[0];
        let my = 0.5 * (a[1] + b[1]) - self.center[1];
        let len = (mx * mx + my * my).sqrt();
        if len < 1e-14 {
            // Chord through the center: no radial direction to project along.
            return [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1])];
        }
        let s = self.radius / len;
        [self.center[0] + s * mx, self.center[1] + s * my]
    }
}

/// Registry associating boundary tags with curved boundary shapes.
#[derive(Default)]
pub struct BoundaryShapes {
    shapes: HashMap<BoundaryTag, Box<dyn BoundaryShape>>,
}

impl BoundaryShapes {
    /// Create an empty registry. Refinement under an empty registry places
    /// every midpoint on the straight chord.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a shape with a boundary tag, replacing any previous one.
    pub fn attach<S: BoundaryShape + 'static>(&mut self, tag: BoundaryTag, shape: S) {
        self.shapes.insert(tag, Box::new(shape));
    }

    /// Remove the association for a tag. Returns `true` if one existed.
    pub fn detach(&mut self, tag: BoundaryTag) -> bool {
        self.shapes.remove(&tag).is_some()
    }

    /// Look up the shape attached to a tag, if any.
    pub fn get(&self, tag: BoundaryTag) -> Option<&dyn BoundaryShape> {
        self.shapes.get(&tag).map(|s| s.as_ref())
    }

    /// Number of attached shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if no shapes are attached.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_circle_midpoint_on_circle() {
        let circle = CircleBoundary::new([0.0, 0.0], 1.0);
        let m = circle.midpoint([1.0, 0.0], [0.0, 1.0]);

        let r = (m[0] * m[0] + m[1] * m[1]).sqrt();
        assert!((r - 1.0).abs() < TOL);
        // Symmetric chord: midpoint lands at 45 degrees
        assert!((m[0] - m[1]).abs() < TOL);
        assert!(m[0] > 0.0);
    }

    #[test]
    fn test_circle_midpoint_offset_center() {
        let circle = CircleBoundary::new([2.0, -1.0], 0.5);
        let a = [2.5, -1.0];
        let b = [2.0, -0.5];
        let m = circle.midpoint(a, b);

        let dx = m[0] - 2.0;
        let dy = m[1] + 1.0;
        assert!((dx * dx + dy * dy).sqrt() - 0.5 < TOL);
    }

    #[test]
    fn test_circle_degenerate_chord_through_center() {
        let circle = CircleBoundary::new([0.0, 0.0], 1.0);
        let m = circle.midpoint([-1.0, 0.0], [1.0, 0.0]);
        // Falls back to the chord midpoint
        assert!(m[0].abs() < TOL);
        assert!(m[1].abs() < TOL);
    }

    #[test]
    fn test_registry_attach_get_detach() {
        let mut shapes = BoundaryShapes::new();
        assert!(shapes.is_empty());
        assert!(shapes.get(BoundaryTag(1)).is_none());

        shapes.attach(BoundaryTag(1), CircleBoundary::new([0.0, 0.0], 0.25));
        assert_eq!(shapes.len(), 1);
        assert!(shapes.get(BoundaryTag(1)).is_some());
        assert!(shapes.get(BoundaryTag(0)).is_none());

        assert!(shapes.detach(BoundaryTag(1)));
        assert!(!shapes.detach(BoundaryTag(1)));
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_registry_replace_shape() {
        let mut shapes = BoundaryShapes::new();
        shapes.attach(BoundaryTag(1), CircleBoundary::new([0.0, 0.0], 1.0));
        shapes.attach(BoundaryTag(1), CircleBoundary::new([0.0, 0.0], 2.0));
        assert_eq!(shapes.len(), 1);

        let m = shapes
            .get(BoundaryTag(1))
            .unwrap()
            .midpoint([2.0, 0.0], [0.0, 2.0]);
        let r = (m[0] * m[0] + m[1] * m[1]).sqrt();
        assert!((r - 2.0).abs() < TOL);
    }
}
