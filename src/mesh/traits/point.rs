//! Coordinate type abstractions for dimension-independent mesh operations.
//!
//! The [`Point`] trait provides a unified interface for coordinates in 2D and 3D.
//! This enables generic algorithms (reporting, plotting) that work across dimensions.

use std::fmt::Debug;

/// A point in physical space.
///
/// This trait abstracts over different coordinate representations:
/// - 2D: `[f64; 2]`
/// - 3D: `[f64; 3]`
///
/// # Example
/// ```
/// use gridkit_rs::mesh::Point;
///
/// fn distance_from_origin<P: Point>(p: &P) -> f64 {
///     p.norm()
/// }
///
/// assert!((distance_from_origin(&[3.0, 4.0]) - 5.0).abs() < 1e-10);
/// assert!((distance_from_origin(&[2.0, 3.0, 6.0]) - 7.0).abs() < 1e-10);
/// ```
pub trait Point: Copy + Clone + Debug + Default + Send + Sync + 'static {
    /// Spatial dimension (2 or 3).
    const DIM: usize;

    /// Access coordinate by index.
    ///
    /// # Panics
    /// Panics if `idx >= Self::DIM`.
    fn coord(&self, idx: usize) -> f64;

    /// Create a point from a slice of coordinates.
    ///
    /// # Panics
    /// Panics if `coords.len() < Self::DIM`.
    fn from_slice(coords: &[f64]) -> Self;

    /// Create a point with all coordinates set to zero.
    fn zero() -> Self {
        Self::default()
    }

    // =========================================================================
    // Arithmetic Operations
    // =========================================================================

    /// Add two points component-wise: self + other
    fn add(&self, other: &Self) -> Self {
        let mut coords = [0.0; 3];
        for i in 0..Self::DIM {
            coords[i] = self.coord(i) + other.coord(i);
        }
        Self::from_slice(&coords[..Self::DIM])
    }

    /// Subtract two points component-wise: self - other
    fn sub(&self, other: &Self) -> Self {
        let mut coords = [0.0; 3];
        for i in 0..Self::DIM {
            coords[i] = self.coord(i) - other.coord(i);
        }
        Self::from_slice(&coords[..Self::DIM])
    }

    /// Scale a point by a scalar: c * self
    fn scale(&self, c: f64) -> Self {
        let mut coords = [0.0; 3];
        for i in 0..Self::DIM {
            coords[i] = c * self.coord(i);
        }
        Self::from_slice(&coords[..Self::DIM])
    }

    /// Dot product of two points.
    fn dot(&self, other: &Self) -> f64 {
        let mut sum = 0.0;
        for i in 0..Self::DIM {
            sum += self.coord(i) * other.coord(i);
        }
        sum
    }

    /// Euclidean norm (magnitude) of the point.
    fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Squared Euclidean norm (avoids sqrt for comparisons).
    fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Distance between two points.
    fn distance(&self, other: &Self) -> f64 {
        self.sub(other).norm()
    }

    /// Midpoint between two points.
    fn midpoint(&self, other: &Self) -> Self {
        self.add(other).scale(0.5)
    }
}

// =============================================================================
// 2D Implementation: [f64; 2]
// =============================================================================

impl Point for [f64; 2] {
    const DIM: usize = 2;

    #[inline]
    fn coord(&self, idx: usize) -> f64 {
        self[idx]
    }

    #[inline]
    fn from_slice(coords: &[f64]) -> Self {
        [coords[0], coords[1]]
    }

    #[inline]
    fn zero() -> Self {
        [0.0, 0.0]
    }
}

// =============================================================================
// 3D Implementation: [f64; 3]
// =============================================================================

impl Point for [f64; 3] {
    const DIM: usize = 3;

    #[inline]
    fn coord(&self, idx: usize) -> f64 {
        self[idx]
    }

    #[inline]
    fn from_slice(coords: &[f64]) -> Self {
        [coords[0], coords[1], coords[2]]
    }

    #[inline]
    fn zero() -> Self {
        [0.0, 0.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    #[test]
    fn test_point_2d_array() {
        let p: [f64; 2] = [1.0, 2.0];
        assert_eq!(<[f64; 2]>::DIM, 2);
        assert_eq!(p.coord(0), 1.0);
        assert_eq!(p.coord(1), 2.0);
        assert_eq!(<[f64; 2]>::from_slice(&[3.0, 4.0]), [3.0, 4.0]);
        assert_eq!(<[f64; 2]>::zero(), [0.0, 0.0]);
    }

    #[test]
    fn test_point_3d() {
        let p: [f64; 3] = [1.0, 2.0, 3.0];
        assert_eq!(<[f64; 3]>::DIM, 3);
        assert_eq!(p.coord(0), 1.0);
        assert_eq!(p.coord(1), 2.0);
        assert_eq!(p.coord(2), 3.0);
        assert_eq!(<[f64; 3]>::from_slice(&[4.0, 5.0, 6.0]), [4.0, 5.0, 6.0]);
    }

    #[test]
    #[should_panic]
    fn test_point_2d_out_of_bounds() {
        let p: [f64; 2] = [1.0, 2.0];
        let _ = p.coord(2);
    }

    // =========================================================================
    // Arithmetic Operation Tests
    // =========================================================================

    #[test]
    fn test_add_2d() {
        let a: [f64; 2] = [1.0, 2.0];
        let b: [f64; 2] = [3.0, 4.0];
        let c = a.add(&b);
        assert!((c[0] - 4.0).abs() < TOL);
        assert!((c[1] - 6.0).abs() < TOL);
    }

    #[test]
    fn test_add_3d() {
        let a: [f64; 3] = [1.0, 2.0, 3.0];
        let b: [f64; 3] = [4.0, 5.0, 6.0];
        let c = a.add(&b);
        assert!((c[0] - 5.0).abs() < TOL);
        assert!((c[1] - 7.0).abs() < TOL);
        assert!((c[2] - 9.0).abs() < TOL);
    }

    #[test]
    fn test_sub_2d() {
        let a: [f64; 2] = [5.0, 7.0];
        let b: [f64; 2] = [2.0, 3.0];
        let c = a.sub(&b);
        assert!((c[0] - 3.0).abs() < TOL);
        assert!((c[1] - 4.0).abs() < TOL);
    }

    #[test]
    fn test_scale_2d() {
        let a: [f64; 2] = [2.0, 3.0];
        let c = a.scale(2.5);
        assert!((c[0] - 5.0).abs() < TOL);
        assert!((c[1] - 7.5).abs() < TOL);
    }

    #[test]
    fn test_dot_2d() {
        let a: [f64; 2] = [1.0, 2.0];
        let b: [f64; 2] = [3.0, 4.0];
        assert!((a.dot(&b) - 11.0).abs() < TOL); // 1*3 + 2*4 = 11
    }

    #[test]
    fn test_dot_3d() {
        let a: [f64; 3] = [1.0, 2.0, 3.0];
        let b: [f64; 3] = [4.0, 5.0, 6.0];
        assert!((a.dot(&b) - 32.0).abs() < TOL); // 1*4 + 2*5 + 3*6 = 32
    }

    #[test]
    fn test_norm_2d() {
        let p: [f64; 2] = [3.0, 4.0];
        assert!((p.norm() - 5.0).abs() < TOL);
        assert!((p.norm_squared() - 25.0).abs() < TOL);
    }

    #[test]
    fn test_norm_3d() {
        let p: [f64; 3] = [2.0, 3.0, 6.0];
        assert!((p.norm() - 7.0).abs() < TOL); // sqrt(4+9+36) = 7
    }

    #[test]
    fn test_distance_2d() {
        let a: [f64; 2] = [0.0, 0.0];
        let b: [f64; 2] = [3.0, 4.0];
        assert!((a.distance(&b) - 5.0).abs() < TOL);
    }

    #[test]
    fn test_midpoint_2d() {
        let a: [f64; 2] = [0.0, 0.0];
        let b: [f64; 2] = [10.0, 20.0];
        let m = a.midpoint(&b);
        assert!((m[0] - 5.0).abs() < TOL);
        assert!((m[1] - 10.0).abs() < TOL);
    }

    #[test]
    fn test_midpoint_3d() {
        let a: [f64; 3] = [1.0, 2.0, 3.0];
        let b: [f64; 3] = [3.0, 6.0, 9.0];
        let m = a.midpoint(&b);
        assert!((m[0] - 2.0).abs() < TOL);
        assert!((m[1] - 4.0).abs() < TOL);
        assert!((m[2] - 6.0).abs() < TOL);
    }
}
