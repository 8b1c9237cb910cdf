//! Boundary tags for mesh boundary faces.
//!
//! Each boundary face carries a numeric tag identifying which part of the
//! domain boundary it belongs to (outer wall, hole, inlet, ...). Tags are
//! plain integers so they map directly onto Gmsh physical group ids; the
//! meaning of a tag value is up to the application.

use std::fmt;

/// Numeric tag identifying a part of the domain boundary.
///
/// Tag `0` is the default for faces without an explicit assignment.
/// Tags are ordered so reports can list them ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundaryTag(pub u32);

impl BoundaryTag {
    /// The default tag assigned to untagged boundary faces.
    pub const DEFAULT: BoundaryTag = BoundaryTag(0);

    /// Numeric value of the tag.
    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for BoundaryTag {
    fn from(value: u32) -> Self {
        BoundaryTag(value)
    }
}

impl fmt::Display for BoundaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_tag_equality() {
        assert_eq!(BoundaryTag(1), BoundaryTag(1));
        assert_ne!(BoundaryTag(1), BoundaryTag(2));
        assert_eq!(BoundaryTag::from(7), BoundaryTag(7));
    }

    #[test]
    fn test_boundary_tag_default() {
        assert_eq!(BoundaryTag::default(), BoundaryTag(0));
        assert_eq!(BoundaryTag::DEFAULT.value(), 0);
    }

    #[test]
    fn test_boundary_tag_ordering() {
        let mut tags = vec![BoundaryTag(3), BoundaryTag(0), BoundaryTag(1)];
        tags.sort();
        assert_eq!(tags, vec![BoundaryTag(0), BoundaryTag(1), BoundaryTag(3)]);
    }

    #[test]
    fn test_boundary_tag_display() {
        assert_eq!(format!("{}", BoundaryTag(42)), "42");
    }
}
