//! Abstract mesh traits for dimension-independent consumers.
//!
//! This module provides:
//!
//! - [`MeshTopology`]: Cell and face connectivity plus vertex access
//! - [`FaceConnection`]: Interior/boundary classification of a cell face
//!
//! Reporting and EPS plotting are written against [`MeshTopology`] so the same
//! code handles quadrilateral and hexahedral meshes.
//!
//! # Example
//! ```ignore
//! use gridkit_rs::mesh::{FaceConnection, MeshTopology};
//!
//! fn count_boundary_faces<M: MeshTopology>(mesh: &M) -> usize {
//!     let mut count = 0;
//!     for k in 0..mesh.n_cells() {
//!         for f in 0..M::FACES_PER_CELL {
//!             if mesh.face_connection(k, f).is_boundary() {
//!                 count += 1;
//!             }
//!         }
//!     }
//!     count
//! }
//! ```

use std::fmt::Debug;

use super::point::Point;

// =============================================================================
// Supporting Types
// =============================================================================

/// Information about a neighbor cell across a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Neighbor {
    /// Index of the neighboring cell.
    pub cell: usize,
    /// Local face index on the neighboring cell that shares this interface.
    pub face: usize,
}

/// Result of querying face connectivity.
///
/// A face is either interior (shared with a neighbor) or on the boundary.
#[derive(Clone, Copy, Debug)]
pub enum FaceConnection<Tag> {
    /// Interior face connecting to a neighbor cell.
    Interior(Neighbor),
    /// Boundary face with an associated tag.
    Boundary(Tag),
}

impl<Tag> FaceConnection<Tag> {
    /// Returns `true` if this is an interior face.
    #[inline]
    pub fn is_interior(&self) -> bool {
        matches!(self, FaceConnection::Interior(_))
    }

    /// Returns `true` if this is a boundary face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        matches!(self, FaceConnection::Boundary(_))
    }

    /// Returns the neighbor if this is an interior face.
    #[inline]
    pub fn neighbor(&self) -> Option<&Neighbor> {
        match self {
            FaceConnection::Interior(n) => Some(n),
            FaceConnection::Boundary(_) => None,
        }
    }

    /// Returns the boundary tag if this is a boundary face.
    #[inline]
    pub fn boundary_tag(&self) -> Option<&Tag> {
        match self {
            FaceConnection::Interior(_) => None,
            FaceConnection::Boundary(t) => Some(t),
        }
    }
}

// =============================================================================
// MeshTopology Trait
// =============================================================================

/// Base trait providing mesh topology (cells, faces, connectivity).
///
/// This is the fundamental trait that all meshes implement. It provides
/// access to cell counts, vertex coordinates, and face connectivity.
///
/// # Associated Types
/// - `Coord`: Physical coordinate type (`[f64; 2]` for 2D, `[f64; 3]` for 3D)
/// - `BoundaryTag`: Type for boundary face tags
///
/// # Associated Constants
/// - `FACES_PER_CELL`: Number of faces per cell (4 for quads, 6 for hexahedra)
/// - `VERTICES_PER_CELL`: Number of vertices per cell (4 for quads, 8 for hexahedra)
/// - `CELL_EDGES`: Local vertex index pairs forming the cell wireframe
pub trait MeshTopology: Send + Sync {
    /// Physical coordinate type.
    type Coord: Point;

    /// Boundary tag type for labeling boundary faces.
    type BoundaryTag: Copy + Clone + Debug + Default + Send + Sync;

    /// Number of faces per cell.
    const FACES_PER_CELL: usize;

    /// Number of vertices per cell.
    const VERTICES_PER_CELL: usize;

    /// Local vertex pairs forming the wireframe of one cell
    /// (4 edges for quads, 12 for hexahedra).
    const CELL_EDGES: &'static [[usize; 2]];

    /// Total number of cells in the mesh.
    fn n_cells(&self) -> usize;

    /// Total number of vertices in the mesh.
    fn n_vertices(&self) -> usize;

    /// Total number of unique faces (edges in 2D, quad faces in 3D).
    fn n_faces(&self) -> usize;

    /// Number of boundary faces.
    fn n_boundary_faces(&self) -> usize;

    /// Coordinates of a vertex.
    fn vertex(&self, idx: usize) -> Self::Coord;

    /// Global vertex indices of a cell, in the cell's local ordering.
    fn cell_vertex_indices(&self, cell: usize) -> &[usize];

    /// Query connectivity across a face.
    ///
    /// Returns [`FaceConnection::Interior`] with neighbor information if the face
    /// is shared with another cell, or [`FaceConnection::Boundary`] with a tag
    /// if the face is on the domain boundary.
    ///
    /// # Arguments
    /// * `cell` - Cell index
    /// * `local_face` - Local face index (0..FACES_PER_CELL)
    fn face_connection(&self, cell: usize, local_face: usize) -> FaceConnection<Self::BoundaryTag>;

    /// Get neighbor cell across a face, if interior.
    ///
    /// This is a convenience method; the default implementation uses `face_connection`.
    #[inline]
    fn neighbor(&self, cell: usize, local_face: usize) -> Option<Neighbor> {
        match self.face_connection(cell, local_face) {
            FaceConnection::Interior(n) => Some(n),
            FaceConnection::Boundary(_) => None,
        }
    }

    /// Check if a face is on the boundary.
    #[inline]
    fn is_boundary(&self, cell: usize, local_face: usize) -> bool {
        matches!(
            self.face_connection(cell, local_face),
            FaceConnection::Boundary(_)
        )
    }

    /// Get boundary tag for a face, if on boundary.
    #[inline]
    fn boundary_tag(&self, cell: usize, local_face: usize) -> Option<Self::BoundaryTag> {
        match self.face_connection(cell, local_face) {
            FaceConnection::Boundary(tag) => Some(tag),
            FaceConnection::Interior(_) => None,
        }
    }
}
