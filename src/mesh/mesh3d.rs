//! 3D mesh of hexahedral cells.
//!
//! Same arena design as [`super::mesh2d::Mesh2D`] one dimension up:
//! - Vertex coordinates in a shared arena
//! - Cell-vertex connectivity as index 8-tuples
//! - Quad-face connectivity with neighbor lookup and boundary tags
//!
//! Cell vertex convention: vertices 0-3 form the bottom quad (counter-clockwise
//! in the footprint), vertices 4-7 the top quad directly above them.
//!
//! Face convention:
//! - Face 0: bottom (0, 1, 2, 3)
//! - Face 1: top (4, 5, 6, 7)
//! - Faces 2-5: sides over the footprint edges 0-3, in order

use std::collections::{BTreeMap, HashMap};

use super::boundary_tags::BoundaryTag;
use super::mesh2d::{CellFace, MeshError};
use super::traits::{FaceConnection, MeshTopology, Neighbor};

/// Local vertex quadruples forming the six faces of a hexahedral cell.
pub(crate) const HEX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Local vertex pairs forming the twelve wireframe edges of a hexahedral cell.
pub(crate) const HEX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Information about a quad face in the mesh.
#[derive(Clone, Debug)]
pub struct Face {
    /// Vertex indices sorted ascending for consistent lookup
    pub vertices: [usize; 4],
    /// Left cell-face (always present)
    pub left: CellFace,
    /// Right cell-face (None for boundary faces)
    pub right: Option<CellFace>,
    /// Boundary tag (only for boundary faces)
    pub boundary_tag: Option<BoundaryTag>,
}

impl Face {
    /// Check if this is a boundary face.
    pub fn is_boundary(&self) -> bool {
        self.right.is_none()
    }

    /// Check if this is an interior face.
    pub fn is_interior(&self) -> bool {
        self.right.is_some()
    }
}

/// 3D mesh of hexahedral cells.
#[derive(Clone)]
pub struct Mesh3D {
    /// Vertex coordinates: vertices[i] = [x, y, z]
    pub vertices: Vec<[f64; 3]>,

    /// Cell-vertex connectivity: cells[k] = [v0, ..., v7]
    pub cells: Vec<[usize; 8]>,

    /// Quad-face list with connectivity information
    pub faces: Vec<Face>,

    /// Cell-to-face mapping: cell_faces[k][f] = face index for face f of cell k
    pub cell_faces: Vec<[usize; 6]>,

    /// Number of cells
    pub n_cells: usize,

    /// Number of quad faces
    pub n_faces: usize,

    /// Number of boundary faces
    pub n_boundary_faces: usize,

    /// Number of vertices
    pub n_vertices: usize,
}

impl Mesh3D {
    /// Build a mesh from a vertex arena and a cell soup.
    ///
    /// Face connectivity is derived from the cells the same way
    /// [`Mesh2D::from_cells`](super::mesh2d::Mesh2D::from_cells) derives edge
    /// connectivity. Boundary faces take their tag from `boundary_tags` (keyed
    /// by the sorted vertex quadruple) or [`BoundaryTag::DEFAULT`] when absent.
    ///
    /// # Errors
    /// - [`MeshError::VertexOutOfRange`] for indices past the arena
    /// - [`MeshError::DegenerateCell`] for cells repeating a vertex
    /// - [`MeshError::NonManifoldFace`] for faces with three or more cells
    pub fn from_cells(
        vertices: Vec<[f64; 3]>,
        cells: Vec<[usize; 8]>,
        boundary_tags: &HashMap<[usize; 4], BoundaryTag>,
    ) -> Result<Self, MeshError> {
        let n_cells = cells.len();
        let n_vertices = vertices.len();

        for (k, cell) in cells.iter().enumerate() {
            for &v in cell {
                if v >= n_vertices {
                    return Err(MeshError::VertexOutOfRange {
                        cell: k,
                        vertex: v,
                        n_vertices,
                    });
                }
            }
            for i in 0..8 {
                for j in (i + 1)..8 {
                    if cell[i] == cell[j] {
                        return Err(MeshError::DegenerateCell { cell: k });
                    }
                }
            }
        }

        let mut face_map: BTreeMap<[usize; 4], Vec<CellFace>> = BTreeMap::new();
        for (k, cell) in cells.iter().enumerate() {
            for (face, local) in HEX_FACES.iter().enumerate() {
                let key = sorted_quad([
                    cell[local[0]],
                    cell[local[1]],
                    cell[local[2]],
                    cell[local[3]],
                ]);
                face_map.entry(key).or_default().push(CellFace::new(k, face));
            }
        }

        let mut faces: Vec<Face> = Vec::with_capacity(face_map.len());
        let mut cell_faces = vec![[0usize; 6]; n_cells];

        for (key, incident) in &face_map {
            if incident.len() > 2 {
                return Err(MeshError::NonManifoldFace { face: *key });
            }

            let left = incident[0];
            let right = incident.get(1).copied();
            let boundary_tag = if right.is_none() {
                Some(boundary_tags.get(key).copied().unwrap_or_default())
            } else {
                None
            };

            let face_idx = faces.len();
            for cf in incident {
                cell_faces[cf.cell][cf.face] = face_idx;
            }

            faces.push(Face {
                vertices: *key,
                left,
                right,
                boundary_tag,
            });
        }

        let n_faces = faces.len();
        let n_boundary_faces = faces.iter().filter(|f| f.is_boundary()).count();

        Ok(Self {
            vertices,
            cells,
            faces,
            cell_faces,
            n_cells,
            n_faces,
            n_boundary_faces,
            n_vertices,
        })
    }

    /// Get the neighbor cell across a face, if it exists.
    pub fn neighbor(&self, cell: usize, face: usize) -> Option<CellFace> {
        let f = &self.faces[self.cell_faces[cell][face]];

        if f.left.cell == cell && f.left.face == face {
            f.right
        } else {
            Some(f.left)
        }
    }

    /// Check if a face is on the boundary.
    pub fn is_boundary_face(&self, cell: usize, face: usize) -> bool {
        self.faces[self.cell_faces[cell][face]].is_boundary()
    }

    /// Get the boundary tag for a face, if it's a boundary face.
    pub fn boundary_tag(&self, cell: usize, face: usize) -> Option<BoundaryTag> {
        self.faces[self.cell_faces[cell][face]].boundary_tag
    }
}

/// Sort a vertex quadruple ascending for use as a face key.
pub(crate) fn sorted_quad(mut vs: [usize; 4]) -> [usize; 4] {
    vs.sort_unstable();
    vs
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl MeshTopology for Mesh3D {
    type Coord = [f64; 3];
    type BoundaryTag = BoundaryTag;

    const FACES_PER_CELL: usize = 6;
    const VERTICES_PER_CELL: usize = 8;
    const CELL_EDGES: &'static [[usize; 2]] = &HEX_EDGES;

    #[inline]
    fn n_cells(&self) -> usize {
        self.n_cells
    }

    #[inline]
    fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    fn n_faces(&self) -> usize {
        self.n_faces
    }

    fn n_boundary_faces(&self) -> usize {
        self.n_boundary_faces
    }

    #[inline]
    fn vertex(&self, idx: usize) -> [f64; 3] {
        self.vertices[idx]
    }

    #[inline]
    fn cell_vertex_indices(&self, cell: usize) -> &[usize] {
        &self.cells[cell]
    }

    fn face_connection(&self, cell: usize, local_face: usize) -> FaceConnection<BoundaryTag> {
        let f = &self.faces[self.cell_faces[cell][local_face]];

        if f.left.cell == cell && f.left.face == local_face {
            match f.right {
                Some(cf) => FaceConnection::Interior(Neighbor {
                    cell: cf.cell,
                    face: cf.face,
                }),
                None => FaceConnection::Boundary(f.boundary_tag.unwrap_or_default()),
            }
        } else {
            FaceConnection::Interior(Neighbor {
                cell: f.left.cell,
                face: f.left.face,
            })
        }
    }
}
