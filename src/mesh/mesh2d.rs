//! 2D mesh of quadrilateral cells.
//!
//! The mesh stores:
//! - Vertex coordinates in a shared arena (moving `vertices[i]` moves it for
//!   every cell that references index `i`)
//! - Cell-vertex connectivity (counter-clockwise ordering)
//! - Edge-based connectivity with neighbor lookup
//! - Boundary edge identification with numeric tags
//!
//! Face convention (counter-clockwise around the cell):
//! - Face 0 (bottom): from vertex 0 to vertex 1
//! - Face 1 (right):  from vertex 1 to vertex 2
//! - Face 2 (top):    from vertex 2 to vertex 3
//! - Face 3 (left):   from vertex 3 to vertex 0

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::boundary_tags::BoundaryTag;
use super::traits::{FaceConnection, MeshTopology, Neighbor};

/// Local vertex pairs forming the four edges of a quadrilateral cell.
pub(crate) const QUAD_EDGES: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];

/// Error type for mesh construction.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A cell references a vertex index outside the vertex arena.
    #[error("cell {cell} references vertex {vertex} but the mesh has {n_vertices} vertices")]
    VertexOutOfRange {
        cell: usize,
        vertex: usize,
        n_vertices: usize,
    },

    /// A cell lists the same vertex more than once.
    #[error("cell {cell} repeats a vertex")]
    DegenerateCell { cell: usize },

    /// An edge is incident to three or more cells.
    #[error("edge ({v0}, {v1}) is shared by more than two cells")]
    NonManifoldEdge { v0: usize, v1: usize },

    /// A quad face is incident to three or more cells (3D meshes).
    #[error("face {face:?} is shared by more than two cells")]
    NonManifoldFace { face: [usize; 4] },

    /// Two neighboring cells wind around their shared edge in the same
    /// direction, so one of them is ordered clockwise.
    #[error("cells {left} and {right} traverse edge ({v0}, {v1}) in the same direction")]
    InconsistentOrientation {
        left: usize,
        right: usize,
        v0: usize,
        v1: usize,
    },

    /// Invalid arguments to a mesh construction operation.
    #[error("invalid mesh parameters: {0}")]
    InvalidParameter(String),
}

/// Reference to a cell and one of its faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellFace {
    /// Cell index
    pub cell: usize,
    /// Face index (0-3 for quads, 0-5 for hexahedra)
    pub face: usize,
}

impl CellFace {
    pub fn new(cell: usize, face: usize) -> Self {
        Self { cell, face }
    }
}

/// Information about an edge in the mesh.
#[derive(Clone, Debug)]
pub struct Edge {
    /// Vertex indices (v0, v1) with v0 < v1 for consistent ordering
    pub vertices: (usize, usize),
    /// Left cell-face (always present)
    pub left: CellFace,
    /// Right cell-face (None for boundary edges)
    pub right: Option<CellFace>,
    /// Boundary tag (only for boundary edges)
    pub boundary_tag: Option<BoundaryTag>,
}

impl Edge {
    /// Check if this is a boundary edge.
    pub fn is_boundary(&self) -> bool {
        self.right.is_none()
    }

    /// Check if this is an interior edge.
    pub fn is_interior(&self) -> bool {
        self.right.is_some()
    }
}

/// 2D mesh of quadrilateral cells.
#[derive(Clone)]
pub struct Mesh2D {
    /// Vertex coordinates: vertices[i] = [x, y]
    pub vertices: Vec<[f64; 2]>,

    /// Cell-vertex connectivity: cells[k] = [v0, v1, v2, v3]
    /// Vertices are in counter-clockwise order:
    /// - v0: bottom-left
    /// - v1: bottom-right
    /// - v2: top-right
    /// - v3: top-left
    pub cells: Vec<[usize; 4]>,

    /// Edge list with connectivity information
    pub edges: Vec<Edge>,

    /// Cell-to-edge mapping: cell_edges[k][f] = edge index for face f of cell k
    pub cell_edges: Vec<[usize; 4]>,

    /// Number of cells
    pub n_cells: usize,

    /// Number of edges
    pub n_edges: usize,

    /// Number of boundary edges
    pub n_boundary_edges: usize,

    /// Number of vertices
    pub n_vertices: usize,
}

impl Mesh2D {
    /// Build a mesh from a vertex arena and a cell soup.
    ///
    /// Edge connectivity is derived from the cells: an edge shared by two
    /// cells becomes interior, an edge with a single incident cell becomes a
    /// boundary edge. Boundary edges take their tag from `boundary_tags`
    /// (keyed by sorted vertex pair) or [`BoundaryTag::DEFAULT`] when absent;
    /// entries for edges that end up interior are ignored.
    ///
    /// # Errors
    /// - [`MeshError::VertexOutOfRange`] for indices past the arena
    /// - [`MeshError::DegenerateCell`] for cells repeating a vertex
    /// - [`MeshError::NonManifoldEdge`] for edges with three or more cells
    /// - [`MeshError::InconsistentOrientation`] when a neighboring pair does
    ///   not agree on winding (one cell is clockwise)
    pub fn from_cells(
        vertices: Vec<[f64; 2]>,
        cells: Vec<[usize; 4]>,
        boundary_tags: &HashMap<(usize, usize), BoundaryTag>,
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
            for i in 0..4 {
                for j in (i + 1)..4 {
                    if cell[i] == cell[j] {
                        return Err(MeshError::DegenerateCell { cell: k });
                    }
                }
            }
        }

        // Collect (cell, face) incidences per sorted vertex pair. A BTreeMap
        // keeps edge numbering independent of hash seeds.
        let mut edge_map: BTreeMap<(usize, usize), Vec<CellFace>> = BTreeMap::new();
        for (k, cell) in cells.iter().enumerate() {
            for (face, &[a, b]) in QUAD_EDGES.iter().enumerate() {
                let (v0, v1) = (cell[a], cell[b]);
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                edge_map.entry(key).or_default().push(CellFace::new(k, face));
            }
        }

        let mut edges: Vec<Edge> = Vec::with_capacity(edge_map.len());
        let mut cell_edges = vec![[0usize; 4]; n_cells];

        for (key, cell_faces) in &edge_map {
            if cell_faces.len() > 2 {
                return Err(MeshError::NonManifoldEdge {
                    v0: key.0,
                    v1: key.1,
                });
            }

            if cell_faces.len() == 2 {
                let d0 = face_direction(&cells[cell_faces[0].cell], cell_faces[0].face);
                let d1 = face_direction(&cells[cell_faces[1].cell], cell_faces[1].face);
                if d0 == d1 {
                    return Err(MeshError::InconsistentOrientation {
                        left: cell_faces[0].cell,
                        right: cell_faces[1].cell,
                        v0: key.0,
                        v1: key.1,
                    });
                }
            }

            let left = cell_faces[0];
            let right = cell_faces.get(1).copied();
            let boundary_tag = if right.is_none() {
                Some(boundary_tags.get(key).copied().unwrap_or_default())
            } else {
                None
            };

            let edge_idx = edges.len();
            for cf in cell_faces {
                cell_edges[cf.cell][cf.face] = edge_idx;
            }

            edges.push(Edge {
                vertices: *key,
                left,
                right,
                boundary_tag,
            });
        }

        let n_edges = edges.len();
        let n_boundary_edges = edges.iter().filter(|e| e.is_boundary()).count();

        Ok(Self {
            vertices,
            cells,
            edges,
            cell_edges,
            n_cells,
            n_edges,
            n_boundary_edges,
            n_vertices,
        })
    }

    /// Get the vertex coordinates of a cell.
    pub fn cell_vertices(&self, k: usize) -> [[f64; 2]; 4] {
        let [v0, v1, v2, v3] = self.cells[k];
        [
            self.vertices[v0],
            self.vertices[v1],
            self.vertices[v2],
            self.vertices[v3],
        ]
    }

    /// Get the edge index for a given cell face.
    #[inline]
    pub fn edge_for_face(&self, cell: usize, face: usize) -> usize {
        self.cell_edges[cell][face]
    }

    /// Get the neighbor cell across a face, if it exists.
    pub fn neighbor(&self, cell: usize, face: usize) -> Option<CellFace> {
        let edge = &self.edges[self.cell_edges[cell][face]];

        if edge.left.cell == cell && edge.left.face == face {
            edge.right
        } else {
            Some(edge.left)
        }
    }

    /// Check if a face is on the boundary.
    pub fn is_boundary_face(&self, cell: usize, face: usize) -> bool {
        self.edges[self.cell_edges[cell][face]].is_boundary()
    }

    /// Get the boundary tag for a face, if it's a boundary face.
    pub fn boundary_tag(&self, cell: usize, face: usize) -> Option<BoundaryTag> {
        self.edges[self.cell_edges[cell][face]].boundary_tag
    }
}

/// Vertex pair of a face as traversed in the cell's winding order.
fn face_direction(cell: &[usize; 4], face: usize) -> (usize, usize) {
    let [a, b] = QUAD_EDGES[face];
    (cell[a], cell[b])
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl MeshTopology for Mesh2D {
    type Coord = [f64; 2];
    type BoundaryTag = BoundaryTag;

    const FACES_PER_CELL: usize = 4;
    const VERTICES_PER_CELL: usize = 4;
    const CELL_EDGES: &'static [[usize; 2]] = &QUAD_EDGES;

    #[inline]
    fn n_cells(&self) -> usize {
        self.n_cells
    }

    #[inline]
    fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    fn n_faces(&self) -> usize {
        self.n_edges
    }

    fn n_boundary_faces(&self) -> usize {
        self.n_boundary_edges
    }

    #[inline]
    fn vertex(&self, idx: usize) -> [f64; 2] {
        self.vertices[idx]
    }

    #[inline]
    fn cell_vertex_indices(&self, cell: usize) -> &[usize] {
        &self.cells[cell]
    }

    fn face_connection(&self, cell: usize, local_face: usize) -> FaceConnection<BoundaryTag> {
        let edge = &self.edges[self.cell_edges[cell][local_face]];

        if edge.left.cell == cell && edge.left.face == local_face {
            match edge.right {
                Some(cf) => FaceConnection::Interior(Neighbor {
                    cell: cf.cell,
                    face: cf.face,
                }),
                None => FaceConnection::Boundary(edge.boundary_tag.unwrap_or_default()),
            }
        } else {
            FaceConnection::Interior(Neighbor {
                cell: edge.left.cell,
                face: edge.left.face,
            })
        }
    }
}
