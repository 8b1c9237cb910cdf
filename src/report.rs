//! Mesh summary reporting.
//!
//! Produces the per-scenario console summary: dimension, cell count, and a
//! histogram of boundary tags in ascending tag order. Works for any mesh
//! implementing [`MeshTopology`] with numeric boundary tags.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::io::eps::{write_eps, EpsError};
use crate::mesh::boundary_tags::BoundaryTag;
use crate::mesh::traits::{FaceConnection, MeshTopology, Point};

/// Summary statistics of a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshReport {
    /// Spatial dimension of the vertex coordinates.
    pub dimension: usize,
    /// Number of cells.
    pub n_cells: usize,
    /// How often each boundary tag appears on a boundary face.
    pub boundary_counts: BTreeMap<BoundaryTag, usize>,
}

impl MeshReport {
    /// Collect the summary by walking every cell's faces.
    ///
    /// Each boundary face belongs to exactly one cell, so it is counted
    /// once.
    pub fn collect<M>(mesh: &M) -> Self
    where
        M: MeshTopology<BoundaryTag = BoundaryTag>,
    {
        let mut boundary_counts = BTreeMap::new();
        for cell in 0..mesh.n_cells() {
            for face in 0..M::FACES_PER_CELL {
                if let FaceConnection::Boundary(tag) = mesh.face_connection(cell, face) {
                    *boundary_counts.entry(tag).or_insert(0) += 1;
                }
            }
        }

        MeshReport {
            dimension: <M::Coord as Point>::DIM,
            n_cells: mesh.n_cells(),
            boundary_counts,
        }
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh info:")?;
        writeln!(f, " dimension: {}", self.dimension)?;
        writeln!(f, " no. of cells: {}", self.n_cells)?;
        write!(f, " boundary indicators: ")?;
        for (tag, count) in &self.boundary_counts {
            write!(f, "{}({} times) ", tag, count)?;
        }
        writeln!(f)
    }
}

/// Print the mesh summary to stdout, export the wireframe to `path`, and
/// confirm the written file.
pub fn report_and_export<M>(mesh: &M, path: &Path) -> Result<(), EpsError>
where
    M: MeshTopology<BoundaryTag = BoundaryTag>,
{
    print!("{}", MeshReport::collect(mesh));
    write_eps(mesh, path)?;
    println!(" written to {}", path.display());
    println!();
    Ok(())
}
