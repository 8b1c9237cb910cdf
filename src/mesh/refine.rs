//! Global mesh refinement.
//!
//! Each refinement level splits every quad into four children by inserting
//! one midpoint per edge and one centroid per cell. Midpoints of boundary
//! edges whose tag has a shape attached are placed by that shape instead of
//! the chord midpoint, so curved boundaries converge under repeated
//! refinement. Child edges on the boundary inherit the parent edge's tag.

use std::collections::HashMap;

use super::mesh2d::{Mesh2D, MeshError};
use super::shapes::BoundaryShapes;

/// Refine every cell `levels` times. `levels = 0` returns a copy.
///
/// Cell counts grow by a factor of four per level. Parent vertices keep
/// their indices; edge midpoints and cell centroids are appended after them
/// in edge and cell order.
pub fn refine_global(
    mesh: &Mesh2D,
    levels: usize,
    shapes: &BoundaryShapes,
) -> Result<Mesh2D, MeshError> {
    let mut current = mesh.clone();
    for _ in 0..levels {
        current = refine_once(&current, shapes)?;
    }
    Ok(current)
}

fn refine_once(mesh: &Mesh2D, shapes: &BoundaryShapes) -> Result<Mesh2D, MeshError> {
    let nv = mesh.n_vertices;
    let ne = mesh.n_edges;

    let mut vertices = mesh.vertices.clone();
    vertices.reserve(ne + mesh.n_cells);

    // One midpoint per edge. The edge table already deduplicates shared
    // cell boundaries, so each midpoint is created exactly once.
    for edge in &mesh.edges {
        let a = mesh.vertices[edge.vertices.0];
        let b = mesh.vertices[edge.vertices.1];
        let shape = edge.boundary_tag.and_then(|tag| shapes.get(tag));
        let mid = match shape {
            Some(shape) => shape.midpoint(a, b),
            None => [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1])],
        };
        vertices.push(mid);
    }

    // One centroid per cell
    for k in 0..mesh.n_cells {
        let verts = mesh.cell_vertices(k);
        let mut c = [0.0, 0.0];
        for v in verts {
            c[0] += 0.25 * v[0];
            c[1] += 0.25 * v[1];
        }
        vertices.push(c);
    }

    let mut cells = Vec::with_capacity(4 * mesh.n_cells);
    for k in 0..mesh.n_cells {
        let [v0, v1, v2, v3] = mesh.cells[k];
        // Midpoint indices follow the cell's local face order: m0 between
        // v0 and v1, m1 between v1 and v2, and so on
        let [e0, e1, e2, e3] = mesh.cell_edges[k];
        let (m0, m1, m2, m3) = (nv + e0, nv + e1, nv + e2, nv + e3);
        let c = nv + ne + k;

        cells.push([v0, m0, c, m3]);
        cells.push([m0, v1, m1, c]);
        cells.push([c, m1, v2, m2]);
        cells.push([m3, c, m2, v3]);
    }

    // Each boundary edge splits into two child edges through its midpoint;
    // both inherit the parent tag
    let mut tags = HashMap::new();
    for (edge_idx, edge) in mesh.edges.iter().enumerate() {
        if let Some(tag) = edge.boundary_tag {
            let m = nv + edge_idx;
            let (a, b) = edge.vertices;
            tags.insert((a.min(m), a.max(m)), tag);
            tags.insert((b.min(m), b.max(m)), tag);
        }
    }

    Mesh2D::from_cells(vertices, cells, &tags)
}
