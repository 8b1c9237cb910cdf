//! Mesh generators and mesh-combining operations.
//!
//! Construction building blocks for the demo scenarios and for tests:
//! - [`subdivided_rectangle`]: structured quad grid over a rectangle
//! - [`square_with_round_hole`]: eight-cell ring between a circle and a square
//! - [`merge`]: glue two meshes, deduplicating coincident vertices
//! - [`extrude`]: sweep a 2D mesh along z into a hexahedral mesh

use std::collections::HashMap;

use super::boundary_tags::BoundaryTag;
use super::mesh2d::{Mesh2D, MeshError};
use super::mesh3d::{sorted_quad, Mesh3D};

/// Create a structured quad mesh over the axis-aligned rectangle spanned by
/// `p0` (lower-left) and `p1` (upper-right), with `reps = [nx, ny]` cells per
/// axis. All boundary edges get the default tag.
pub fn subdivided_rectangle(
    reps: [usize; 2],
    p0: [f64; 2],
    p1: [f64; 2],
) -> Result<Mesh2D, MeshError> {
    let [nx, ny] = reps;
    if nx == 0 || ny == 0 {
        return Err(MeshError::InvalidParameter(
            "subdivided_rectangle needs at least one cell per axis".to_string(),
        ));
    }
    if p1[0] <= p0[0] || p1[1] <= p0[1] {
        return Err(MeshError::InvalidParameter(format!(
            "subdivided_rectangle corners {:?} and {:?} do not span a rectangle",
            p0, p1
        )));
    }

    let dx = (p1[0] - p0[0]) / nx as f64;
    let dy = (p1[1] - p0[1]) / ny as f64;

    // Generate vertices: (nx+1) x (ny+1) grid, row-major from the bottom
    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            vertices.push([p0[0] + i as f64 * dx, p0[1] + j as f64 * dy]);
        }
    }

    // Generate cells: nx x ny quads, counter-clockwise
    let mut cells = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * (nx + 1) + i;
            let v1 = v0 + 1;
            let v2 = v1 + (nx + 1);
            let v3 = v0 + (nx + 1);
            cells.push([v0, v1, v2, v3]);
        }
    }

    Mesh2D::from_cells(vertices, cells, &HashMap::new())
}

/// Create the eight-cell ring between a centered circle of radius
/// `inner_radius` and the square `[-w, w]^2` with `w = outer_half_width`.
///
/// The eight inner vertices sit on the circle at 45 degree steps; the eight
/// outer vertices are the square's corners and edge midpoints. Hole edges
/// carry tag 1, the outer square keeps the default tag.
pub fn square_with_round_hole(
    inner_radius: f64,
    outer_half_width: f64,
) -> Result<Mesh2D, MeshError> {
    if !(inner_radius > 0.0 && inner_radius < outer_half_width) {
        return Err(MeshError::InvalidParameter(format!(
            "square_with_round_hole needs 0 < inner_radius < outer_half_width, got {} and {}",
            inner_radius, outer_half_width
        )));
    }

    let mut vertices = Vec::with_capacity(16);
    for k in 0..8 {
        let angle = k as f64 * std::f64::consts::FRAC_PI_4;
        vertices.push([inner_radius * angle.cos(), inner_radius * angle.sin()]);
    }
    let w = outer_half_width;
    vertices.extend([
        [w, 0.0],
        [w, w],
        [0.0, w],
        [-w, w],
        [-w, 0.0],
        [-w, -w],
        [0.0, -w],
        [w, -w],
    ]);

    // One cell per 45 degree sector, counter-clockwise:
    // inner_k, outer_k, outer_{k+1}, inner_{k+1}
    let mut cells = Vec::with_capacity(8);
    let mut tags = HashMap::new();
    for k in 0..8 {
        let kn = (k + 1) % 8;
        cells.push([k, 8 + k, 8 + kn, kn]);

        let key = if k < kn { (k, kn) } else { (kn, k) };
        tags.insert(key, BoundaryTag(1));
    }

    Mesh2D::from_cells(vertices, cells, &tags)
}

/// Glue two meshes into one, identifying vertices whose coordinates agree
/// within `tolerance` (per component).
///
/// The result always has `a.n_cells + b.n_cells` cells. Edges on the shared
/// interface become interior; surviving boundary edges keep the tag they had
/// in their input mesh. Vertices are matched purely by coordinates, so a
/// misaligned interface silently stays duplicated and unconnected.
pub fn merge(a: &Mesh2D, b: &Mesh2D, tolerance: f64) -> Result<Mesh2D, MeshError> {
    if !(tolerance > 0.0) {
        return Err(MeshError::InvalidParameter(format!(
            "merge tolerance must be positive, got {}",
            tolerance
        )));
    }

    let quantize = |p: [f64; 2]| -> (i64, i64) {
        (
            (p[0] / tolerance).round() as i64,
            (p[1] / tolerance).round() as i64,
        )
    };

    // Bin the first mesh's vertices for coordinate lookup. Matches are
    // searched in the vertex's own bin and the eight surrounding ones, so
    // near-boundary quantization cannot miss a coincident vertex.
    let mut bins: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (idx, &v) in a.vertices.iter().enumerate() {
        bins.entry(quantize(v)).or_default().push(idx);
    }

    let mut vertices = a.vertices.clone();
    let mut remap = Vec::with_capacity(b.n_vertices);
    for &v in &b.vertices {
        let (qx, qy) = quantize(v);
        let mut found = None;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = bins.get(&(qx + dx, qy + dy)) {
                    for &idx in bucket {
                        let u = vertices[idx];
                        if (u[0] - v[0]).abs() <= tolerance && (u[1] - v[1]).abs() <= tolerance {
                            found = Some(idx);
                            break 'search;
                        }
                    }
                }
            }
        }

        match found {
            Some(idx) => remap.push(idx),
            None => {
                let idx = vertices.len();
                vertices.push(v);
                bins.entry((qx, qy)).or_default().push(idx);
                remap.push(idx);
            }
        }
    }

    let mut cells = a.cells.clone();
    cells.extend(b.cells.iter().map(|c| c.map(|v| remap[v])));

    // Carry boundary tags from both inputs; entries for edges that become
    // interior are dropped by the connectivity build.
    let mut tags = HashMap::new();
    for edge in &a.edges {
        if let Some(tag) = edge.boundary_tag {
            tags.insert(edge.vertices, tag);
        }
    }
    for edge in &b.edges {
        if let Some(tag) = edge.boundary_tag {
            let (v0, v1) = (remap[edge.vertices.0], remap[edge.vertices.1]);
            let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
            tags.insert(key, tag);
        }
    }

    Mesh2D::from_cells(vertices, cells, &tags)
}

/// Sweep a 2D mesh along +z into `layers` layers of hexahedral cells over a
/// total extent of `height`.
///
/// The result has `layers * base.n_cells` cells. Side faces inherit the tag
/// of the footprint edge below them. The two caps get fresh tags: one past
/// the largest tag used by the footprint for the bottom (z = 0), the next
/// for the top (z = height).
pub fn extrude(base: &Mesh2D, layers: usize, height: f64) -> Result<Mesh3D, MeshError> {
    if layers == 0 {
        return Err(MeshError::InvalidParameter(
            "extrude needs at least one layer".to_string(),
        ));
    }
    if !(height > 0.0) {
        return Err(MeshError::InvalidParameter(format!(
            "extrude height must be positive, got {}",
            height
        )));
    }

    let nv = base.n_vertices;

    // layers + 1 vertex slices
    let mut vertices = Vec::with_capacity(nv * (layers + 1));
    for l in 0..=layers {
        let z = height * l as f64 / layers as f64;
        for &[x, y] in &base.vertices {
            vertices.push([x, y, z]);
        }
    }

    let mut cells = Vec::with_capacity(base.n_cells * layers);
    for l in 0..layers {
        let lo = l * nv;
        let hi = (l + 1) * nv;
        for &[a, b, c, d] in &base.cells {
            cells.push([
                lo + a,
                lo + b,
                lo + c,
                lo + d,
                hi + a,
                hi + b,
                hi + c,
                hi + d,
            ]);
        }
    }

    let max_tag = base
        .edges
        .iter()
        .filter_map(|e| e.boundary_tag)
        .max()
        .map(|t| t.value())
        .unwrap_or(0);
    let bottom_tag = BoundaryTag(max_tag + 1);
    let top_tag = BoundaryTag(max_tag + 2);

    let mut tags = HashMap::new();
    for edge in &base.edges {
        if let Some(tag) = edge.boundary_tag {
            let (v0, v1) = edge.vertices;
            for l in 0..layers {
                let lo = l * nv;
                let hi = (l + 1) * nv;
                tags.insert(sorted_quad([lo + v0, lo + v1, hi + v0, hi + v1]), tag);
            }
        }
    }
    for &[a, b, c, d] in &base.cells {
        tags.insert(sorted_quad([a, b, c, d]), bottom_tag);
        let top = layers * nv;
        tags.insert(
            sorted_quad([top + a, top + b, top + c, top + d]),
            top_tag,
        );
    }

    Mesh3D::from_cells(vertices, cells, &tags)
}
