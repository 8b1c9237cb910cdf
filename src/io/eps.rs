//! Encapsulated PostScript output for meshes.
//!
//! Draws the wireframe of a mesh as line segments, scaled to a fixed plot
//! width. 2D meshes are drawn as-is; 3D meshes are projected with a fixed
//! axonometric camera (turned 30 degrees around the z axis, viewed from 60
//! degrees above the horizon). Works for anything implementing
//! [`MeshTopology`].

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::mesh::traits::{MeshTopology, Point};

/// Error type for EPS output.
#[derive(Debug, Error)]
pub enum EpsError {
    /// I/O error during file operations.
    #[error("EPS I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The mesh cannot be drawn.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}

/// Width of the plot in PostScript points.
const PLOT_WIDTH: f64 = 300.0;

/// Camera angles for 3D meshes, in degrees.
const TURN_ANGLE: f64 = 30.0;
const AZIMUTH_ANGLE: f64 = 60.0;

/// Project a vertex to the drawing plane.
fn project<P: Point>(p: &P) -> [f64; 2] {
    if P::DIM == 2 {
        return [p.coord(0), p.coord(1)];
    }

    // Rotate around z by the turn angle, then look down from the azimuth
    // angle above the horizon
    let turn = TURN_ANGLE.to_radians();
    let azimuth = AZIMUTH_ANGLE.to_radians();
    let (x, y, z) = (p.coord(0), p.coord(1), p.coord(2));
    let u = x * turn.cos() + y * turn.sin();
    let v =
        -x * azimuth.cos() * turn.sin() + y * azimuth.cos() * turn.cos() + z * azimuth.sin();
    [u, v]
}

/// Collect the unique wireframe segments of a mesh as sorted vertex pairs.
///
/// The ordered set keeps the output byte-identical across runs.
fn wireframe<M: MeshTopology>(mesh: &M) -> BTreeSet<(usize, usize)> {
    let mut segments = BTreeSet::new();
    for cell in 0..mesh.n_cells() {
        let verts = mesh.cell_vertex_indices(cell);
        for &[a, b] in M::CELL_EDGES {
            let (v0, v1) = (verts[a], verts[b]);
            let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
            segments.insert(key);
        }
    }
    segments
}

/// Write the mesh wireframe to `path` as an EPS figure.
///
/// The drawing is translated to the origin and scaled so its width is 300
/// points; shared edges between cells are drawn once.
pub fn write_eps<M: MeshTopology>(mesh: &M, path: &Path) -> Result<(), EpsError> {
    if mesh.n_cells() == 0 {
        return Err(EpsError::InvalidMesh("mesh has no cells".to_string()));
    }

    let projected: Vec<[f64; 2]> = (0..mesh.n_vertices())
        .map(|v| project(&mesh.vertex(v)))
        .collect();

    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in &projected {
        for i in 0..2 {
            min[i] = min[i].min(p[i]);
            max[i] = max[i].max(p[i]);
        }
    }
    let extent = max[0] - min[0];
    if !(extent > 0.0) {
        return Err(EpsError::InvalidMesh(
            "mesh has zero horizontal extent".to_string(),
        ));
    }
    let scale = PLOT_WIDTH / extent;
    let height = (max[1] - min[1]) * scale;

    let title = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("mesh");

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "%!PS-Adobe-2.0 EPSF-1.2")?;
    writeln!(writer, "%%Title: {}", title)?;
    writeln!(writer, "%%Creator: gridkit")?;
    writeln!(
        writer,
        "%%BoundingBox: 0 0 {} {}",
        PLOT_WIDTH.ceil() as i64,
        height.ceil() as i64
    )?;
    writeln!(writer, "%%EndComments")?;
    writeln!(writer, "/m {{moveto}} bind def")?;
    writeln!(writer, "/x {{lineto stroke}} bind def")?;
    writeln!(writer, "0.5 setlinewidth")?;

    for &(v0, v1) in &wireframe(mesh) {
        let a = projected[v0];
        let b = projected[v1];
        writeln!(
            writer,
            "{:.2} {:.2} m {:.2} {:.2} x",
            (a[0] - min[0]) * scale,
            (a[1] - min[1]) * scale,
            (b[0] - min[0]) * scale,
            (b[1] - min[1]) * scale
        )?;
    }

    writeln!(writer, "showpage")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generate::{extrude, subdivided_rectangle};
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_2d_mesh() {
        let mesh = subdivided_rectangle([3, 2], [0.0, 0.0], [3.0, 2.0]).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.eps");

        write_eps(&mesh, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("%!PS-Adobe-2.0 EPSF-1.2"));
        assert!(content.contains("%%Title: grid.eps"));
        // 3:2 aspect ratio scaled to 300 points wide
        assert!(content.contains("%%BoundingBox: 0 0 300 200"));
        assert!(content.trim_end().ends_with("showpage"));
    }

    #[test]
    fn test_shared_edges_drawn_once() {
        let mesh = subdivided_rectangle([3, 2], [0.0, 0.0], [3.0, 2.0]).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.eps");

        write_eps(&mesh, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        let segments = content.lines().filter(|l| l.ends_with(" x")).count();
        assert_eq!(segments, mesh.n_edges);
    }

    #[test]
    fn test_write_3d_mesh() {
        let base = subdivided_rectangle([1, 1], [0.0, 0.0], [1.0, 1.0]).unwrap();
        let cube = extrude(&base, 1, 1.0).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("cube.eps");

        write_eps(&cube, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("%!PS-Adobe-2.0 EPSF-1.2"));
        assert!(content.contains("%%BoundingBox: 0 0 300"));
        // A cube wireframe has 12 edges
        let segments = content.lines().filter(|l| l.ends_with(" x")).count();
        assert_eq!(segments, 12);
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let mesh =
            crate::mesh::Mesh2D::from_cells(Vec::new(), Vec::new(), &HashMap::new()).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.eps");

        let result = write_eps(&mesh, &path);
        assert!(matches!(result, Err(EpsError::InvalidMesh(_))));
    }

    #[test]
    fn test_unwritable_path() {
        let mesh = subdivided_rectangle([1, 1], [0.0, 0.0], [1.0, 1.0]).unwrap();
        let result = write_eps(&mesh, Path::new("/nonexistent/dir/grid.eps"));
        assert!(matches!(result, Err(EpsError::Io(_))));
    }
}
