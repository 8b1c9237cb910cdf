//! Gmsh mesh file I/O.
//!
//! Supports reading and writing Gmsh MSH format version 2.2 (ASCII).
//! This is the most widely supported format for Gmsh meshes.
//!
//! ## Supported Element Types
//! - 3 = Quadrilateral (4-node), becomes a mesh cell
//! - 1 = Line (2-node), carries its physical tag onto the matching
//!   boundary edge
//!
//! Other element types are skipped with a warning.
//!
//! ## Example
//! ```no_run
//! use gridkit_rs::mesh::gmsh::read_msh;
//! use std::path::Path;
//!
//! let mesh = read_msh(Path::new("mesh.msh")).expect("failed to read mesh");
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::boundary_tags::BoundaryTag;
use super::mesh2d::{Mesh2D, MeshError};

/// Error type for Gmsh I/O operations.
#[derive(Debug, Error)]
pub enum GmshError {
    /// File could not be opened, read, or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file content.
    #[error("parse error: {0}")]
    Parse(String),

    /// Mesh format version other than 2.x.
    #[error("unsupported Gmsh version: {0} (only 2.x is read)")]
    UnsupportedVersion(String),

    /// Required section absent.
    #[error("missing section: {0}")]
    MissingSection(String),

    /// The parsed cells do not form a valid mesh.
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}

/// Gmsh element types this reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GmshElementType {
    Line = 1,
    Triangle = 2,
    Quadrilateral = 3,
}

impl TryFrom<i32> for GmshElementType {
    type Error = GmshError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GmshElementType::Line),
            2 => Ok(GmshElementType::Triangle),
            3 => Ok(GmshElementType::Quadrilateral),
            _ => Err(GmshError::Parse(format!("unknown element type {}", value))),
        }
    }
}

/// Read a Gmsh MSH file (format 2.2).
///
/// Nodes may use arbitrary (non-contiguous) ids; they are renumbered to
/// contiguous vertex indices in file order. Sections other than
/// `$MeshFormat`, `$Nodes`, and `$Elements` (such as `$PhysicalNames`)
/// are ignored.
pub fn read_msh(path: &Path) -> Result<Mesh2D, GmshError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = reader.lines();
    let mut saw_format = false;
    let mut vertices: Vec<[f64; 2]> = Vec::new();
    let mut node_index: HashMap<usize, usize> = HashMap::new();
    let mut cells: Vec<[usize; 4]> = Vec::new();
    let mut boundary_tags: HashMap<(usize, usize), BoundaryTag> = HashMap::new();

    while let Some(line_result) = lines.next() {
        let line = line_result?;
        let line = line.trim();

        if line.starts_with("$MeshFormat") {
            parse_mesh_format(&mut lines)?;
            saw_format = true;
        } else if line.starts_with("$Nodes") {
            (vertices, node_index) = parse_nodes(&mut lines)?;
        } else if line.starts_with("$Elements") {
            (cells, boundary_tags) = parse_elements(&mut lines, &node_index)?;
        }
    }

    if !saw_format {
        return Err(GmshError::MissingSection("MeshFormat".to_string()));
    }
    if vertices.is_empty() {
        return Err(GmshError::MissingSection("Nodes".to_string()));
    }
    if cells.is_empty() {
        return Err(GmshError::MissingSection(
            "Elements (quadrilaterals)".to_string(),
        ));
    }

    let mesh = Mesh2D::from_cells(vertices, cells, &boundary_tags)?;
    Ok(mesh)
}

/// Parse the $MeshFormat section.
fn parse_mesh_format<I>(lines: &mut I) -> Result<(), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    if let Some(line_result) = lines.next() {
        let line = line_result?;
        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            return Err(GmshError::Parse("empty MeshFormat line".to_string()));
        }

        let version = parts[0];
        if !version.starts_with("2.") {
            return Err(GmshError::UnsupportedVersion(version.to_string()));
        }

        // Skip to end of section
        for line_result in lines.by_ref() {
            let line = line_result?;
            if line.trim().starts_with("$EndMeshFormat") {
                break;
            }
        }
    }
    Ok(())
}

/// Parse the $Nodes section.
///
/// Returns the vertex coordinates plus the node-id to vertex-index map.
fn parse_nodes<I>(lines: &mut I) -> Result<(Vec<[f64; 2]>, HashMap<usize, usize>), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let n_nodes = match lines.next() {
        Some(Ok(line)) => line
            .trim()
            .parse::<usize>()
            .map_err(|_| GmshError::Parse("invalid node count".to_string()))?,
        _ => return Err(GmshError::Parse("missing node count".to_string())),
    };

    let mut vertices = Vec::with_capacity(n_nodes);
    let mut node_index = HashMap::with_capacity(n_nodes);

    for _ in 0..n_nodes {
        if let Some(line_result) = lines.next() {
            let line = line_result?;
            let parts: Vec<&str> = line.trim().split_whitespace().collect();
            if parts.len() < 4 {
                return Err(GmshError::Parse(format!("invalid node line: {}", line)));
            }

            // Format: node_id x y z
            let id: usize = parts[0]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid node id: {}", parts[0])))?;
            let x: f64 = parts[1]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid x coordinate: {}", parts[1])))?;
            let y: f64 = parts[2]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid y coordinate: {}", parts[2])))?;

            node_index.insert(id, vertices.len());
            vertices.push([x, y]);
        }
    }

    // Skip to end of section
    for line_result in lines.by_ref() {
        let line = line_result?;
        if line.trim().starts_with("$EndNodes") {
            break;
        }
    }

    Ok((vertices, node_index))
}

/// Parse the $Elements section.
///
/// Returns (quadrilateral cells, boundary line tags), both in vertex
/// indices.
#[allow(clippy::type_complexity)]
fn parse_elements<I>(
    lines: &mut I,
    node_index: &HashMap<usize, usize>,
) -> Result<(Vec<[usize; 4]>, HashMap<(usize, usize), BoundaryTag>), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let n_elements = match lines.next() {
        Some(Ok(line)) => line
            .trim()
            .parse::<usize>()
            .map_err(|_| GmshError::Parse("invalid element count".to_string()))?,
        _ => return Err(GmshError::Parse("missing element count".to_string())),
    };

    let mut cells = Vec::new();
    let mut boundary_tags: HashMap<(usize, usize), BoundaryTag> = HashMap::new();
    let mut skipped = 0usize;

    for _ in 0..n_elements {
        if let Some(line_result) = lines.next() {
            let line = line_result?;
            let parts: Vec<&str> = line.trim().split_whitespace().collect();
            if parts.len() < 3 {
                return Err(GmshError::Parse(format!("invalid element line: {}", line)));
            }

            // Format: elem_id elem_type n_tags tag1 ... tagN node1 node2 ...
            let elem_type: i32 = parts[1]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid element type: {}", parts[1])))?;
            let n_tags: usize = parts[2]
                .parse()
                .map_err(|_| GmshError::Parse(format!("invalid tag count: {}", parts[2])))?;

            // First tag is the physical tag used for boundary conditions
            let physical_tag = if n_tags > 0 && parts.len() > 3 {
                parts[3].parse::<u32>().unwrap_or(0)
            } else {
                0
            };

            let node_start = 3 + n_tags;
            let node = |column: usize| -> Result<usize, GmshError> {
                let field = parts.get(column).ok_or_else(|| {
                    GmshError::Parse(format!("truncated element line: {}", line))
                })?;
                let id: usize = field
                    .parse()
                    .map_err(|_| GmshError::Parse(format!("invalid node reference: {}", field)))?;
                node_index
                    .get(&id)
                    .copied()
                    .ok_or_else(|| GmshError::Parse(format!("unknown node id: {}", id)))
            };

            match GmshElementType::try_from(elem_type) {
                Ok(GmshElementType::Quadrilateral) => {
                    cells.push([
                        node(node_start)?,
                        node(node_start + 1)?,
                        node(node_start + 2)?,
                        node(node_start + 3)?,
                    ]);
                }
                Ok(GmshElementType::Line) => {
                    let n0 = node(node_start)?;
                    let n1 = node(node_start + 1)?;

                    // Store as sorted pair for consistent lookup
                    let edge = if n0 < n1 { (n0, n1) } else { (n1, n0) };
                    boundary_tags.insert(edge, BoundaryTag(physical_tag));
                }
                Ok(GmshElementType::Triangle) | Err(_) => {
                    skipped += 1;
                }
            }
        }
    }

    if skipped > 0 {
        log::warn!(
            "skipped {} elements (only 2-node lines and 4-node quadrilaterals are read)",
            skipped
        );
    }

    // Skip to end of section
    for line_result in lines.by_ref() {
        let line = line_result?;
        if line.trim().starts_with("$EndElements") {
            break;
        }
    }

    Ok((cells, boundary_tags))
}

/// Write a mesh to Gmsh MSH format 2.2.
///
/// Boundary edges are written as 2-node lines with their tag as the
/// physical tag, followed by the cells as 4-node quadrilaterals.
pub fn write_msh(mesh: &Mesh2D, path: &Path) -> Result<(), GmshError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "$MeshFormat")?;
    writeln!(writer, "2.2 0 8")?;
    writeln!(writer, "$EndMeshFormat")?;

    writeln!(writer, "$Nodes")?;
    writeln!(writer, "{}", mesh.n_vertices)?;
    for (i, &[x, y]) in mesh.vertices.iter().enumerate() {
        writeln!(writer, "{} {} {} 0", i + 1, x, y)?;
    }
    writeln!(writer, "$EndNodes")?;

    let boundary_edges: Vec<_> = mesh.edges.iter().filter(|e| e.is_boundary()).collect();

    writeln!(writer, "$Elements")?;
    writeln!(writer, "{}", boundary_edges.len() + mesh.n_cells)?;

    // Boundary lines first; physical and geometrical tag both carry the
    // boundary tag
    let mut elem_id = 1;
    for edge in &boundary_edges {
        let (n0, n1) = edge.vertices;
        let tag = edge.boundary_tag.unwrap_or_default().value();
        writeln!(writer, "{} 1 2 {} {} {} {}", elem_id, tag, tag, n0 + 1, n1 + 1)?;
        elem_id += 1;
    }

    for cell in &mesh.cells {
        writeln!(
            writer,
            "{} 3 2 0 0 {} {} {} {}",
            elem_id,
            cell[0] + 1,
            cell[1] + 1,
            cell[2] + 1,
            cell[3] + 1
        )?;
        elem_id += 1;
    }

    writeln!(writer, "$EndElements")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generate::{square_with_round_hole, subdivided_rectangle};
    use std::io::Write as IoWrite;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_simple_mesh() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0.0 0.0 0.0
2 1.0 0.0 0.0
3 1.0 1.0 0.0
4 0.0 1.0 0.0
$EndNodes
$Elements
1
1 3 2 0 0 1 2 3 4
$EndElements"#
        )
        .unwrap();

        let mesh = read_msh(file.path()).unwrap();
        assert_eq!(mesh.n_vertices, 4);
        assert_eq!(mesh.n_cells, 1);
        assert_eq!(mesh.n_edges, 4);
        assert_eq!(mesh.n_boundary_edges, 4);
    }

    #[test]
    fn test_read_mesh_with_boundary_tags() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0.0 0.0 0.0
2 1.0 0.0 0.0
3 1.0 1.0 0.0
4 0.0 1.0 0.0
$EndNodes
$Elements
5
1 1 2 1 1 1 2
2 1 2 2 2 2 3
3 1 2 1 1 3 4
4 1 2 2 2 4 1
5 3 2 0 0 1 2 3 4
$EndElements"#
        )
        .unwrap();

        let mesh = read_msh(file.path()).unwrap();
        assert_eq!(mesh.n_boundary_edges, 4);

        let tag1 = mesh
            .edges
            .iter()
            .filter(|e| e.boundary_tag == Some(BoundaryTag(1)))
            .count();
        let tag2 = mesh
            .edges
            .iter()
            .filter(|e| e.boundary_tag == Some(BoundaryTag(2)))
            .count();
        assert_eq!(tag1, 2);
        assert_eq!(tag2, 2);
    }

    #[test]
    fn test_untagged_boundary_gets_default() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0.0 0.0 0.0
2 1.0 0.0 0.0
3 1.0 1.0 0.0
4 0.0 1.0 0.0
$EndNodes
$Elements
2
1 1 2 7 7 1 2
2 3 2 0 0 1 2 3 4
$EndElements"#
        )
        .unwrap();

        let mesh = read_msh(file.path()).unwrap();
        let tag7 = mesh
            .edges
            .iter()
            .filter(|e| e.boundary_tag == Some(BoundaryTag(7)))
            .count();
        let tag0 = mesh
            .edges
            .iter()
            .filter(|e| e.boundary_tag == Some(BoundaryTag(0)))
            .count();
        assert_eq!(tag7, 1);
        assert_eq!(tag0, 3);
    }

    #[test]
    fn test_non_contiguous_node_ids() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
10 0.0 0.0 0.0
20 1.0 0.0 0.0
30 1.0 1.0 0.0
40 0.0 1.0 0.0
$EndNodes
$Elements
1
1 3 2 0 0 10 20 30 40
$EndElements"#
        )
        .unwrap();

        let mesh = read_msh(file.path()).unwrap();
        assert_eq!(mesh.n_cells, 1);
        assert_eq!(mesh.cells[0], [0, 1, 2, 3]);
        assert_eq!(mesh.vertices[2], [1.0, 1.0]);
    }

    #[test]
    fn test_unknown_sections_and_triangles_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
1
1 1 "hole"
$EndPhysicalNames
$Nodes
5
1 0.0 0.0 0.0
2 1.0 0.0 0.0
3 1.0 1.0 0.0
4 0.0 1.0 0.0
5 2.0 0.0 0.0
$EndNodes
$Elements
3
1 2 2 0 0 2 5 3
2 15 2 0 0 1
3 3 2 0 0 1 2 3 4
$EndElements"#
        )
        .unwrap();

        let mesh = read_msh(file.path()).unwrap();
        // The triangle and the point element are dropped; only the quad
        // survives
        assert_eq!(mesh.n_cells, 1);
    }

    #[test]
    fn test_rejects_msh4() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
4.1 0 8
$EndMeshFormat"#
        )
        .unwrap();

        let result = read_msh(file.path());
        assert!(matches!(result, Err(GmshError::UnsupportedVersion(_))));
    }

    #[test]
    fn test_error_missing_nodes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
2.2 0 8
$EndMeshFormat"#
        )
        .unwrap();

        let result = read_msh(file.path());
        assert!(matches!(result, Err(GmshError::MissingSection(_))));
    }

    #[test]
    fn test_error_malformed_node_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
1
1 zero 0.0 0.0
$EndNodes"#
        )
        .unwrap();

        let result = read_msh(file.path());
        assert!(matches!(result, Err(GmshError::Parse(_))));
    }

    #[test]
    fn test_error_unknown_node_reference() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0.0 0.0 0.0
2 1.0 0.0 0.0
3 1.0 1.0 0.0
4 0.0 1.0 0.0
$EndNodes
$Elements
1
1 3 2 0 0 1 2 3 9
$EndElements"#
        )
        .unwrap();

        let result = read_msh(file.path());
        assert!(matches!(result, Err(GmshError::Parse(_))));
    }

    #[test]
    fn test_error_missing_file() {
        let result = read_msh(Path::new("/nonexistent/mesh.msh"));
        assert!(matches!(result, Err(GmshError::Io(_))));
    }

    #[test]
    fn test_roundtrip() {
        let mesh = subdivided_rectangle([2, 2], [0.0, 0.0], [1.0, 1.0]).unwrap();

        let file = NamedTempFile::new().unwrap();
        write_msh(&mesh, file.path()).unwrap();
        let back = read_msh(file.path()).unwrap();

        assert_eq!(back.n_vertices, mesh.n_vertices);
        assert_eq!(back.n_cells, mesh.n_cells);
        assert_eq!(back.n_edges, mesh.n_edges);
        assert_eq!(back.vertices, mesh.vertices);
    }

    #[test]
    fn test_roundtrip_keeps_tags() {
        let mesh = square_with_round_hole(0.25, 1.0).unwrap();

        let file = NamedTempFile::new().unwrap();
        write_msh(&mesh, file.path()).unwrap();
        let back = read_msh(file.path()).unwrap();

        let hole_edges = back
            .edges
            .iter()
            .filter(|e| e.boundary_tag == Some(BoundaryTag(1)))
            .count();
        assert_eq!(hole_edges, 8);
    }
}
