//! Random mesh distortion.
//!
//! Moves every vertex by a fixed fraction of its shortest incident edge in a
//! random direction. Useful for robustness testing of solvers on meshes that
//! are no longer axis-aligned. Nothing checks that the distorted cells stay
//! convex; large factors can produce inverted cells.

use rand::Rng;

use super::mesh2d::Mesh2D;

/// Displace each vertex by `factor` times its shortest incident edge length
/// in a uniformly random direction.
///
/// With `keep_boundary` set, vertices touching a boundary edge stay fixed.
/// Vertices are visited in index order and edge lengths are snapshotted up
/// front, so for a given mesh the result depends only on the `rng` state;
/// seed it (for example with `StdRng::seed_from_u64`) for reproducible
/// output.
pub fn distort_random(mesh: &mut Mesh2D, factor: f64, keep_boundary: bool, rng: &mut impl Rng) {
    let nv = mesh.n_vertices;

    let mut min_len = vec![f64::INFINITY; nv];
    let mut pinned = vec![false; nv];
    for edge in &mesh.edges {
        let (a, b) = edge.vertices;
        let va = mesh.vertices[a];
        let vb = mesh.vertices[b];
        let len = ((va[0] - vb[0]).powi(2) + (va[1] - vb[1]).powi(2)).sqrt();
        min_len[a] = min_len[a].min(len);
        min_len[b] = min_len[b].min(len);

        if keep_boundary && edge.is_boundary() {
            pinned[a] = true;
            pinned[b] = true;
        }
    }

    for i in 0..nv {
        if pinned[i] || !min_len[i].is_finite() {
            continue;
        }

        // Uniform direction: rejection-sample the unit disc, then normalize
        let dir = loop {
            let dx = rng.random_range(-1.0..=1.0);
            let dy = rng.random_range(-1.0..=1.0);
            let n2: f64 = dx * dx + dy * dy;
            if n2 > 1e-12 && n2 <= 1.0 {
                let n = n2.sqrt();
                break [dx / n, dy / n];
            }
        };

        mesh.vertices[i][0] += factor * min_len[i] * dir[0];
        mesh.vertices[i][1] += factor * min_len[i] * dir[1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generate::subdivided_rectangle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TOL: f64 = 1e-12;

    fn grid() -> Mesh2D {
        subdivided_rectangle([4, 4], [0.0, 0.0], [1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_same_seed_same_mesh() {
        let mut a = grid();
        let mut b = grid();

        distort_random(&mut a, 0.3, true, &mut StdRng::seed_from_u64(42));
        distort_random(&mut b, 0.3, true, &mut StdRng::seed_from_u64(42));

        assert_eq!(a.vertices, b.vertices);
    }

    #[test]
    fn test_different_seed_different_mesh() {
        let mut a = grid();
        let mut b = grid();

        distort_random(&mut a, 0.3, true, &mut StdRng::seed_from_u64(1));
        distort_random(&mut b, 0.3, true, &mut StdRng::seed_from_u64(2));

        assert_ne!(a.vertices, b.vertices);
    }

    #[test]
    fn test_keep_boundary_pins_boundary_vertices() {
        let reference = grid();
        let mut mesh = grid();
        distort_random(&mut mesh, 0.3, true, &mut StdRng::seed_from_u64(7));

        let mut on_boundary = vec![false; mesh.n_vertices];
        for edge in reference.edges.iter().filter(|e| e.is_boundary()) {
            on_boundary[edge.vertices.0] = true;
            on_boundary[edge.vertices.1] = true;
        }

        let mut interior_moved = 0;
        for i in 0..mesh.n_vertices {
            let d0 = (mesh.vertices[i][0] - reference.vertices[i][0]).abs();
            let d1 = (mesh.vertices[i][1] - reference.vertices[i][1]).abs();
            if on_boundary[i] {
                assert!(d0 < TOL && d1 < TOL, "boundary vertex {} moved", i);
            } else if d0 > TOL || d1 > TOL {
                interior_moved += 1;
            }
        }
        // 3 x 3 interior vertices on a 4 x 4 grid
        assert_eq!(interior_moved, 9);
    }

    #[test]
    fn test_displacement_magnitude() {
        let reference = grid();
        let mut mesh = grid();
        distort_random(&mut mesh, 0.3, true, &mut StdRng::seed_from_u64(11));

        // All edges of the uniform 4 x 4 unit grid have length 1/4
        let expected = 0.3 * 0.25;
        for i in 0..mesh.n_vertices {
            let dx = mesh.vertices[i][0] - reference.vertices[i][0];
            let dy = mesh.vertices[i][1] - reference.vertices[i][1];
            let d = (dx * dx + dy * dy).sqrt();
            assert!(
                d < TOL || (d - expected).abs() < TOL,
                "vertex {} moved by {}, expected 0 or {}",
                i,
                d,
                expected
            );
        }
    }

    #[test]
    fn test_without_keep_boundary_all_vertices_move() {
        let reference = grid();
        let mut mesh = grid();
        distort_random(&mut mesh, 0.3, false, &mut StdRng::seed_from_u64(3));

        for i in 0..mesh.n_vertices {
            let dx = mesh.vertices[i][0] - reference.vertices[i][0];
            let dy = mesh.vertices[i][1] - reference.vertices[i][1];
            assert!(
                (dx * dx + dy * dy).sqrt() > TOL,
                "vertex {} did not move",
                i
            );
        }
    }

    #[test]
    fn test_zero_factor_is_noop() {
        let reference = grid();
        let mut mesh = grid();
        distort_random(&mut mesh, 0.0, false, &mut StdRng::seed_from_u64(5));

        assert_eq!(mesh.vertices, reference.vertices);
    }

    #[test]
    fn test_topology_untouched() {
        let reference = grid();
        let mut mesh = grid();
        distort_random(&mut mesh, 0.3, true, &mut StdRng::seed_from_u64(9));

        assert_eq!(mesh.cells, reference.cells);
        assert_eq!(mesh.n_edges, reference.n_edges);
        assert_eq!(mesh.n_boundary_edges, reference.n_boundary_edges);
    }
}
