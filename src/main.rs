//! Demo driver: seven mesh construction scenarios.
//!
//! Each scenario builds or loads a mesh, optionally reshapes it, prints the
//! summary report to stdout, and writes a `grid-N.eps` wireframe into the
//! working directory:
//!
//! 1. load a quad mesh from a Gmsh file
//! 2. merge a plate-with-hole mesh with a rectangle attached to its right
//! 3. move a vertex row, then refine with a circular hole boundary
//! 4. extrude the plate-with-hole mesh into a 3D slab
//! 5. deform a rectangle with a plain-function sine transform
//! 6. grade a unit square with a configurable tanh transform
//! 7. randomly distort a unit square, keeping the boundary fixed
//!
//! The first failing scenario is logged and aborts the run. There are no
//! command line arguments; set `RUST_LOG` to adjust diagnostics.

use std::f64::consts::PI;
use std::path::Path;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use gridkit_rs::io::EpsError;
use gridkit_rs::mesh::{
    distort_random, extrude, merge, read_msh, refine_global, square_with_round_hole,
    subdivided_rectangle, transform, BoundaryShapes, BoundaryTag, CircleBoundary, GmshError,
    MeshError, PointMap,
};
use gridkit_rs::report::report_and_export;

/// Input mesh for the first scenario.
const INPUT_MESH: &str = "data/plate.msh";

/// Hole radius and plate half-width shared by scenarios 2, 3, and 4.
const INNER_RADIUS: f64 = 0.25;
const OUTER_HALF_WIDTH: f64 = 1.0;

/// Vertex identification tolerance when merging.
const MERGE_TOLERANCE: f64 = 1e-12;

/// Cell layers and total height for the extrusion scenario.
const EXTRUSION_LAYERS: usize = 3;
const EXTRUSION_HEIGHT: f64 = 2.0;

/// Distortion strength and seed for the final scenario.
const DISTORT_FACTOR: f64 = 0.3;
const DISTORT_SEED: u64 = 42;

#[derive(Debug, Error)]
enum DemoError {
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("mesh file error: {0}")]
    Gmsh(#[from] GmshError),

    #[error("figure export error: {0}")]
    Eps(#[from] EpsError),
}

/// Load a mesh written by Gmsh and report it.
fn grid_1() -> Result<(), DemoError> {
    let mesh = read_msh(Path::new(INPUT_MESH))?;
    report_and_export(&mesh, Path::new("grid-1.eps"))?;
    Ok(())
}

/// Merge the plate-with-hole mesh with a rectangle sharing its right edge.
///
/// The rectangle's subdivision is chosen so both meshes have identical
/// vertices along x = 1; merging identifies them and the interface becomes
/// interior.
fn grid_2() -> Result<(), DemoError> {
    let hole = square_with_round_hole(INNER_RADIUS, OUTER_HALF_WIDTH)?;
    let rect = subdivided_rectangle([3, 2], [1.0, -1.0], [4.0, 1.0])?;

    let merged = merge(&hole, &rect, MERGE_TOLERANCE)?;
    report_and_export(&merged, Path::new("grid-2.eps"))?;
    Ok(())
}

/// Move the top vertex row of the plate up, then refine against the hole.
///
/// The selection predicate tests the current y coordinate, so a vertex
/// moved out of the band is not moved again if the transform reruns. The
/// hole keeps its circular shape under refinement because tag 1 has a
/// circle descriptor attached.
fn grid_3() -> Result<(), DemoError> {
    let mut mesh = square_with_round_hole(INNER_RADIUS, OUTER_HALF_WIDTH)?;
    transform(&mut mesh, &|p: [f64; 2]| {
        if (p[1] - 1.0).abs() < 1e-5 {
            [p[0], p[1] + 0.5]
        } else {
            p
        }
    });

    let mut shapes = BoundaryShapes::new();
    shapes.attach(
        BoundaryTag(1),
        CircleBoundary::new([0.0, 0.0], INNER_RADIUS),
    );
    let refined = refine_global(&mesh, 2, &shapes)?;

    report_and_export(&refined, Path::new("grid-3.eps"))?;

    // The registry owns its shapes; dropping the descriptor early is
    // allowed once refinement is done
    shapes.detach(BoundaryTag(1));
    Ok(())
}

/// Extrude the plate-with-hole mesh into a slab of hexahedra.
fn grid_4() -> Result<(), DemoError> {
    let base = square_with_round_hole(INNER_RADIUS, OUTER_HALF_WIDTH)?;
    let slab = extrude(&base, EXTRUSION_LAYERS, EXTRUSION_HEIGHT)?;

    report_and_export(&slab, Path::new("grid-4.eps"))?;
    Ok(())
}

/// Vertical sine bump, used as a plain-function transform.
fn sine_bump(p: [f64; 2]) -> [f64; 2] {
    [p[0], p[1] + (p[0] * PI / 5.0).sin()]
}

/// Deform a wide rectangle with [`sine_bump`].
fn grid_5() -> Result<(), DemoError> {
    let mut mesh = subdivided_rectangle([14, 2], [0.0, 0.0], [10.0, 1.0])?;
    transform(&mut mesh, &sine_bump);

    report_and_export(&mesh, Path::new("grid-5.eps"))?;
    Ok(())
}

/// Maps y through a normalized tanh, grading cells toward y = 1.
///
/// Carries its steepness as state to show a transform object with
/// configuration, in contrast to the plain function of the fifth scenario.
struct SigmoidStretch {
    steepness: f64,
}

impl SigmoidStretch {
    fn new(steepness: f64) -> Self {
        Self { steepness }
    }
}

impl PointMap<[f64; 2]> for SigmoidStretch {
    fn map(&self, p: [f64; 2]) -> [f64; 2] {
        [p[0], (self.steepness * p[1]).tanh() / self.steepness.tanh()]
    }
}

/// Grade a unit square with a [`SigmoidStretch`] object.
fn grid_6() -> Result<(), DemoError> {
    let mut mesh = subdivided_rectangle([40, 40], [0.0, 0.0], [1.0, 1.0])?;
    transform(&mut mesh, &SigmoidStretch::new(2.0));

    report_and_export(&mesh, Path::new("grid-6.eps"))?;
    Ok(())
}

/// Randomly distort a unit square with a fixed seed, boundary pinned.
fn grid_7() -> Result<(), DemoError> {
    let mut mesh = subdivided_rectangle([16, 16], [0.0, 0.0], [1.0, 1.0])?;
    let mut rng = StdRng::seed_from_u64(DISTORT_SEED);
    distort_random(&mut mesh, DISTORT_FACTOR, true, &mut rng);

    report_and_export(&mesh, Path::new("grid-7.eps"))?;
    Ok(())
}

fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        if !filters.trim().is_empty() {
            builder.parse_filters(&filters);
        }
    }

    if let Err(err) = builder.try_init() {
        eprintln!("failed to initialize logger: {}", err);
    }
}

fn main() {
    init_logger();

    let scenarios: [(&str, fn() -> Result<(), DemoError>); 7] = [
        ("grid_1", grid_1),
        ("grid_2", grid_2),
        ("grid_3", grid_3),
        ("grid_4", grid_4),
        ("grid_5", grid_5),
        ("grid_6", grid_6),
        ("grid_7", grid_7),
    ];

    for (name, scenario) in scenarios {
        if let Err(err) = scenario() {
            log::error!("{} failed: {}", name, err);
            process::exit(1);
        }
    }
}
