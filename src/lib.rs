//! # gridkit-rs
//!
//! A library for building and manipulating quadrilateral and hexahedral
//! meshes.
//!
//! This crate provides the building blocks the bundled demo driver is made
//! of:
//! - 2D quad and 3D hex meshes with shared vertices and face connectivity
//! - Structured generators and a plate-with-round-hole generator
//! - Mesh merging with coordinate-based vertex identification
//! - Extrusion of 2D meshes into 3D
//! - Global refinement with curved boundary descriptors
//! - Per-vertex coordinate transforms and seedable random distortion
//! - Gmsh MSH 2.2 reading and writing
//! - EPS wireframe export and mesh summary reports

pub mod io;
pub mod mesh;
pub mod report;

// Re-export main types for convenience
pub use io::{write_eps, EpsError};
pub use mesh::{
    distort_random, extrude, merge, read_msh, refine_global, square_with_round_hole,
    subdivided_rectangle, transform, write_msh, BoundaryShape, BoundaryShapes, BoundaryTag,
    CircleBoundary, Edge, Face, FaceConnection, GmshError, Mesh2D, Mesh3D, MeshError,
    MeshTopology, Neighbor, Point, PointMap,
};
pub use report::{report_and_export, MeshReport};
