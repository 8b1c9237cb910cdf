//! I/O utilities for writing visualization files.
//!
//! This module provides:
//! - **EPS output**: Mesh wireframe figures viewable in any PostScript
//!   consumer, for both 2D and 3D meshes
//!
//! Mesh file input and output (Gmsh MSH 2.2) lives next to the mesh data
//! structures in [`crate::mesh::gmsh`].

pub mod eps;

pub use eps::{write_eps, EpsError};
