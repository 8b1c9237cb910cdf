//! Abstract mesh traits for dimension-independent operations.
//!
//! This module provides:
//! - [`Point`]: Coordinate type abstraction for 2D and 3D
//! - [`MeshTopology`]: Cell and face connectivity
//! - [`FaceConnection`]: Interior/boundary classification of a face

pub mod mesh_traits;
pub mod point;

pub use mesh_traits::{FaceConnection, MeshTopology, Neighbor};
pub use point::Point;
