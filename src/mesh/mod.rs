//! Mesh representation and manipulation.
//!
//! Provides the mesh data structures and the operations built on them:
//! - 2D quadrilateral and 3D hexahedral meshes with face-based connectivity
//! - Generators (structured rectangles, a square plate with a round hole)
//! - Merging, extrusion, global refinement, coordinate transforms, and
//!   random distortion
//! - Curved boundary descriptors used during refinement
//! - Gmsh mesh file I/O

pub mod boundary_tags;
pub mod distort;
pub mod generate;
pub mod gmsh;
pub mod mesh2d;
pub mod mesh3d;
pub mod refine;
pub mod shapes;
pub mod transform;
pub mod traits;

pub use boundary_tags::BoundaryTag;
pub use distort::distort_random;
pub use generate::{extrude, merge, square_with_round_hole, subdivided_rectangle};
pub use gmsh::{read_msh, write_msh, GmshError};
pub use mesh2d::{CellFace, Edge, Mesh2D, MeshError};
pub use mesh3d::{Face, Mesh3D};
pub use refine::refine_global;
pub use shapes::{BoundaryShape, BoundaryShapes, CircleBoundary};
pub use transform::{transform, PointMap};
pub use traits::{FaceConnection, MeshTopology, Neighbor, Point};
