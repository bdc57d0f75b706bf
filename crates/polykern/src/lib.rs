//! Polygon-kernel engine and mesh analytics over 2D face meshes.
//!
//! The central routine computes the kernel of a simple planar polygon
//! (the locus from which the whole boundary is visible) by walking the
//! boundary and clipping a running region held as a sentinel chain.
//! Around it: an OFF-variant mesh loader/writer, per-mesh shape
//! statistics, and a seeded polygon sampler for tests and benches.
//!
//! All geometry is finite-precision `f64` with explicit tolerances;
//! see [`geom::GeomCfg`].

pub mod geom;
pub mod kernel;
pub mod mesh;
pub mod stats;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;
pub use geom::GeomCfg;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use nalgebra::Vector2 as Vec2;
    pub use crate::geom::{orient, turn_angle, GeomCfg};
    pub use crate::kernel::{face_kernel, kernel_mesh, polygon_kernel, Kernel};
    pub use crate::mesh::{read_off, write_off, Face, Mesh, OffError};
    pub use crate::stats::{mesh_stats, MeshStats};
}
