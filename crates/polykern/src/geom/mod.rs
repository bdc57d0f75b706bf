//! Tolerance-aware 2D primitives.
//!
//! Purpose
//! - Provide the small predicate/constructor set the kernel builder is
//!   phrased in: orientation, turn angles, line/segment intersection,
//!   span containment with infinite endpoints, far-point extrapolation.
//! - Keep numerics explicit: every comparison goes through `GeomCfg`
//!   tolerances or a tolerance threaded in by the caller.
//!
//! Why this design
//! - The kernel chain stands in for unbounded regions with far points,
//!   so the primitives must understand "this endpoint means a ray".
//!   `Span` carries that per-endpoint flag instead of separate
//!   function variants.
//! - Near-parallel carrier lines drift; `line_intersection` validates
//!   its result and reports the tolerance it needed (`LineHit::tol`)
//!   so callers stay consistent with it.

pub mod rand;

mod primitives;
mod types;

pub use primitives::{
    approx_eq, far_point, line_intersection, near_zero, on_segment_exact, on_span, orient,
    ray_side, segment_intersection, turn_angle, LineHit, Span,
};
pub use types::GeomCfg;
