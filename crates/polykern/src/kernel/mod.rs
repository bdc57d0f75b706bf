//! Kernel of a simple polygon.
//!
//! Purpose
//! - Compute the set of points from which every point of a CCW simple
//!   polygon is visible, reported as a polygon ring.
//!
//! Why this design
//! - Rather than carrying half-plane equations, the running
//!   intersection is a vertex ring whose open ends are far points on
//!   the two rays leaving the first reflex vertex (`chain::Chain`).
//!   Clipping then stays a pure ring-splice operation; a `bounded`
//!   flag records when the region closes.
//! - The walk starts at the first reflex vertex, so a polygon without
//!   one short-circuits to itself.
//!
//! Clockwise input gets orientation-reversed behavior and no
//! correctness claim; self-intersecting input is undefined (the walk
//! may return an empty or meaningless region but never touches state
//! outside the call).

mod chain;

use nalgebra::Vector2;

use crate::geom::{approx_eq, far_point, near_zero, turn_angle, GeomCfg};
use crate::mesh::{Face, Mesh};
use chain::Chain;

type Vec2 = Vector2<f64>;

/// Face color marking a convex input (kernel equals the polygon).
pub const CONVEX_COLOR: [u8; 3] = [255, 255, 0];
/// Face color marking a strict-subset kernel.
pub const CLIPPED_COLOR: [u8; 3] = [255, 0, 0];

/// Outcome of a kernel computation.
///
/// `Unbounded` carries an open chain whose first and last points are
/// far points on the two outgoing rays; it only survives to the end
/// for open chains, not simple polygons.
#[derive(Clone, Debug, PartialEq)]
pub enum Kernel {
    Empty,
    Unbounded(Vec<Vec2>),
    Bounded(Vec<Vec2>),
}

impl Kernel {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Kernel::Empty)
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        matches!(self, Kernel::Bounded(_))
    }

    /// The ring, for either non-empty variant.
    pub fn points(&self) -> Option<&[Vec2]> {
        match self {
            Kernel::Empty => None,
            Kernel::Unbounded(v) | Kernel::Bounded(v) => Some(v),
        }
    }

    pub fn into_points(self) -> Option<Vec<Vec2>> {
        match self {
            Kernel::Empty => None,
            Kernel::Unbounded(v) | Kernel::Bounded(v) => Some(v),
        }
    }
}

/// Index of the first reflex vertex, or `points.len()` when the
/// polygon is convex.
///
/// The straightness slack here is deliberately loose (`eps_reflex`,
/// relative and absolute): a numerically near-straight corner must not
/// start a kernel walk.
pub fn first_reflex(points: &[Vec2], cfg: GeomCfg) -> usize {
    let n = points.len() as isize;
    let pt = |i: isize| points[i.rem_euclid(n) as usize];
    let mut i = 0isize;
    while i != n {
        let angle = turn_angle(pt(i - 1), pt(i), pt(i + 1));
        if angle > 180.0 && !approx_eq(180.0, angle, cfg.eps_reflex, cfg.eps_reflex) {
            break;
        }
        i += 1;
    }
    i as usize
}

/// Kernel of the polygon given as a CCW ring of points.
pub fn polygon_kernel(points: &[Vec2], cfg: GeomCfg) -> Kernel {
    let n = points.len();
    if n < 3 {
        return Kernel::Empty;
    }
    let start = first_reflex(points, cfg);
    if start == n {
        // Convex fast path.
        return Kernel::Bounded(points.to_vec());
    }

    let ni = n as isize;
    let pt = |i: isize| points[i.rem_euclid(ni) as usize];
    let s = start as isize;
    let apex = pt(s);
    let v_f = apex + (apex - pt(s + 1)) * 100.0;
    let v_l = apex + (apex - pt(s - 1)) * 100.0;
    let mut chain = Chain::new(v_f, apex, v_l);

    let mut skip: isize = 1;
    for p_i in 1..ni - 1 {
        let v0 = pt(s + p_i - 1);
        let v1 = pt(s + p_i);
        let mut v2 = pt(s + p_i + 1);
        let inf_v1 = far_point(v1, v2, false);
        let mut inf_v2 = far_point(v1, v2, true);

        let angle = turn_angle(v0, v1, v2);
        if approx_eq(angle, 0.0, cfg.eps, cfg.eps) {
            // Degenerate corner (coincident or folded-back vertices).
            return Kernel::Empty;
        }
        if skip > 1 {
            // Corner swallowed by a collinear run already clipped for.
            skip -= 1;
            continue;
        }

        // Collapse a run of near-straight corners so the clip line
        // reflects the direction after the run.
        let mut next_angle = turn_angle(
            pt(s + p_i + skip - 1),
            pt(s + p_i + skip),
            pt(s + p_i + skip + 1),
        );
        let mut closed_early = false;
        while near_zero(next_angle - 180.0, cfg.eps_flat) {
            v2 = pt(s + p_i + skip + 1);
            inf_v2 = far_point(v1, v2, true);
            skip += 1;
            let mid = pt(s + p_i + skip);
            next_angle = turn_angle(pt(s + p_i + skip - 1), mid, pt(s + p_i + skip + 1));
            let head = chain.head();
            if approx_eq(mid.x, head.x, cfg.eps, cfg.eps) && approx_eq(mid.y, head.y, cfg.eps, cfg.eps)
            {
                // The run reached the chain head: the walk has closed.
                closed_early = true;
                break;
            }
        }
        if closed_early {
            break;
        }

        let clipped = if angle > 180.0 {
            chain.clip_reflex(v1, v2, inf_v1, inf_v2, cfg)
        } else {
            chain.clip_convex(v1, v2, inf_v1, inf_v2, cfg)
        };
        if clipped.is_err() {
            return Kernel::Empty;
        }
    }

    if chain.bounded() {
        Kernel::Bounded(chain.into_points())
    } else {
        Kernel::Unbounded(chain.into_points())
    }
}

/// Kernel of a mesh face.
///
/// Indices must be in range for `vertices` (the OFF reader validates
/// them on load).
pub fn face_kernel(face: &[usize], vertices: &[Vec2], cfg: GeomCfg) -> Kernel {
    let resolved: Vec<Vec2> = face.iter().map(|&i| vertices[i]).collect();
    polygon_kernel(&resolved, cfg)
}

/// Per-face kernels of a whole mesh.
///
/// Faces with an empty kernel are omitted. Each surviving face gets
/// fresh vertex indices (no dedup) and a color: yellow when the input
/// was convex (kernel equals the face), red for a strict subset.
pub fn kernel_mesh(mesh: &Mesh, cfg: GeomCfg) -> Mesh {
    let mut out = Mesh::default();
    for face in &mesh.faces {
        let original: Vec<Vec2> = face.verts.iter().map(|&i| mesh.vertices[i]).collect();
        let kernel = polygon_kernel(&original, cfg);
        let Some(pts) = kernel.points() else { continue };
        if pts.is_empty() {
            continue;
        }
        let color = if pts == &original[..] {
            CONVEX_COLOR
        } else {
            CLIPPED_COLOR
        };
        let base = out.vertices.len();
        out.vertices.extend_from_slice(pts);
        out.faces.push(Face {
            verts: (base..base + pts.len()).collect(),
            color: Some(color),
        });
    }
    out
}

#[cfg(test)]
mod tests;
