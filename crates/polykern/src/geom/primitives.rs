use nalgebra::Vector2;

use super::types::GeomCfg;

type Vec2 = Vector2<f64>;

/// Multiplier that puts a far point well outside any finite geometry.
const FAR_MULT: f64 = 1e5;

/// Below this separation two points count as coincident for the
/// purpose of direction extraction.
const DEGENERATE_LEN: f64 = 1e-6;

/// Symmetric closeness test with relative and absolute slack:
/// `|a - b| <= max(rel * max(|a|, |b|), abs)`.
#[inline]
pub fn approx_eq(a: f64, b: f64, rel: f64, abs: f64) -> bool {
    (a - b).abs() <= (rel * a.abs().max(b.abs())).max(abs)
}

/// `|x| <= abs`.
#[inline]
pub fn near_zero(x: f64, abs: f64) -> bool {
    x.abs() <= abs
}

/// Signed-area proxy for the ordered triple `(a, b, c)`.
///
/// Positive when `c` lies left of the directed line `a -> b`, negative
/// when right, near zero (caller's tolerance) when collinear.
#[inline]
pub fn orient(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Interior turn angle at `p2` for the ordered triple, in degrees in
/// `[0, 360)`: the CCW sweep from the `p1`-arm to the `p3`-arm.
///
/// Bearings are compass-style (`atan2(dx, dy)`), measured from `p2`.
pub fn turn_angle(p1: Vec2, p2: Vec2, p3: Vec2) -> f64 {
    let deg1 = (p1.x - p2.x).atan2(p1.y - p2.y).to_degrees().rem_euclid(360.0);
    let deg3 = (p3.x - p2.x).atan2(p3.y - p2.y).to_degrees().rem_euclid(360.0);
    if deg1 <= deg3 {
        deg3 - deg1
    } else {
        360.0 - (deg1 - deg3)
    }
}

/// A point far along the line through `a` and `b`: beyond `b` (in the
/// `a -> b` direction) when `along_b`, else behind `a`. Degenerate
/// inputs return the anchor unchanged.
pub fn far_point(a: Vec2, b: Vec2, along_b: bool) -> Vec2 {
    let len = (b - a).norm();
    if near_zero(len, DEGENERATE_LEN) {
        return if along_b { b } else { a };
    }
    let dir = (b - a) / len;
    if along_b {
        b + dir * FAR_MULT
    } else {
        a - dir * FAR_MULT
    }
}

fn carrier_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> (f64, Vec2) {
    let det = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
    let ab = a.x * b.y - a.y * b.x;
    let cd = c.x * d.y - c.y * d.x;
    let px = (ab * (c.x - d.x) - (a.x - b.x) * cd) / det;
    let py = (ab * (c.y - d.y) - (a.y - b.y) * cd) / det;
    (det, Vector2::new(px, py))
}

/// Intersection of the closed segments `ab` and `cd`, or `None` when
/// the carriers are near parallel or the point leaves either segment
/// (with `eps` slack on the bounding boxes).
pub fn segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2, eps: f64) -> Option<Vec2> {
    let (det, p) = carrier_intersection(a, b, c, d);
    if near_zero(det, eps) {
        return None;
    }
    let in_box = |lo: f64, hi: f64, v: f64| lo.min(hi) - eps <= v && v <= lo.max(hi) + eps;
    if in_box(a.x, b.x, p.x)
        && in_box(a.y, b.y, p.y)
        && in_box(c.x, d.x, p.x)
        && in_box(c.y, d.y, p.y)
    {
        Some(p)
    } else {
        None
    }
}

/// A carrier-line intersection together with the tolerance that was
/// needed to confirm it.
#[derive(Clone, Copy, Debug)]
pub struct LineHit {
    pub p: Vec2,
    /// Tolerance under which `p` reads as on both carrier lines.
    /// Starts at `GeomCfg::eps` and escalates by powers of ten on
    /// near-parallel inputs; follow-up span checks against the same
    /// lines must use this value.
    pub tol: f64,
}

/// Intersection of the lines through `ab` and `cd`, independent of
/// segment containment. `None` when `|det| <= eps_det`.
pub fn line_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2, cfg: GeomCfg) -> Option<LineHit> {
    let (det, p) = carrier_intersection(a, b, c, d);
    if near_zero(det, cfg.eps_det) {
        return None;
    }
    let mut tol = cfg.eps;
    while !(near_zero(orient(a, b, p), tol) && near_zero(orient(c, d, p), tol)) {
        tol *= 10.0;
        if !tol.is_finite() {
            return None;
        }
    }
    Some(LineHit { p, tol })
}

/// Which part of the line through two endpoints a span covers.
///
/// `inf_a` extends the span to infinity behind the first endpoint,
/// `inf_b` beyond the second; both set means the whole line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub inf_a: bool,
    pub inf_b: bool,
}

impl Span {
    pub const CLOSED: Span = Span { inf_a: false, inf_b: false };
    pub const PAST_A: Span = Span { inf_a: true, inf_b: false };
    pub const PAST_B: Span = Span { inf_a: false, inf_b: true };
    pub const LINE: Span = Span { inf_a: true, inf_b: true };

    #[inline]
    pub fn new(inf_a: bool, inf_b: bool) -> Span {
        Span { inf_a, inf_b }
    }
}

/// Is `p` on the line through `a`, `b` and within the part of it the
/// span covers, under `tol`?
///
/// Closed spans use the axis-aligned bounding box with slack; a single
/// infinite endpoint constrains each coordinate on the finite side
/// only, with the sense given by the sign of `b - a`.
pub fn on_span(a: Vec2, b: Vec2, p: Vec2, span: Span, tol: f64) -> bool {
    let on_line = near_zero(orient(a, b, p), tol);
    match (span.inf_a, span.inf_b) {
        (false, false) => {
            let lo_x = a.x.min(b.x);
            let hi_x = a.x.max(b.x);
            let lo_y = a.y.min(b.y);
            let hi_y = a.y.max(b.y);
            (lo_x <= p.x || approx_eq(lo_x, p.x, tol, tol))
                && (p.x <= hi_x || approx_eq(hi_x, p.x, tol, tol))
                && (lo_y <= p.y || approx_eq(lo_y, p.y, tol, tol))
                && (p.y <= hi_y || approx_eq(hi_y, p.y, tol, tol))
                && on_line
        }
        (false, true) => beyond(a.x, p.x, a.x < b.x, tol) && beyond(a.y, p.y, a.y < b.y, tol) && on_line,
        (true, false) => before(b.x, p.x, a.x < b.x, tol) && before(b.y, p.y, a.y < b.y, tol) && on_line,
        (true, true) => on_line,
    }
}

// Past the anchor in the travel direction (ray side of `inf_b`).
#[inline]
fn beyond(anchor: f64, v: f64, increasing: bool, tol: f64) -> bool {
    if increasing {
        anchor < v || approx_eq(anchor, v, tol, tol)
    } else {
        v < anchor || approx_eq(anchor, v, tol, tol)
    }
}

// Not yet past the endpoint in the travel direction (`inf_a` side).
#[inline]
fn before(end: f64, v: f64, increasing: bool, tol: f64) -> bool {
    if increasing {
        v <= end || approx_eq(end, v, tol, tol)
    } else {
        end <= v || approx_eq(end, v, tol, tol)
    }
}

/// Like the closed-span check but with exact bounding-box comparisons;
/// only the collinearity test keeps `eps` slack.
pub fn on_segment_exact(a: Vec2, b: Vec2, p: Vec2, eps: f64) -> bool {
    a.x.min(b.x) <= p.x
        && p.x <= a.x.max(b.x)
        && a.y.min(b.y) <= p.y
        && p.y <= a.y.max(b.y)
        && near_zero(orient(a, b, p), eps)
}

/// Orientation of `q` against the directed line `a -> b`, aware that
/// `q` may be a sentinel far point: when the carrier of `ab` meets the
/// line through `pq` only beyond `q` (never within the segment), the
/// sign is flipped.
pub fn ray_side(a: Vec2, b: Vec2, p: Vec2, q: Vec2, cfg: GeomCfg) -> f64 {
    let left = orient(a, b, q);
    if let Some(hit) = line_intersection(a, b, p, q, cfg) {
        if !on_span(p, q, hit.p, Span::CLOSED, cfg.eps) && on_span(p, q, hit.p, Span::PAST_B, cfg.eps)
        {
            return -left;
        }
    }
    left
}
