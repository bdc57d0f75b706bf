//! The running kernel region: a vertex ring with two sentinel indices.
//!
//! While the region is unbounded the ring is an open chain whose first
//! and last entries are far points on the two outgoing rays; once a
//! clip closes the region the ring is cyclic and `bounded` is set.
//! `f` and `l` mark the first and last ring vertex inside the
//! half-plane currently being clipped. They are not stable across
//! splices: every splice re-seats them by searching the new ring for
//! the preserved vertex value, never by arithmetic on the old index.

use nalgebra::Vector2;

use crate::geom::{
    far_point, line_intersection, near_zero, on_segment_exact, on_span, orient, ray_side, GeomCfg,
    Span,
};

type Vec2 = Vector2<f64>;

/// Distance below which two clip intersections count as one point and
/// may swap roles to preserve orientation.
const NEAR_DUP: f64 = 1e-4;

/// The current clip excluded every ring vertex.
pub(super) struct EmptyKernel;

pub(super) struct Chain {
    k: Vec<Vec2>,
    f: usize,
    l: usize,
    bounded: bool,
}

impl Chain {
    /// Open chain `[far(F), apex, far(L)]` for the two rays leaving
    /// the first reflex vertex.
    pub(super) fn new(v_f: Vec2, apex: Vec2, v_l: Vec2) -> Chain {
        Chain {
            k: vec![v_f, apex, v_l],
            f: 0,
            l: 2,
            bounded: false,
        }
    }

    pub(super) fn head(&self) -> Vec2 {
        self.k[0]
    }

    pub(super) fn bounded(&self) -> bool {
        self.bounded
    }

    pub(super) fn into_points(self) -> Vec<Vec2> {
        self.k
    }

    #[inline]
    fn len(&self) -> isize {
        self.k.len() as isize
    }

    #[inline]
    fn at(&self, i: isize) -> Vec2 {
        self.k[i.rem_euclid(self.len()) as usize]
    }

    /// Intersection of the clip line `(v1, v2)` with the ring edge
    /// ending at `idx`, accepted only when the hit lies on the clip
    /// carrier within `carrier` and on the edge within its own span.
    /// Edge spans open up at the chain ends while unbounded.
    fn crossing(&self, idx: isize, v1: Vec2, v2: Vec2, carrier: Span, cfg: GeomCfg) -> Option<Vec2> {
        let e0 = self.at(idx - 1);
        let e1 = self.at(idx);
        let hit = line_intersection(v1, v2, e0, e1, cfg)?;
        let edge_span = Span::new(
            idx == 1 && !self.bounded,
            idx == self.len() - 1 && !self.bounded,
        );
        if on_span(v1, v2, hit.p, carrier, hit.tol) && on_span(e0, e1, hit.p, edge_span, hit.tol) {
            Some(hit.p)
        } else {
            None
        }
    }

    /// Clip against the half-plane of a reflex corner: the carrier of
    /// `(v1, v2)` extended backwards past `v1`, pivoting on `f`.
    pub(super) fn clip_reflex(
        &mut self,
        v1: Vec2,
        v2: Vec2,
        inf_v1: Vec2,
        _inf_v2: Vec2,
        cfg: GeomCfg,
    ) -> Result<(), EmptyKernel> {
        let m = self.len();
        let left = if !self.bounded && self.f == 0 {
            ray_side(v1, v2, self.at(self.f as isize + 1), self.at(self.f as isize), cfg)
        } else {
            orient(v1, v2, self.at(self.f as isize))
        };

        let new_k: Vec<Vec2>;
        if left < 0.0 {
            // f fell outside: find where the ring crosses the carrier.
            // CCW from f+1 up to l.
            let stop = (self.l as isize + 1).rem_euclid(m);
            let mut cur = self.f as isize + 1;
            let mut ccw: Option<(Vec2, isize)> = None;
            while cur != stop {
                let idx = cur.rem_euclid(m);
                if let Some(p) = self.crossing(idx, v1, v2, Span::PAST_A, cfg) {
                    ccw = Some((p, idx));
                    break;
                }
                cur = (cur + 1).rem_euclid(m);
            }
            let Some((mut w_p, w_t_id)) = ccw else {
                return Err(EmptyKernel);
            };

            // CW from f down to the chain head (full circle once bounded).
            let limit: isize = if !self.bounded {
                0
            } else {
                (self.f as isize + 1).rem_euclid(m)
            };
            let mut cur = self.f as isize;
            let mut cw: Option<(Vec2, isize)> = None;
            loop {
                let idx = cur.rem_euclid(m);
                if let Some(p) = self.crossing(idx, v1, v2, Span::PAST_A, cfg) {
                    cw = Some((p, idx));
                    break;
                }
                if idx == limit {
                    break;
                }
                cur = (cur - 1).rem_euclid(m);
            }

            if let Some((mut w_p2, w_s_id)) = cw {
                if self.bounded
                    && near_zero((w_p - w_p2).norm(), NEAR_DUP)
                    && (w_p2 - self.at(w_s_id)).norm() < (w_p - self.at(w_s_id)).norm()
                {
                    std::mem::swap(&mut w_p, &mut w_p2);
                }
                if self.bounded && w_t_id < w_s_id {
                    let mut v = seg(&self.k, w_t_id, w_s_id);
                    v.push(w_p2);
                    v.push(w_p);
                    new_k = v;
                } else {
                    self.push_sentinel_s(w_s_id, w_p2);
                    self.push_sentinel_t(w_t_id, w_p);
                    let mut v = seg(&self.k, 0, w_s_id);
                    v.push(w_p2);
                    v.push(w_p);
                    v.extend_from_slice(&self.k[w_t_id as usize..]);
                    new_k = v;
                }
                self.f = position(&new_k, w_p2).ok_or(EmptyKernel)?;
            } else {
                let head = self.k[0];
                let post_head = self.k[1];
                let tail = self.k[self.k.len() - 1];
                let pre_tail = self.k[self.k.len() - 2];
                if !(ray_side(v2, v1, post_head, head, cfg) > 0.0
                    && ray_side(v1, v2, pre_tail, tail, cfg) < 0.0)
                {
                    // The carrier bridges head and tail: the region closes.
                    let mut cur = m - 1;
                    let mut bridge: Option<(Vec2, isize)> = None;
                    for _ in 0..m {
                        let idx = cur.rem_euclid(m);
                        if let Some(p) = self.crossing(idx, v1, v2, Span::PAST_A, cfg) {
                            bridge = Some((p, idx));
                            break;
                        }
                        cur = (cur - 1).rem_euclid(m);
                    }
                    let Some((w_p2, w_r_id)) = bridge else {
                        return Err(EmptyKernel);
                    };
                    let mut v = seg(&self.k, w_t_id, w_r_id);
                    v.push(w_p2);
                    v.push(w_p);
                    new_k = v;
                    self.bounded = true;
                    self.f = position(&new_k, w_p2).ok_or(EmptyKernel)?;
                } else {
                    // Still open on the f side: fresh far point at the head.
                    let inf_v = far_point(w_p, v2, false);
                    let start_v = if (inf_v1 - v2).norm() > (inf_v - v2).norm() {
                        inf_v1
                    } else {
                        inf_v
                    };
                    let mut v = vec![start_v, w_p];
                    v.extend_from_slice(&self.k[w_t_id as usize..]);
                    new_k = v;
                    self.f = 0;
                }
            }
        } else {
            // f still inside: ring unchanged, advance f to the edge
            // that crosses out of the half-plane.
            new_k = self.k.clone();
            let mut cur = self.f as isize;
            let mut seated = false;
            for _ in 0..m {
                let idx = cur.rem_euclid(m);
                if orient(v2, self.at(idx), self.at(idx + 1)) < 0.0 {
                    self.f = position(&new_k, self.at(idx)).ok_or(EmptyKernel)?;
                    seated = true;
                    break;
                }
                cur = (cur + 1).rem_euclid(m);
            }
            if !seated {
                return Err(EmptyKernel);
            }
        }

        // Re-seat l: last old-ring vertex still inside, resolved into
        // the new ring by value.
        let limit: isize = if !self.bounded {
            m - 1
        } else {
            (self.l as isize - 2).rem_euclid(m)
        };
        let mut cur = self.l as isize - 1;
        let mut seated = false;
        while cur != limit {
            let u1 = self.at(cur);
            let u2 = self.at(cur + 1);
            if orient(v2, u1, u2) > 0.0 {
                self.l = position(&new_k, self.at(cur)).ok_or(EmptyKernel)?;
                seated = true;
                break;
            }
            cur = (cur + 1).rem_euclid(m);
        }
        if !seated {
            self.l = position(&new_k, self.at(self.l as isize)).ok_or(EmptyKernel)?;
        }
        self.k = new_k;
        Ok(())
    }

    /// Clip against the half-plane of a convex corner: the carrier of
    /// `(v1, v2)` extended forwards past `v2`, pivoting on `l`.
    pub(super) fn clip_convex(
        &mut self,
        v1: Vec2,
        v2: Vec2,
        _inf_v1: Vec2,
        inf_v2: Vec2,
        cfg: GeomCfg,
    ) -> Result<(), EmptyKernel> {
        let m = self.len();
        let left = if !self.bounded && self.l as isize == m - 1 {
            ray_side(v1, v2, self.at(self.l as isize - 1), self.at(self.l as isize), cfg)
        } else {
            orient(v1, v2, self.at(self.l as isize))
        };

        if left < 0.0 {
            // CW from l toward f.
            let mut cur = self.l as isize;
            let mut cw: Option<(Vec2, isize)> = None;
            while cur != self.f as isize {
                let idx = cur.rem_euclid(m);
                if let Some(p) = self.crossing(idx, v1, v2, Span::PAST_B, cfg) {
                    cw = Some((p, idx));
                    break;
                }
                cur = (cur - 1).rem_euclid(m);
            }
            let Some((mut w_p, w_t_id)) = cw else {
                return Err(EmptyKernel);
            };

            // CCW from l+1.
            let limit: isize = if !self.bounded {
                m
            } else {
                (self.l as isize - 1).rem_euclid(m)
            };
            let mut cur = self.l as isize + 1;
            let mut ccw: Option<(Vec2, isize)> = None;
            let mut steps = 0;
            while cur != limit && steps < m {
                let idx = cur.rem_euclid(m);
                if let Some(p) = self.crossing(idx, v1, v2, Span::PAST_B, cfg) {
                    ccw = Some((p, idx));
                    break;
                }
                cur = (cur + 1).rem_euclid(m);
                steps += 1;
            }

            let mut w_p2_opt: Option<Vec2> = None;
            let new_k: Vec<Vec2>;
            if let Some((mut w_p2, w_s_id)) = ccw {
                if self.bounded
                    && near_zero((w_p - w_p2).norm(), NEAR_DUP)
                    && (w_p2 - self.at(w_t_id)).norm() > (w_p - self.at(w_t_id)).norm()
                {
                    std::mem::swap(&mut w_p, &mut w_p2);
                }
                if self.bounded && w_s_id < w_t_id {
                    let mut v = seg(&self.k, w_s_id, w_t_id);
                    v.push(w_p);
                    v.push(w_p2);
                    new_k = v;
                } else {
                    self.push_sentinel_t_head(w_t_id, w_p);
                    self.push_sentinel_s_tail(w_s_id, w_p2);
                    let mut v = seg(&self.k, 0, w_t_id);
                    v.push(w_p);
                    v.push(w_p2);
                    v.extend_from_slice(&self.k[w_s_id as usize..]);
                    new_k = v;
                }
                w_p2_opt = Some(w_p2);
            } else {
                let head = self.k[0];
                let post_head = self.k[1];
                let tail = self.k[self.k.len() - 1];
                let pre_tail = self.k[self.k.len() - 2];
                if !(ray_side(v1, v2, post_head, head, cfg) > 0.0
                    && ray_side(v1, v2, pre_tail, tail, cfg) < 0.0)
                {
                    // Bridge: the region closes around the kept arc.
                    let mut cur = 1isize;
                    let mut bridge: Option<(Vec2, isize)> = None;
                    for _ in 0..m {
                        let idx = cur.rem_euclid(m);
                        if let Some(p) = self.crossing(idx, v1, v2, Span::PAST_B, cfg) {
                            bridge = Some((p, idx));
                            break;
                        }
                        cur = (cur + 1).rem_euclid(m);
                    }
                    let Some((w_p2, w_r_id)) = bridge else {
                        return Err(EmptyKernel);
                    };
                    let mut v = seg(&self.k, w_r_id, w_t_id);
                    v.push(w_p);
                    v.push(w_p2);
                    new_k = v;
                    self.bounded = true;
                    w_p2_opt = Some(w_p2);
                } else {
                    // Still open on the l side: fresh far point at the tail.
                    let inf_v = far_point(v1, w_p, true);
                    let end_v = if (v1 - inf_v2).norm() > (v1 - inf_v).norm() {
                        inf_v2
                    } else {
                        inf_v
                    };
                    let mut v = seg(&self.k, 0, w_t_id);
                    v.push(w_p);
                    v.push(end_v);
                    new_k = v;
                }
            }

            // Re-seat f, then l.
            if on_segment_exact(v1, w_p, v2, cfg.eps) {
                // Collinear hit: the old anchor may have been consumed,
                // recompute by linear scan over the old ring.
                let mut cur = self.f as isize;
                let mut seated = false;
                for _ in 0..m {
                    let idx = cur.rem_euclid(m);
                    if orient(v2, self.at(idx), self.at(idx + 1)) < 0.0 {
                        self.f = position(&new_k, self.at(idx)).ok_or(EmptyKernel)?;
                        seated = true;
                        break;
                    }
                    cur = (cur + 1).rem_euclid(m);
                }
                if !seated {
                    return Err(EmptyKernel);
                }
            } else {
                self.f = position(&new_k, w_p).ok_or(EmptyKernel)?;
            }

            if let Some(w_p2) = w_p2_opt {
                if on_segment_exact(v1, w_p2, v2, cfg.eps) {
                    self.l = position(&new_k, w_p2).ok_or(EmptyKernel)?;
                } else {
                    let len_new = new_k.len() as isize;
                    let start = position(&new_k, w_p2).ok_or(EmptyKernel)? as isize;
                    let limit: isize = if !self.bounded {
                        len_new - 1
                    } else {
                        (start - 2).rem_euclid(m)
                    };
                    let mut cur = start;
                    while cur != limit {
                        let u1 = new_k[cur.rem_euclid(len_new) as usize];
                        let u2 = new_k[(cur + 1).rem_euclid(len_new) as usize];
                        if orient(v2, u1, u2) > 0.0 {
                            let val = new_k[cur.rem_euclid(len_new) as usize];
                            self.l = position(&new_k, val).ok_or(EmptyKernel)?;
                            break;
                        }
                        cur = (cur + 1).rem_euclid(len_new);
                    }
                }
            } else {
                self.l = new_k.len() - 1;
            }
            self.k = new_k;
        } else {
            // l still inside: ring unchanged, re-seat both markers.
            let mut cur = self.f as isize;
            let mut seated = false;
            for _ in 0..m {
                let idx = cur.rem_euclid(m);
                if orient(v2, self.at(idx), self.at(idx + 1)) < 0.0 {
                    let val = self.at(idx);
                    self.f = position(&self.k, val).ok_or(EmptyKernel)?;
                    seated = true;
                    break;
                }
                cur = (cur + 1).rem_euclid(m);
            }
            if !seated {
                return Err(EmptyKernel);
            }
            if self.bounded {
                let limit = (self.l as isize - 2).rem_euclid(m);
                let mut cur = self.l as isize - 1;
                while cur != limit {
                    let u1 = self.at(cur);
                    let u2 = self.at(cur + 1);
                    if orient(v2, u1, u2) > 0.0 {
                        let val = self.at(cur);
                        self.l = position(&self.k, val).ok_or(EmptyKernel)?;
                        break;
                    }
                    cur = (cur + 1).rem_euclid(m);
                }
            }
        }
        Ok(())
    }

    // Sentinel pushes: when a clip intersection lands beyond a far
    // point, double the far point's offset along its ring edge so
    // sentinels stay beyond all finite geometry.

    fn push_sentinel_s(&mut self, w_s_id: isize, hit: Vec2) {
        let m = self.len();
        let s0 = self.at(w_s_id - 1);
        let s1 = self.at(w_s_id);
        if (hit - s1).norm() > (s0 - s1).norm() {
            let i = (w_s_id - 1).rem_euclid(m) as usize;
            self.k[i] = s0 + (s0 - s1);
        }
    }

    fn push_sentinel_t(&mut self, w_t_id: isize, hit: Vec2) {
        let m = self.len();
        let t0 = self.at(w_t_id - 1);
        let t1 = self.at(w_t_id);
        if (hit - t0).norm() > (t1 - t0).norm() {
            let i = w_t_id.rem_euclid(m) as usize;
            self.k[i] = t1 + (t1 - t0);
        }
    }

    fn push_sentinel_t_head(&mut self, w_t_id: isize, hit: Vec2) {
        let m = self.len();
        let t0 = self.at(w_t_id - 1);
        let t1 = self.at(w_t_id);
        if (hit - t1).norm() > (t0 - t1).norm() {
            let i = (w_t_id - 1).rem_euclid(m) as usize;
            self.k[i] = t0 + (t0 - t1);
        }
    }

    fn push_sentinel_s_tail(&mut self, w_s_id: isize, hit: Vec2) {
        let m = self.len();
        let s0 = self.at(w_s_id - 1);
        let s1 = self.at(w_s_id);
        if (hit - s0).norm() > (s1 - s0).norm() {
            let i = w_s_id.rem_euclid(m) as usize;
            self.k[i] = s1 + (s1 - s0);
        }
    }
}

// Python-style half-open slice that is empty when start >= end.
fn seg(k: &[Vec2], a: isize, b: isize) -> Vec<Vec2> {
    let (a, b) = (a.max(0) as usize, b.max(0) as usize);
    if a < b {
        k[a..b].to_vec()
    } else {
        Vec::new()
    }
}

// Value identity, not geometric proximity: splices copy points, so a
// preserved vertex compares bit-equal in the new ring.
fn position(k: &[Vec2], p: Vec2) -> Option<usize> {
    k.iter().position(|q| q.x == p.x && q.y == p.y)
}
