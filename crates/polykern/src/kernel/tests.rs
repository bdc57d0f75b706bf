use super::*;
use crate::geom::rand::{draw_convex_polygon, draw_star_polygon, RadialCfg, ReplayToken};
use crate::geom::segment_intersection;
use crate::mesh::read_off;
use crate::stats::area;
use nalgebra::Vector2;
use proptest::prelude::*;

fn v(x: f64, y: f64) -> Vec2 {
    Vector2::new(x, y)
}

fn cfg() -> GeomCfg {
    GeomCfg::default()
}

fn l_shape() -> Vec<Vec2> {
    vec![
        v(0.0, 0.0),
        v(1.0, 0.0),
        v(1.0, 1.0),
        v(2.0, 1.0),
        v(2.0, 2.0),
        v(0.0, 2.0),
    ]
}

/// A band with a spike from below and one from above whose visibility
/// wedges have disjoint x-ranges, so no point sees both spike flanks.
fn double_notched_band() -> Vec<Vec2> {
    vec![
        v(0.0, 0.0),
        v(1.0, 0.0),
        v(1.5, 3.0),
        v(2.0, 0.0),
        v(6.0, 0.0),
        v(6.0, 4.0),
        v(5.0, 4.0),
        v(4.5, 1.0),
        v(4.0, 4.0),
        v(0.0, 4.0),
    ]
}

/// Pinwheel star: five valleys at radius 0.4 and five tips at radius 1
/// leaning 8 degrees past the next valley. The five backward edges
/// tip -> valley each exclude the center, and their 72-degree rotated
/// half-planes have empty common intersection.
fn pinwheel_star() -> Vec<Vec2> {
    let mut pts = Vec::new();
    for k in 0..5 {
        let valley = (72.0 * k as f64).to_radians();
        let tip = (72.0 * k as f64 + 80.0).to_radians();
        pts.push(v(0.4 * valley.cos(), 0.4 * valley.sin()));
        pts.push(v(tip.cos(), tip.sin()));
    }
    pts
}

#[test]
fn first_reflex_finds_the_notch() {
    let c = cfg();
    assert_eq!(first_reflex(&l_shape(), c), 2);
    let square = [v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)];
    assert_eq!(first_reflex(&square, c), 4);
    assert_eq!(first_reflex(&double_notched_band(), c), 2);
}

#[test]
fn first_reflex_tolerates_near_straight_corners() {
    // A corner a hair over 180 degrees must not start a kernel walk.
    let poly = [
        v(0.0, 0.0),
        v(1.0, 0.0),
        v(2.0, 1e-7),
        v(3.0, 0.0),
        v(3.0, 2.0),
        v(0.0, 2.0),
    ];
    assert_eq!(first_reflex(&poly, cfg()), poly.len());
}

#[test]
fn unit_square_kernel_is_the_square() {
    let square = vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)];
    let k = polygon_kernel(&square, cfg());
    assert_eq!(k, Kernel::Bounded(square.clone()));
    let ratio = area(k.points().unwrap()) / area(&square);
    assert_eq!(ratio, 1.0);
}

#[test]
fn two_by_two_square_kernel_area() {
    let square = vec![v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0), v(0.0, 2.0)];
    let k = polygon_kernel(&square, cfg());
    let pts = k.points().unwrap();
    assert_eq!(pts, &square[..]);
    assert_eq!(area(pts), 4.0);
}

#[test]
fn regular_pentagon_is_its_own_kernel() {
    let pentagon: Vec<Vec2> = (0..5)
        .map(|k| {
            let theta = (72.0 * k as f64 + 90.0).to_radians();
            v(theta.cos(), theta.sin())
        })
        .collect();
    let k = polygon_kernel(&pentagon, cfg());
    assert!(k.is_bounded());
    assert_eq!(k.points().unwrap(), &pentagon[..]);
}

#[test]
fn l_shape_kernel_is_one_third() {
    let poly = l_shape();
    let k = polygon_kernel(&poly, cfg());
    assert!(k.is_bounded(), "got {k:?}");
    let pts = k.points().unwrap();
    assert!((area(pts) - 1.0).abs() < 1e-9, "kernel area {}", area(pts));
    assert!((area(pts) / area(&poly) - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn double_notched_band_has_empty_kernel() {
    assert_eq!(polygon_kernel(&double_notched_band(), cfg()), Kernel::Empty);
}

#[test]
fn pinwheel_star_has_empty_kernel() {
    assert_eq!(polygon_kernel(&pinwheel_star(), cfg()), Kernel::Empty);
}

#[test]
fn too_few_vertices_yield_empty() {
    assert_eq!(polygon_kernel(&[v(0.0, 0.0), v(1.0, 0.0)], cfg()), Kernel::Empty);
    assert_eq!(polygon_kernel(&[], cfg()), Kernel::Empty);
}

#[test]
fn kernel_is_idempotent() {
    let k1 = polygon_kernel(&l_shape(), cfg());
    let pts1 = k1.points().unwrap().to_vec();
    // A kernel is convex, so it is its own kernel.
    let k2 = polygon_kernel(&pts1, cfg());
    assert_eq!(k2.points().unwrap(), &pts1[..]);
}

#[test]
fn collinear_run_is_collapsed() {
    // The notch flank continues through two straight intermediate
    // vertices; the clip must reflect the direction after the run.
    let poly = vec![
        v(0.0, 0.0),
        v(1.0, 0.0),
        v(1.0, 1.0),
        v(1.5, 1.0),
        v(1.75, 1.0),
        v(2.0, 1.0),
        v(2.0, 2.0),
        v(0.0, 2.0),
    ];
    let k = polygon_kernel(&poly, cfg());
    let pts = k.points().unwrap();
    assert!((area(pts) - 1.0).abs() < 1e-9, "kernel area {}", area(pts));
}

/// Every polygon vertex must be visible from a kernel point: no edge
/// may properly separate them.
fn assert_sees_all_vertices(q: Vec2, poly: &[Vec2]) {
    let eps = cfg().eps;
    let n = poly.len();
    for (vi, &target) in poly.iter().enumerate() {
        for e in 0..n {
            if e == vi || (e + 1) % n == vi {
                continue;
            }
            let a = poly[e];
            let b = poly[(e + 1) % n];
            if let Some(x) = segment_intersection(q, target, a, b, eps) {
                assert!(
                    (x - target).norm() < 1e-6,
                    "edge {e} blocks vertex {vi}: crossing at {x:?}"
                );
            }
        }
    }
}

#[test]
fn l_shape_kernel_points_see_every_vertex() {
    let poly = l_shape();
    let k = polygon_kernel(&poly, cfg());
    let pts = k.points().unwrap();
    // Kernel vertices and centroid are all witnesses.
    let centroid = pts.iter().fold(v(0.0, 0.0), |acc, p| acc + p) / pts.len() as f64;
    assert_sees_all_vertices(centroid, &poly);
}

#[test]
fn face_kernel_resolves_indices() {
    let text = "OFF\n4 1 0\n0 0\n1 0\n1 1\n0 1\n4 0 1 2 3\n";
    let mesh = read_off(text.as_bytes()).unwrap();
    let k = face_kernel(&mesh.faces[0].verts, &mesh.vertices, cfg());
    assert!(k.is_bounded());
    assert_eq!(k.points().unwrap().len(), 4);
}

#[test]
fn kernel_mesh_colors_and_drops_faces() {
    // One convex face, one notched face, one face with empty kernel.
    let mut mesh = crate::mesh::Mesh::default();
    let add_face = |mesh: &mut crate::mesh::Mesh, pts: &[Vec2]| {
        let base = mesh.vertices.len();
        mesh.vertices.extend_from_slice(pts);
        mesh.faces.push(crate::mesh::Face::new((base..base + pts.len()).collect()));
    };
    add_face(&mut mesh, &[v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)]);
    add_face(&mut mesh, &l_shape());
    add_face(&mut mesh, &double_notched_band());

    let out = kernel_mesh(&mesh, cfg());
    assert_eq!(out.faces.len(), 2);
    assert_eq!(out.faces[0].color, Some(CONVEX_COLOR));
    assert_eq!(out.faces[1].color, Some(CLIPPED_COLOR));
    // Fresh indices per face, no dedup.
    assert_eq!(out.faces[0].verts, vec![0, 1, 2, 3]);
    let second = &out.faces[1].verts;
    assert_eq!(second[0], 4);
    assert_eq!(out.vertices.len(), 4 + second.len());
}

proptest! {
    /// kernel(P) = P for convex P, by the reflex-scan fast path.
    #[test]
    fn convex_kernel_is_identity(seed in 0u64..1000, n in 4usize..24) {
        let poly = draw_convex_polygon(
            RadialCfg { vertices: n, ..RadialCfg::default() },
            ReplayToken::new(seed, 0),
        );
        let k = polygon_kernel(&poly, cfg());
        prop_assert_eq!(k, Kernel::Bounded(poly));
    }

    /// area(kernel(P)) <= area(P), with equality only for convex P.
    #[test]
    fn kernel_area_is_monotone(seed in 0u64..500, spikes in 3usize..9) {
        let poly = draw_star_polygon(spikes, 1.0, 0.45, ReplayToken::new(seed, 1));
        let poly_area = area(&poly);
        if let Some(pts) = polygon_kernel(&poly, cfg()).points() {
            let kernel_area = area(pts);
            prop_assert!(
                kernel_area <= poly_area + 1e-9,
                "kernel area {} exceeds polygon area {}", kernel_area, poly_area
            );
            prop_assert!(kernel_area < poly_area, "star polygons are not convex");
        }
    }

    /// Radial stars are star-shaped around the origin, so their
    /// kernels are never empty.
    #[test]
    fn radial_star_kernel_is_nonempty(seed in 0u64..500, spikes in 3usize..9) {
        let poly = draw_star_polygon(spikes, 1.0, 0.45, ReplayToken::new(seed, 2));
        let k = polygon_kernel(&poly, cfg());
        prop_assert!(!k.is_empty());
    }
}
