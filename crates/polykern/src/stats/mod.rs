//! Per-mesh shape statistics.
//!
//! Straightforward per-face accumulations: corner angles, edge length
//! ratios, kernel-to-face area ratios, and the area–perimeter ratio
//! `2πA / P²` (1 for a disc, smaller for everything else).

use nalgebra::Vector2;

use crate::geom::{turn_angle, GeomCfg};
use crate::kernel::polygon_kernel;
use crate::mesh::Mesh;

type Vec2 = Vector2<f64>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshStats {
    pub edges_per_face: f64,
    pub min_angle: f64,
    pub max_angle: f64,
    pub min_edge_ratio: f64,
    pub max_edge_ratio: f64,
    pub avg_edge_ratio: f64,
    pub min_kernel_ratio: f64,
    pub max_kernel_ratio: f64,
    pub avg_kernel_ratio: f64,
    pub min_apr: f64,
    pub max_apr: f64,
    pub avg_apr: f64,
}

/// Boundary length of the ring.
pub fn perimeter(points: &[Vec2]) -> f64 {
    let n = points.len();
    (0..n).map(|i| (points[(i + 1) % n] - points[i]).norm()).sum()
}

/// Absolute area of the ring (shoelace anchored at the first vertex).
pub fn area(points: &[Vec2]) -> f64 {
    let n = points.len();
    if n == 0 {
        return 0.0;
    }
    let p = points[0];
    let mut total = 0.0;
    for i in 1..n {
        let v0 = points[i];
        let v1 = points[(i + 1) % n];
        total += (v0.x - p.x) * (v1.y - p.y) - (v0.y - p.y) * (v1.x - p.x);
    }
    (total / 2.0).abs()
}

/// Area–perimeter ratio `2πA / P²`; 0 for degenerate rings.
pub fn apr(points: &[Vec2]) -> f64 {
    let p = perimeter(points);
    if p == 0.0 {
        return 0.0;
    }
    2.0 * std::f64::consts::PI * area(points) / (p * p)
}

/// Smallest and largest corner angle of the ring, in degrees.
pub fn corner_angle_range(points: &[Vec2]) -> (f64, f64) {
    let n = points.len();
    let mut min = 360.0f64;
    let mut max = 0.0f64;
    for i in 0..n {
        let angle = turn_angle(points[i], points[(i + 1) % n], points[(i + 2) % n]);
        min = min.min(angle);
        max = max.max(angle);
    }
    (min, max)
}

/// Shortest and longest edge of the ring.
pub fn edge_length_range(points: &[Vec2]) -> (f64, f64) {
    let n = points.len();
    let mut min = f64::INFINITY;
    let mut max = 0.0f64;
    for i in 0..n {
        let len = (points[(i + 1) % n] - points[i]).norm();
        min = min.min(len);
        max = max.max(len);
    }
    (min, max)
}

/// `area(kernel) / area(face)`; 0 when the kernel is empty or the
/// face has no area.
pub fn kernel_area_ratio(points: &[Vec2], cfg: GeomCfg) -> f64 {
    let face_area = area(points);
    if face_area == 0.0 {
        return 0.0;
    }
    match polygon_kernel(points, cfg).points() {
        Some(kernel) => area(kernel) / face_area,
        None => 0.0,
    }
}

/// Fold the per-face statistics over a mesh. A mesh without faces
/// yields all zeros.
pub fn mesh_stats(mesh: &Mesh, cfg: GeomCfg) -> MeshStats {
    if mesh.faces.is_empty() {
        return MeshStats::default();
    }
    let n_faces = mesh.faces.len() as f64;
    let mut stats = MeshStats {
        min_angle: 360.0,
        max_angle: 0.0,
        min_edge_ratio: f64::INFINITY,
        max_edge_ratio: 0.0,
        min_kernel_ratio: f64::INFINITY,
        max_kernel_ratio: 0.0,
        min_apr: f64::INFINITY,
        max_apr: 0.0,
        ..MeshStats::default()
    };
    let mut edges = 0usize;
    for face in &mesh.faces {
        let points: Vec<Vec2> = face.verts.iter().map(|&i| mesh.vertices[i]).collect();
        edges += points.len();

        let (lo, hi) = corner_angle_range(&points);
        stats.min_angle = stats.min_angle.min(lo);
        stats.max_angle = stats.max_angle.max(hi);

        let (shortest, longest) = edge_length_range(&points);
        let edge_ratio = shortest / longest;
        stats.min_edge_ratio = stats.min_edge_ratio.min(edge_ratio);
        stats.max_edge_ratio = stats.max_edge_ratio.max(edge_ratio);
        stats.avg_edge_ratio += edge_ratio;

        let kernel_ratio = kernel_area_ratio(&points, cfg);
        stats.min_kernel_ratio = stats.min_kernel_ratio.min(kernel_ratio);
        stats.max_kernel_ratio = stats.max_kernel_ratio.max(kernel_ratio);
        stats.avg_kernel_ratio += kernel_ratio;

        let face_apr = apr(&points);
        stats.min_apr = stats.min_apr.min(face_apr);
        stats.max_apr = stats.max_apr.max(face_apr);
        stats.avg_apr += face_apr;
    }
    stats.edges_per_face = edges as f64 / n_faces;
    stats.avg_edge_ratio /= n_faces;
    stats.avg_kernel_ratio /= n_faces;
    stats.avg_apr /= n_faces;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::read_off;
    use nalgebra::Vector2;

    fn v(x: f64, y: f64) -> Vec2 {
        Vector2::new(x, y)
    }

    #[test]
    fn perimeter_fixtures() {
        let square = [v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)];
        assert_eq!(perimeter(&square), 4.0);
        let poly = [v(0.0, 0.0), v(2.0, 1.0), v(2.0, 2.0), v(0.0, 3.0), v(-1.0, -1.0)];
        assert!((perimeter(&poly) - 11.009455143).abs() < 1e-6 * 11.0);
    }

    #[test]
    fn area_fixtures() {
        assert_eq!(area(&[v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)]), 1.0);
        assert_eq!(area(&[v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0), v(0.0, 2.0)]), 4.0);
        let l_shape = [
            v(0.0, 0.0),
            v(1.0, 0.0),
            v(1.0, 1.0),
            v(2.0, 1.0),
            v(2.0, 2.0),
            v(0.0, 2.0),
        ];
        assert_eq!(area(&l_shape), 3.0);
        let shifted: Vec<Vec2> = l_shape.iter().map(|p| p + v(1.0, 1.0)).collect();
        assert_eq!(area(&shifted), 3.0);
        assert_eq!(area(&[v(1.0, 1.0), v(3.0, 1.0), v(2.0, 3.0)]), 2.0);
        assert_eq!(area(&[]), 0.0);
    }

    #[test]
    fn square_corner_angles() {
        let square = [v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)];
        assert_eq!(corner_angle_range(&square), (90.0, 90.0));
    }

    #[test]
    fn kernel_ratio_fixtures() {
        let cfg = GeomCfg::default();
        let l_shape = [
            v(0.0, 0.0),
            v(1.0, 0.0),
            v(1.0, 1.0),
            v(2.0, 1.0),
            v(2.0, 2.0),
            v(0.0, 2.0),
        ];
        assert!((kernel_area_ratio(&l_shape, cfg) - 1.0 / 3.0).abs() < 1e-9);
        let square = [v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0), v(0.0, 2.0)];
        assert_eq!(kernel_area_ratio(&square, cfg), 1.0);
    }

    #[test]
    fn two_triangle_mesh_stats() {
        let text = "OFF\n4 2 0\n0 0\n1 0\n1 1\n0 1\n3 0 1 3\n3 1 2 3\n";
        let mesh = read_off(text.as_bytes()).unwrap();
        let stats = mesh_stats(&mesh, GeomCfg::default());
        assert_eq!((stats.min_angle, stats.max_angle), (45.0, 90.0));
        assert_eq!(stats.edges_per_face, 3.0);
        // Triangles are convex: kernels equal the faces.
        assert_eq!(stats.min_kernel_ratio, 1.0);
        assert_eq!(stats.max_kernel_ratio, 1.0);
        assert_eq!(stats.avg_kernel_ratio, 1.0);
    }

    #[test]
    fn empty_mesh_yields_zeros() {
        let mesh = crate::mesh::Mesh::default();
        assert_eq!(mesh_stats(&mesh, GeomCfg::default()), MeshStats::default());
    }

    #[test]
    fn apr_of_square_is_pi_over_eight() {
        let square = [v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0), v(0.0, 2.0)];
        // 2π·4 / 8² = π/8
        assert!((apr(&square) - std::f64::consts::PI / 8.0).abs() < 1e-12);
        let degenerate = [v(0.0, 0.0); 3];
        assert_eq!(apr(&degenerate), 0.0);
    }
}
