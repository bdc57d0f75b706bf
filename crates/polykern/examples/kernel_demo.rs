//! Print the kernel of a sampled polygon for quick visual sanity.
//!
//! Usage:
//!   cargo run -p polykern --example kernel_demo -- star
//!   cargo run -p polykern --example kernel_demo -- convex

use polykern::geom::rand::{draw_convex_polygon, draw_star_polygon, RadialCfg, ReplayToken};
use polykern::geom::GeomCfg;
use polykern::kernel::{polygon_kernel, Kernel};
use polykern::stats::area;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "star".to_string());
    let poly = match mode.as_str() {
        "convex" => draw_convex_polygon(RadialCfg::default(), ReplayToken::new(2024, 0)),
        "star" => draw_star_polygon(5, 1.0, 0.45, ReplayToken::new(2024, 0)),
        _ => {
            eprintln!("usage: kernel_demo [convex|star]");
            return;
        }
    };

    println!("polygon ({} vertices, area {:.4}):", poly.len(), area(&poly));
    for p in &poly {
        println!("  {:.4} {:.4}", p.x, p.y);
    }
    match polygon_kernel(&poly, GeomCfg::default()) {
        Kernel::Empty => println!("kernel: empty"),
        Kernel::Unbounded(k) => println!("kernel: unbounded chain with {} vertices", k.len()),
        Kernel::Bounded(k) => {
            println!("kernel ({} vertices, area {:.4}):", k.len(), area(&k));
            for p in &k {
                println!("  {:.4} {:.4}", p.x, p.y);
            }
        }
    }
}
