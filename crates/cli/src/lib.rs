//! Shared command layer for the mesh tools.
//!
//! The binaries stay thin: argument structs plus a call in here. All
//! filesystem work (reading the mesh, deriving sibling output paths,
//! appending CSV rows) lives in this crate; geometry stays in
//! `polykern`.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use polykern::geom::GeomCfg;
use polykern::kernel::kernel_mesh;
use polykern::mesh::{invert_faces, read_off, write_off, Mesh};
use polykern::stats::{mesh_stats, MeshStats};

/// Console logging used by every binary.
pub fn init_tracing() {
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_target(false)
        .init();
}

pub fn load_mesh(path: &Path) -> Result<Mesh> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_off(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

/// `dir/foo.off` with `suffix` -> `dir/foo<suffix>` (e.g.
/// `foo_kernel.off`).
pub fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("mesh"));
    let mut name = stem;
    name.push(suffix);
    path.with_file_name(name)
}

/// The printed statistics block.
pub fn render_text(stats: &MeshStats) -> String {
    format!(
        "Edges per polygon: {}\n\
         Min angle: {}\n\
         Max angle: {}\n\
         Min edge ratio: {}\n\
         Max edge ratio: {}\n\
         Avg edge ratio: {}\n\
         Min kernel area ratio: {}\n\
         Max kernel area ratio: {}\n\
         Avg kernel area ratio: {}\n\
         Min apr: {}\n\
         Max apr: {}\n\
         Avg apr: {}",
        stats.edges_per_face,
        stats.min_angle,
        stats.max_angle,
        stats.min_edge_ratio,
        stats.max_edge_ratio,
        stats.avg_edge_ratio,
        stats.min_kernel_ratio,
        stats.max_kernel_ratio,
        stats.avg_kernel_ratio,
        stats.min_apr,
        stats.max_apr,
        stats.avg_apr,
    )
}

pub fn render_json(basename: &str, stats: &MeshStats) -> serde_json::Value {
    json!({
        "mesh": basename,
        "edges_per_face": stats.edges_per_face,
        "min_angle": stats.min_angle,
        "max_angle": stats.max_angle,
        "min_edge_ratio": stats.min_edge_ratio,
        "max_edge_ratio": stats.max_edge_ratio,
        "avg_edge_ratio": stats.avg_edge_ratio,
        "min_kernel_ratio": stats.min_kernel_ratio,
        "max_kernel_ratio": stats.max_kernel_ratio,
        "avg_kernel_ratio": stats.avg_kernel_ratio,
        "min_apr": stats.min_apr,
        "max_apr": stats.max_apr,
        "avg_apr": stats.avg_apr,
    })
}

/// The appended CSV row: basename plus the eleven statistics, `%.2f`.
pub fn csv_row(basename: &str, stats: &MeshStats) -> String {
    format!(
        "{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
        basename,
        stats.min_angle,
        stats.max_angle,
        stats.min_edge_ratio,
        stats.max_edge_ratio,
        stats.avg_edge_ratio,
        stats.min_kernel_ratio,
        stats.max_kernel_ratio,
        stats.avg_kernel_ratio,
        stats.min_apr,
        stats.max_apr,
        stats.avg_apr,
    )
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Print per-mesh statistics; optionally append a CSV row and/or emit
/// JSON instead of the text block.
pub fn run_analytics(input: &Path, csv: Option<&Path>, as_json: bool) -> Result<()> {
    let mesh = load_mesh(input)?;
    let stats = mesh_stats(&mesh, GeomCfg::default());
    tracing::info!(faces = mesh.faces.len(), vertices = mesh.vertices.len(), "loaded mesh");

    if as_json {
        println!("{}", serde_json::to_string_pretty(&render_json(&basename(input), &stats))?);
    } else {
        println!("{}", render_text(&stats));
    }

    if let Some(csv_path) = csv {
        append_csv_row(csv_path, &basename(input), &stats)?;
        tracing::info!(csv = %csv_path.display(), "appended statistics row");
    }
    Ok(())
}

pub fn append_csv_row(csv_path: &Path, name: &str, stats: &MeshStats) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)
        .with_context(|| format!("opening {}", csv_path.display()))?;
    writeln!(file, "{}", csv_row(name, stats))?;
    Ok(())
}

/// Compute the kernel mesh and write it next to the input as
/// `<stem>_kernel.off`. Returns the output path.
pub fn run_generate_kernel(input: &Path) -> Result<PathBuf> {
    let mesh = load_mesh(input)?;
    let kernels = kernel_mesh(&mesh, GeomCfg::default());
    let dropped = mesh.faces.len() - kernels.faces.len();
    if dropped > 0 {
        tracing::info!(dropped, "faces with empty kernels omitted");
    }
    let out = sibling_with_suffix(input, "_kernel.off");
    write_mesh(&kernels, &out)?;
    Ok(out)
}

/// Reverse each face's vertex order and write `<stem>_inverted.off`.
/// Returns the output path.
pub fn run_invert_faces(input: &Path) -> Result<PathBuf> {
    let mesh = load_mesh(input)?;
    let flipped = invert_faces(&mesh);
    let out = sibling_with_suffix(input, "_inverted.off");
    write_mesh(&flipped, &out)?;
    Ok(out)
}

fn write_mesh(mesh: &Mesh, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_off(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}
