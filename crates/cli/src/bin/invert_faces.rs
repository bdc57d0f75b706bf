use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Reverse the vertex order of every face of an OFF mesh and write the
/// result as `<input>_inverted.off`.
#[derive(Parser)]
#[command(name = "invert_faces")]
struct Cmd {
    /// Input mesh (OFF, 2D variant).
    input: PathBuf,
}

fn main() -> Result<()> {
    cli::init_tracing();
    let cmd = Cmd::parse();
    let out = cli::run_invert_faces(&cmd.input)?;
    println!("Written inverted mesh to {}", out.display());
    Ok(())
}
