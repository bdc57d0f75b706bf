use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Compute the kernel of every face of an OFF mesh and write the
/// result as `<input>_kernel.off`.
#[derive(Parser)]
#[command(name = "generate_kernel")]
struct Cmd {
    /// Input mesh (OFF, 2D variant).
    input: PathBuf,
}

fn main() -> Result<()> {
    cli::init_tracing();
    let cmd = Cmd::parse();
    let out = cli::run_generate_kernel(&cmd.input)?;
    println!("Written kernel mesh to {}", out.display());
    Ok(())
}
