use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Print per-mesh shape statistics for an OFF mesh; optionally append
/// a CSV row of the numbers.
#[derive(Parser)]
#[command(name = "analytics")]
struct Cmd {
    /// Input mesh (OFF, 2D variant).
    input: PathBuf,

    /// CSV file to append a `basename,min_angle,..,avg_apr` row to.
    csv: Option<PathBuf>,

    /// Emit the statistics as JSON instead of the text block.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    cli::init_tracing();
    let cmd = Cmd::parse();
    cli::run_analytics(&cmd.input, cmd.csv.as_deref(), cmd.json)
}
