use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod cli;
mod telemetry;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let config = cli.config()?;
    let report = collator_core::collate_directory(&cli.dir, &config)
        .with_context(|| format!("collating witnesses in {}", cli.dir.display()))?;

    let written = collator_core::write_reports(&report, &config.output_modes, &cli.output_dir)
        .context("writing reports")?;

    info!(entries = report.entries.len(), files = written.len(), "done");
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
