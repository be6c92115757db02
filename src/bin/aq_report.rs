use air_quality::{AirQualityReport, DEFAULT_INPUT_PATH};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// Prints every section of the air-quality report for one station file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Station CSV to load.
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let report = AirQualityReport::from_csv(&cli.path)
        .with_context(|| format!("failed to build report from {}", cli.path.display()))?;

    for (title, frame) in report.frames()? {
        println!("{title}");
        println!("{frame}\n");
    }
    Ok(())
}
