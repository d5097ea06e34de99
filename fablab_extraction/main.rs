use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fablab_pipeline::{pipeline, Settings};
use tracing::info;

#[derive(Parser)]
#[command(name = "fablab_extraction", about = "Extract Fab Lab cards from the saved network page into JSON")]
struct Cli {
    /// Saved HTML page (default: FABLAB_HTML_PATH or rede.html)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Records JSON to write (default: FABLAB_RECORDS_PATH or fab_labs_data.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(p) = cli.input {
        settings.html_path = p;
    }
    if let Some(p) = cli.output {
        settings.records_path = p;
    }
    info!(settings = ?settings, msg = "Starting Fab Lab extraction");

    println!("Fab Lab Extraction");
    println!("==================\n");

    let extraction = pipeline::run_extraction(&settings)?;

    for (region, count) in &extraction.regions {
        println!("  {:<16} {:>4}", region, count);
    }
    println!(
        "\nSaved {} labs from {} regions to {:?}",
        extraction.labs.len(),
        extraction.regions.len(),
        settings.records_path
    );
    Ok(())
}
