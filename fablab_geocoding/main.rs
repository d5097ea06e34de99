use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fablab_pipeline::geocode::{self, NominatimClient, Throttled};
use fablab_pipeline::{store, LabRecord, Settings};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

#[derive(Parser)]
#[command(name = "fablab_geocoding", about = "Attach coordinates to extracted Fab Lab records")]
struct Cli {
    /// Records JSON from the extraction step (default: FABLAB_RECORDS_PATH or fab_labs_data.json)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Enriched JSON to write (default: FABLAB_OUTPUT_PATH or fab_labs_data_with_coords.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Country appended to every location query
    #[arg(long)]
    country: Option<String>,
    /// Minimum milliseconds between geocoding requests
    #[arg(long)]
    min_delay_ms: Option<u64>,
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
        settings.records_path = p;
    }
    if let Some(p) = cli.output {
        settings.output_path = p;
    }
    if let Some(c) = cli.country {
        settings.country = c;
    }
    if let Some(ms) = cli.min_delay_ms {
        settings.min_delay_ms = ms;
    }
    info!(settings = ?settings, msg = "Starting Fab Lab geocoding");

    println!("Fab Lab Geocoding");
    println!("=================\n");

    let labs: Vec<LabRecord> = store::read_json(&settings.records_path)?;
    println!("Loaded {} labs from {:?}\n", labs.len(), settings.records_path);

    let client = NominatimClient::new(&settings.endpoint, &settings.user_agent, settings.timeout())?;
    let mut geocoder = Throttled::new(client, settings.min_delay());

    let pb = ProgressBar::new(labs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")?
            .progress_chars("=> "),
    );
    let (records, stats) = geocode::geocode_all(labs, &mut geocoder, &settings.country, &pb);
    pb.finish_and_clear();

    store::write_json(&settings.output_path, &records)?;
    info!(records = records.len(), path = ?settings.output_path, "geocoded records written");

    stats.print();
    println!("Saved to {:?}", settings.output_path);
    Ok(())
}
