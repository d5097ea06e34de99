use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const ENV_PREFIX: &str = "FABLAB";

/// Paths and geocoder knobs shared by both pipeline stages.
///
/// Defaults reproduce the fixed-path batch run; any field can be overridden
/// with a `FABLAB_<FIELD>` environment variable (e.g. `FABLAB_MIN_DELAY_MS`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub html_path: PathBuf,
    pub records_path: PathBuf,
    pub output_path: PathBuf,
    pub country: String,
    pub min_delay_ms: u64,
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("html_path", "rede.html")?
            .set_default("records_path", "fab_labs_data.json")?
            .set_default("output_path", "fab_labs_data_with_coords.json")?
            .set_default("country", "Brasil")?
            .set_default("min_delay_ms", 1000_i64)?
            .set_default("endpoint", "https://nominatim.openstreetmap.org/search")?
            .set_default("user_agent", "fablab_map_generator")?
            .set_default("timeout_secs", 10_i64)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
            .context("Invalid FABLAB_* settings")
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
