use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use crate::extract::{self, Extraction, LocationAliases};
use crate::settings::Settings;
use crate::store;

/// Read the saved page, extract every lab and write the records file.
///
/// The records file is only written once the whole page has parsed; a
/// malformed card leaves `records_path` untouched.
pub fn run_extraction(settings: &Settings) -> Result<Extraction> {
    let html = fs::read_to_string(&settings.html_path)
        .with_context(|| format!("Failed to read {:?}", settings.html_path))?;
    let extraction = extract::extract_labs(&html, &LocationAliases::default())
        .with_context(|| format!("Malformed network page {:?}", settings.html_path))?;

    store::write_json(&settings.records_path, &extraction.labs)?;
    info!(records = extraction.labs.len(), path = ?settings.records_path, "records written");
    Ok(extraction)
}
