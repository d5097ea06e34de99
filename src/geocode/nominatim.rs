use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;

use super::Geocoder;
use crate::error::LookupError;
use crate::record::Coordinates;

/// One place from a Nominatim `/search?format=json` response.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Blocking client for the OpenStreetMap Nominatim search API.
pub struct NominatimClient {
    client: Client,
    endpoint: String,
}

impl NominatimClient {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("User agent is not a valid header value")?,
        );
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(NominatimClient {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl Geocoder for NominatimClient {
    fn lookup(&mut self, query: &str) -> Result<Option<Coordinates>, LookupError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let places: Vec<Place> = resp.json()?;
        best_match(&places)
    }
}

fn best_match(places: &[Place]) -> Result<Option<Coordinates>, LookupError> {
    let Some(place) = places.first() else {
        return Ok(None);
    };
    if let Some(name) = &place.display_name {
        tracing::debug!(matched = %name, "nominatim match");
    }
    Ok(Some(Coordinates {
        latitude: parse_degrees(&place.lat)?,
        longitude: parse_degrees(&place.lon)?,
    }))
}

fn parse_degrees(raw: &str) -> Result<f64, LookupError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LookupError::Coordinate(raw.to_string()))
}
