pub mod nominatim;
pub mod throttle;

use indicatif::ProgressBar;
use tracing::{error, info, warn};

use crate::error::LookupError;
use crate::record::{Coordinates, GeocodedRecord, LabRecord};
pub use nominatim::NominatimClient;
pub use throttle::Throttled;

/// Resolves free text to a single best-match coordinate.
///
/// `Ok(None)` means the service found nothing; `Err` means the request
/// itself failed.
pub trait Geocoder {
    fn lookup(&mut self, query: &str) -> Result<Option<Coordinates>, LookupError>;
}

/// Outcome counts for one geocoding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GeocodeStats {
    pub total: usize,
    pub found: usize,
    pub missed: usize,
    pub failed: usize,
}

impl GeocodeStats {
    pub fn print(&self) {
        println!(
            "Geocoded {} labs ({} found, {} not found, {} errors).",
            self.total, self.found, self.missed, self.failed
        );
    }
}

/// Query sent to the geocoder for one lab, e.g. "Recife, PE, Brasil".
pub fn location_query(lab: &LabRecord, country: &str) -> String {
    format!("{}, {}", lab.location, country)
}

/// Look up every lab in order. Misses and failures leave the record without
/// coordinates and never stop the run; output order and length match input.
pub fn geocode_all<G: Geocoder>(
    labs: Vec<LabRecord>,
    geocoder: &mut G,
    country: &str,
    pb: &ProgressBar,
) -> (Vec<GeocodedRecord>, GeocodeStats) {
    let mut stats = GeocodeStats {
        total: labs.len(),
        ..Default::default()
    };
    let mut out = Vec::with_capacity(labs.len());

    for lab in labs {
        let query = location_query(&lab, country);
        let coordinates = match geocoder.lookup(&query) {
            Ok(Some(c)) => {
                stats.found += 1;
                info!("Coordinates for {}: {}, {}", lab.name, c.latitude, c.longitude);
                Some(c)
            }
            Ok(None) => {
                stats.missed += 1;
                warn!("No coordinates found for {}: {}", lab.name, query);
                None
            }
            Err(e) => {
                stats.failed += 1;
                error!("Geocoding failed for {}: {}", lab.name, e);
                None
            }
        };
        out.push(GeocodedRecord::new(lab, coordinates));
        pb.inc(1);
    }

    (out, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Canned answers keyed by query; unknown queries are misses.
    struct Stub {
        answers: HashMap<String, Result<Coordinates, u16>>,
        seen: Vec<String>,
    }

    impl Stub {
        fn new(answers: &[(&str, Result<(f64, f64), u16>)]) -> Self {
            let answers = answers
                .iter()
                .map(|(q, a)| {
                    let a = (*a).map(|(latitude, longitude)| Coordinates { latitude, longitude });
                    (q.to_string(), a)
                })
                .collect();
            Stub {
                answers,
                seen: Vec::new(),
            }
        }
    }

    impl Geocoder for Stub {
        fn lookup(&mut self, query: &str) -> Result<Option<Coordinates>, LookupError> {
            self.seen.push(query.to_string());
            match self.answers.get(query) {
                Some(Ok(c)) => Ok(Some(*c)),
                Some(Err(code)) => Err(LookupError::Status(*code)),
                None => Ok(None),
            }
        }
    }

    fn lab(name: &str, location: &str) -> LabRecord {
        LabRecord {
            name: name.into(),
            location: location.into(),
            description: format!("{} desc", name),
            link: format!("http://{}", name.to_lowercase()),
            region: "Sul".into(),
        }
    }

    fn labs() -> Vec<LabRecord> {
        vec![
            lab("Pronto3D", "Florianópolis, SC"),
            lab("POA", "Porto Alegre, RS"),
            lab("Curitiba", "Curitiba, PR"),
        ]
    }

    #[test]
    fn query_appends_country() {
        assert_eq!(location_query(&lab("A", "Recife, PE"), "Brasil"), "Recife, PE, Brasil");
    }

    #[test]
    fn all_found_in_order() {
        let mut stub = Stub::new(&[
            ("Florianópolis, SC, Brasil", Ok((-27.59, -48.54))),
            ("Porto Alegre, RS, Brasil", Ok((-30.03, -51.23))),
            ("Curitiba, PR, Brasil", Ok((-25.43, -49.27))),
        ]);
        let (out, stats) = geocode_all(labs(), &mut stub, "Brasil", &ProgressBar::hidden());
        let names: Vec<&str> = out.iter().map(|r| r.lab.name.as_str()).collect();
        assert_eq!(names, ["Pronto3D", "POA", "Curitiba"]);
        assert_eq!(out[1].coordinates.unwrap().latitude, -30.03);
        assert_eq!(stats, GeocodeStats { total: 3, found: 3, missed: 0, failed: 0 });
        assert_eq!(stub.seen.len(), 3);
    }

    #[test]
    fn failure_is_isolated() {
        let answers: [(&str, Result<(f64, f64), u16>); 3] = [
            ("Florianópolis, SC, Brasil", Ok((-27.59, -48.54))),
            ("Porto Alegre, RS, Brasil", Err(503)),
            ("Curitiba, PR, Brasil", Ok((-25.43, -49.27))),
        ];
        let (out, stats) = geocode_all(labs(), &mut Stub::new(&answers), "Brasil", &ProgressBar::hidden());
        assert_eq!(out.len(), 3);
        assert!(out[1].coordinates.is_none());
        assert_eq!(stats.failed, 1);

        let mut without = labs();
        without.remove(1);
        let (reference, _) = geocode_all(without, &mut Stub::new(&answers), "Brasil", &ProgressBar::hidden());
        assert_eq!(out[0], reference[0]);
        assert_eq!(out[2], reference[1]);
    }

    #[test]
    fn miss_yields_nulls_and_continues() {
        let rec = LabRecord {
            name: "Lab A".into(),
            location: "São Paulo, SP".into(),
            description: "desc".into(),
            link: "http://x".into(),
            region: "Sul".into(),
        };
        let (out, stats) = geocode_all(vec![rec], &mut Stub::new(&[]), "Brasil", &ProgressBar::hidden());
        assert_eq!(stats, GeocodeStats { total: 1, found: 0, missed: 1, failed: 0 });
        let value = serde_json::to_value(&out).unwrap();
        assert!(value[0]["latitude"].is_null());
        assert!(value[0]["longitude"].is_null());
        assert_eq!(value[0]["location"], "São Paulo, SP");
    }

    #[test]
    fn coordinates_never_mixed() {
        let answers: [(&str, Result<(f64, f64), u16>); 2] = [("Curitiba, PR, Brasil", Ok((-25.43, -49.27))), ("Porto Alegre, RS, Brasil", Err(500))];
        let (out, _) = geocode_all(labs(), &mut Stub::new(&answers), "Brasil", &ProgressBar::hidden());
        let value = serde_json::to_value(&out).unwrap();
        for row in value.as_array().unwrap() {
            assert_eq!(row["latitude"].is_null(), row["longitude"].is_null());
        }
    }

    #[test]
    fn empty_input() {
        let (out, stats) = geocode_all(Vec::new(), &mut Stub::new(&[]), "Brasil", &ProgressBar::hidden());
        assert!(out.is_empty());
        assert_eq!(stats.total, 0);
    }
}
