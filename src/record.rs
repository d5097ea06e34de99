use serde::{Deserialize, Serialize};

/// One Fab Lab entry as read from the network page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabRecord {
    pub name: String,
    pub location: String,
    pub description: String,
    pub link: String,
    pub region: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A lab record after the geocoding pass.
///
/// Serializes flat: the lab fields followed by `latitude` and `longitude`,
/// both `null` when the lookup missed or failed. A document with only one of
/// the two set is rejected on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeocodedRow", try_from = "GeocodedRow")]
pub struct GeocodedRecord {
    pub lab: LabRecord,
    pub coordinates: Option<Coordinates>,
}

impl GeocodedRecord {
    pub fn new(lab: LabRecord, coordinates: Option<Coordinates>) -> Self {
        GeocodedRecord { lab, coordinates }
    }
}

#[derive(Serialize, Deserialize)]
struct GeocodedRow {
    #[serde(flatten)]
    lab: LabRecord,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

impl From<GeocodedRecord> for GeocodedRow {
    fn from(rec: GeocodedRecord) -> Self {
        GeocodedRow {
            lab: rec.lab,
            latitude: rec.coordinates.map(|c| c.latitude),
            longitude: rec.coordinates.map(|c| c.longitude),
        }
    }
}

impl TryFrom<GeocodedRow> for GeocodedRecord {
    type Error = String;

    fn try_from(row: GeocodedRow) -> Result<Self, Self::Error> {
        let coordinates = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            (None, None) => None,
            _ => {
                return Err(format!(
                    "lab '{}' has only one of latitude/longitude set",
                    row.lab.name
                ))
            }
        };
        Ok(GeocodedRecord {
            lab: row.lab,
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab_a() -> LabRecord {
        LabRecord {
            name: "Lab A".into(),
            location: "São Paulo, SP".into(),
            description: "desc".into(),
            link: "http://x".into(),
            region: "Sul".into(),
        }
    }

    #[test]
    fn lab_record_field_order() {
        let json = serde_json::to_string(&lab_a()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Lab A","location":"São Paulo, SP","description":"desc","link":"http://x","region":"Sul"}"#
        );
    }

    #[test]
    fn miss_serializes_both_nulls() {
        let json = serde_json::to_string(&GeocodedRecord::new(lab_a(), None)).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Lab A","location":"São Paulo, SP","description":"desc","link":"http://x","region":"Sul","latitude":null,"longitude":null}"#
        );
    }

    #[test]
    fn found_serializes_coordinates() {
        let rec = GeocodedRecord::new(
            lab_a(),
            Some(Coordinates {
                latitude: -23.5,
                longitude: -46.25,
            }),
        );
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["latitude"], -23.5);
        assert_eq!(value["longitude"], -46.25);
        assert_eq!(value["region"], "Sul");
    }

    #[test]
    fn mixed_coordinates_rejected() {
        let json = r#"{"name":"Lab A","location":"x","description":"d","link":"l","region":"r","latitude":1.0,"longitude":null}"#;
        let err = serde_json::from_str::<GeocodedRecord>(json).unwrap_err();
        assert!(err.to_string().contains("only one of latitude/longitude"));
    }

    #[test]
    fn missing_coordinate_keys_load_as_none() {
        let json = r#"{"name":"Lab A","location":"x","description":"d","link":"l","region":"r"}"#;
        let rec: GeocodedRecord = serde_json::from_str(json).unwrap();
        assert!(rec.coordinates.is_none());
    }
}
