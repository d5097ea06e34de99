use thiserror::Error;

/// A required element is missing from the source document.
#[derive(Debug, Error, PartialEq)]
pub enum StructuralParseError {
    #[error("region section #{section}: missing region heading <h3>")]
    MissingRegionHeading { section: usize },

    #[error("region '{region}', card #{card}: missing {element}")]
    MissingCardElement {
        region: String,
        card: usize,
        element: &'static str,
    },

    #[error("region '{region}', card #{card}: lab name is empty")]
    EmptyName { region: String, card: usize },
}

/// A geocoding request failed. A lookup that simply finds nothing is not an error.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {0}")]
    Status(u16),

    #[error("malformed coordinate {0:?}")]
    Coordinate(String),
}
