pub mod error;
pub mod extract;
pub mod geocode;
pub mod pipeline;
pub mod record;
pub mod settings;
pub mod store;

pub use error::{LookupError, StructuralParseError};
pub use record::{Coordinates, GeocodedRecord, LabRecord};
pub use settings::Settings;
