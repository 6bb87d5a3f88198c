mod dates;
pub mod domain;
pub mod search;
mod snapshot;

pub use dates::{deserialize_document_date, parse_document_date, DateParseError};
pub use domain::{Company, DocumentHolder, Driver, EntityKind, EntityRef, Vehicle};
pub use snapshot::{FleetSnapshot, SnapshotError};
