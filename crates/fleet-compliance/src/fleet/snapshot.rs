use super::domain::{Company, Driver, Vehicle};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read fleet snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fleet snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Vehicles, drivers, and companies as fetched from the fleet REST API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub companies: Vec<Company>,
}

impl FleetSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty() && self.drivers.is_empty() && self.companies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn missing_collections_default_to_empty() {
        let snapshot = FleetSnapshot::from_reader(Cursor::new(r#"{"vehicles": []}"#))
            .expect("snapshot decodes");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn malformed_dates_surface_as_json_errors() {
        let raw = r#"{"companies": [{"id": 1, "identity_card": "5140", "carrier_license_expiry": "31/12/24"}]}"#;
        match FleetSnapshot::from_reader(Cursor::new(raw)) {
            Err(SnapshotError::Json(err)) => assert!(err.to_string().contains("31/12/24")),
            other => panic!("expected json error, got {other:?}"),
        }
    }
}
