use crate::fleet::EntityKind;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FieldMapError {
    #[error("{kind} records have no date field named '{field}'")]
    UnknownField { kind: EntityKind, field: String },
    #[error("{kind} field '{field}' needs a non-empty label")]
    MissingLabel { kind: EntityKind, field: String },
    #[error("failed to read document field table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid document field table: {0}")]
    Json(#[from] serde_json::Error),
}

/// A monitored document: the record field holding its expiry date and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentField {
    pub field: String,
    pub label: String,
}

impl DocumentField {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

/// Which date fields are monitored per entity kind, in alert traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFieldMap {
    #[serde(default)]
    vehicle: Vec<DocumentField>,
    #[serde(default)]
    driver: Vec<DocumentField>,
    #[serde(default)]
    company: Vec<DocumentField>,
}

impl DocumentFieldMap {
    /// The documents tracked on the fleet dashboard.
    pub fn standard() -> Self {
        Self {
            vehicle: table(&[
                ("license_expiry_date", "Vehicle License"),
                ("next_safety_inspection", "Safety Inspection"),
                ("hova_insurance_expiry_date", "Hova Insurance"),
                ("mekif_insurance_expiry_date", "Mekif Insurance"),
                ("carrier_license_expiry_date", "Carrier License"),
                ("hazardous_license_expiry_date", "Hazardous License"),
                ("tachograph_expiry_date", "Tachograph"),
                ("winter_inspection_expiry_date", "Winter Inspection"),
                ("brake_inspection_expiry_date", "Brake Inspection"),
                ("special_equipment_expiry_date", "Special Equipment"),
            ]),
            driver: table(&[
                ("license_expiry_date", "Driver License"),
                ("traffic_info_expiry_date", "Traffic Info"),
            ]),
            company: table(&[("carrier_license_expiry", "Company Carrier License")]),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a monitored field, rejecting names the entity kind does not expose.
    pub fn with_field(
        mut self,
        kind: EntityKind,
        field: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, FieldMapError> {
        let entry = DocumentField::new(field, label);
        validate_entry(kind, &entry)?;
        self.fields_mut(kind).push(entry);
        Ok(self)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FieldMapError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FieldMapError> {
        let map: Self = serde_json::from_reader(reader)?;
        map.validate()?;
        Ok(map)
    }

    pub fn validate(&self) -> Result<(), FieldMapError> {
        for kind in EntityKind::ordered() {
            for entry in self.fields(kind) {
                validate_entry(kind, entry)?;
            }
        }
        Ok(())
    }

    pub fn fields(&self, kind: EntityKind) -> &[DocumentField] {
        match kind {
            EntityKind::Vehicle => &self.vehicle,
            EntityKind::Driver => &self.driver,
            EntityKind::Company => &self.company,
        }
    }

    fn fields_mut(&mut self, kind: EntityKind) -> &mut Vec<DocumentField> {
        match kind {
            EntityKind::Vehicle => &mut self.vehicle,
            EntityKind::Driver => &mut self.driver,
            EntityKind::Company => &mut self.company,
        }
    }

    pub fn len(&self) -> usize {
        self.vehicle.len() + self.driver.len() + self.company.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn table(rows: &[(&str, &str)]) -> Vec<DocumentField> {
    rows.iter()
        .map(|(field, label)| DocumentField::new(*field, *label))
        .collect()
}

fn validate_entry(kind: EntityKind, entry: &DocumentField) -> Result<(), FieldMapError> {
    if !kind.exposes(&entry.field) {
        return Err(FieldMapError::UnknownField {
            kind,
            field: entry.field.clone(),
        });
    }
    if entry.label.trim().is_empty() {
        return Err(FieldMapError::MissingLabel {
            kind,
            field: entry.field.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_table_is_self_consistent() {
        let map = DocumentFieldMap::standard();
        map.validate().expect("standard table validates");
        assert_eq!(map.fields(EntityKind::Vehicle).len(), 10);
        assert_eq!(map.fields(EntityKind::Driver).len(), 2);
        assert_eq!(map.fields(EntityKind::Company).len(), 1);
        assert_eq!(map.fields(EntityKind::Vehicle)[1].label, "Safety Inspection");
    }

    #[test]
    fn custom_table_loads_from_json() {
        let raw = r#"{"driver": [{"field": "license_expiry_date", "label": "Licence"}]}"#;
        let map = DocumentFieldMap::from_reader(Cursor::new(raw)).expect("table loads");
        assert_eq!(map.len(), 1);
        assert!(map.fields(EntityKind::Vehicle).is_empty());
        assert_eq!(map.fields(EntityKind::Driver)[0].label, "Licence");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = r#"{"company": [{"field": "license_expiry_date", "label": "Licence"}]}"#;
        match DocumentFieldMap::from_reader(Cursor::new(raw)) {
            Err(FieldMapError::UnknownField { kind, field }) => {
                assert_eq!(kind, EntityKind::Company);
                assert_eq!(field, "license_expiry_date");
            }
            other => panic!("expected unknown field error, got {other:?}"),
        }
    }

    #[test]
    fn builder_requires_labels() {
        let err = DocumentFieldMap::empty()
            .with_field(EntityKind::Vehicle, "tachograph_expiry_date", " ")
            .expect_err("blank label rejected");
        assert!(matches!(err, FieldMapError::MissingLabel { .. }));
    }
}
