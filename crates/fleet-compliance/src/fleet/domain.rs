use super::dates::deserialize_document_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Vehicle,
    Driver,
    Company,
}

impl EntityKind {
    /// Traversal order used when alerts are collected.
    pub const fn ordered() -> [Self; 3] {
        [Self::Vehicle, Self::Driver, Self::Company]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "Vehicle",
            Self::Driver => "Driver",
            Self::Company => "Company",
        }
    }

    /// Every date-valued field a record of this kind exposes.
    pub fn date_fields(self) -> &'static [&'static str] {
        match self {
            Self::Vehicle => Vehicle::DATE_FIELDS,
            Self::Driver => Driver::DATE_FIELDS,
            Self::Company => Company::DATE_FIELDS,
        }
    }

    pub fn exposes(self, field: &str) -> bool {
        self.date_fields().contains(&field)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vehicle => "vehicle",
            Self::Driver => "driver",
            Self::Company => "company",
        };
        f.write_str(name)
    }
}

/// Weak reference to the record an alert was raised against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
    pub name: String,
    /// Secondary label shown next to the owner (the assigned driver or vehicle).
    pub related: Option<String>,
}

/// A record carrying date-valued regulatory documents.
pub trait DocumentHolder {
    const KIND: EntityKind;

    fn entity_ref(&self) -> EntityRef;

    /// Date stored under `field`, or `None` when absent or not a date field of this kind.
    fn document_date(&self, field: &str) -> Option<NaiveDate>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub license_plate: String,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub assigned_driver_id: Option<i64>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub car_type: Option<String>,
    #[serde(default)]
    pub internal_number: Option<i64>,
    #[serde(default)]
    pub production_year: Option<i32>,
    #[serde(default)]
    pub is_operational: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub license_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub last_safety_inspection: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub next_safety_inspection: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub hova_insurance_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub mekif_insurance_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub carrier_license_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub hazardous_license_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub tachograph_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub winter_inspection_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub brake_inspection_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub special_equipment_expiry_date: Option<NaiveDate>,
}

impl Vehicle {
    pub const DATE_FIELDS: &'static [&'static str] = &[
        "license_expiry_date",
        "last_safety_inspection",
        "next_safety_inspection",
        "hova_insurance_expiry_date",
        "mekif_insurance_expiry_date",
        "carrier_license_expiry_date",
        "hazardous_license_expiry_date",
        "tachograph_expiry_date",
        "winter_inspection_expiry_date",
        "brake_inspection_expiry_date",
        "special_equipment_expiry_date",
    ];

    pub fn new(id: i64, license_plate: impl Into<String>) -> Self {
        Self {
            id,
            license_plate: license_plate.into(),
            ..Self::default()
        }
    }
}

impl DocumentHolder for Vehicle {
    const KIND: EntityKind = EntityKind::Vehicle;

    fn entity_ref(&self) -> EntityRef {
        EntityRef {
            kind: Self::KIND,
            id: self.id,
            name: self.license_plate.clone(),
            related: non_blank(self.driver_name.as_deref()),
        }
    }

    fn document_date(&self, field: &str) -> Option<NaiveDate> {
        match field {
            "license_expiry_date" => self.license_expiry_date,
            "last_safety_inspection" => self.last_safety_inspection,
            "next_safety_inspection" => self.next_safety_inspection,
            "hova_insurance_expiry_date" => self.hova_insurance_expiry_date,
            "mekif_insurance_expiry_date" => self.mekif_insurance_expiry_date,
            "carrier_license_expiry_date" => self.carrier_license_expiry_date,
            "hazardous_license_expiry_date" => self.hazardous_license_expiry_date,
            "tachograph_expiry_date" => self.tachograph_expiry_date,
            "winter_inspection_expiry_date" => self.winter_inspection_expiry_date,
            "brake_inspection_expiry_date" => self.brake_inspection_expiry_date,
            "special_equipment_expiry_date" => self.special_equipment_expiry_date,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub identity_card: String,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub license_class: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub license_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub traffic_info_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub employment_start_date: Option<NaiveDate>,
}

impl Driver {
    pub const DATE_FIELDS: &'static [&'static str] = &[
        "license_expiry_date",
        "traffic_info_expiry_date",
        "birth_date",
        "employment_start_date",
    ];

    pub fn new(id: i64, identity_card: impl Into<String>) -> Self {
        Self {
            id,
            identity_card: identity_card.into(),
            ..Self::default()
        }
    }

    /// `full_name`, else the joined first/last names, else the identity card.
    pub fn display_name(&self) -> String {
        if let Some(full) = non_blank(self.full_name.as_deref()) {
            return full;
        }

        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        non_blank(Some(joined.as_str())).unwrap_or_else(|| self.identity_card.clone())
    }
}

impl DocumentHolder for Driver {
    const KIND: EntityKind = EntityKind::Driver;

    fn entity_ref(&self) -> EntityRef {
        EntityRef {
            kind: Self::KIND,
            id: self.id,
            name: self.display_name(),
            related: non_blank(self.vehicle_plate.as_deref()),
        }
    }

    fn document_date(&self, field: &str) -> Option<NaiveDate> {
        match field {
            "license_expiry_date" => self.license_expiry_date,
            "traffic_info_expiry_date" => self.traffic_info_expiry_date,
            "birth_date" => self.birth_date,
            "employment_start_date" => self.employment_start_date,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub identity_card: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub inspection_week: Option<i32>,
    #[serde(default)]
    pub vehicles_count: usize,
    #[serde(default)]
    pub drivers_count: usize,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub carrier_license_expiry: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub established_date: Option<NaiveDate>,
}

impl Company {
    pub const DATE_FIELDS: &'static [&'static str] =
        &["carrier_license_expiry", "established_date"];

    pub fn new(id: i64, identity_card: impl Into<String>) -> Self {
        Self {
            id,
            identity_card: identity_card.into(),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> String {
        non_blank(self.name.as_deref()).unwrap_or_else(|| self.identity_card.clone())
    }
}

impl DocumentHolder for Company {
    const KIND: EntityKind = EntityKind::Company;

    fn entity_ref(&self) -> EntityRef {
        EntityRef {
            kind: Self::KIND,
            id: self.id,
            name: self.display_name(),
            related: None,
        }
    }

    fn document_date(&self, field: &str) -> Option<NaiveDate> {
        match field {
            "carrier_license_expiry" => self.carrier_license_expiry,
            "established_date" => self.established_date,
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_display_name_falls_back_through_name_parts() {
        let mut driver = Driver::new(7, "039281734");
        assert_eq!(driver.display_name(), "039281734");

        driver.last_name = Some("Levi".to_string());
        assert_eq!(driver.display_name(), "Levi");

        driver.first_name = Some("Dana".to_string());
        assert_eq!(driver.display_name(), "Dana Levi");

        driver.full_name = Some("Dana R. Levi".to_string());
        assert_eq!(driver.display_name(), "Dana R. Levi");
    }

    #[test]
    fn vehicle_reference_carries_assigned_driver() {
        let mut vehicle = Vehicle::new(3, "12-345-67");
        vehicle.driver_name = Some("  ".to_string());
        assert_eq!(vehicle.entity_ref().related, None);

        vehicle.driver_name = Some("Dana Levi".to_string());
        let reference = vehicle.entity_ref();
        assert_eq!(reference.kind, EntityKind::Vehicle);
        assert_eq!(reference.name, "12-345-67");
        assert_eq!(reference.related.as_deref(), Some("Dana Levi"));
    }

    #[test]
    fn unknown_fields_read_as_absent() {
        let mut company = Company::new(1, "514000001");
        company.carrier_license_expiry = NaiveDate::from_ymd_opt(2024, 7, 1);
        assert!(company.document_date("carrier_license_expiry").is_some());
        assert!(company.document_date("license_expiry_date").is_none());
        assert!(EntityKind::Company.exposes("carrier_license_expiry"));
        assert!(!EntityKind::Company.exposes("license_expiry_date"));
    }

    #[test]
    fn wire_records_decode_with_missing_and_blank_dates() {
        let raw = r#"{
            "id": 4,
            "license_plate": "55-101-22",
            "company_name": "Ziv Haulage",
            "license_expiry_date": "2024-05-20",
            "next_safety_inspection": "",
            "tachograph_expiry_date": null,
            "odometer_reading": 180000
        }"#;

        let vehicle: Vehicle = serde_json::from_str(raw).expect("vehicle decodes");
        assert_eq!(vehicle.license_expiry_date, NaiveDate::from_ymd_opt(2024, 5, 20));
        assert_eq!(vehicle.next_safety_inspection, None);
        assert_eq!(vehicle.tachograph_expiry_date, None);
        assert_eq!(vehicle.hova_insurance_expiry_date, None);
    }

    #[test]
    fn wire_records_reject_malformed_dates() {
        let raw = r#"{"id": 1, "identity_card": "1", "license_expiry_date": "next week"}"#;
        let err = serde_json::from_str::<Driver>(raw).expect_err("malformed date rejected");
        assert!(err.to_string().contains("next week"));
    }
}
