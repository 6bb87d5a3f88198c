use super::super::alerts::Alert;
use super::super::classifier::ExpiryStatus;
use crate::fleet::EntityKind;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub document: String,
    pub owner_kind: EntityKind,
    pub owner_id: i64,
    pub owner_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
    pub expiry_date: NaiveDate,
    pub formatted_date: String,
    pub status: ExpiryStatus,
    pub status_label: &'static str,
    pub days_until_expiry: i64,
    pub days_label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    pub vehicles: usize,
    pub drivers: usize,
    pub companies: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub expired: usize,
    pub expiring_soon: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPage {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub items: Vec<AlertView>,
}

impl Alert {
    pub fn to_view(&self) -> AlertView {
        AlertView {
            document: self.document.clone(),
            owner_kind: self.owner.kind,
            owner_id: self.owner.id,
            owner_name: self.owner.name.clone(),
            related: self.owner.related.clone(),
            expiry_date: self.expiry_date,
            formatted_date: format_short_date(self.expiry_date),
            status: self.status,
            status_label: self.status.label(),
            days_until_expiry: self.days_until_expiry,
            days_label: days_label(self.days_until_expiry),
        }
    }
}

/// "3 days ago", "Today", or "12 days".
pub fn days_label(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        d if d < 0 => format!("{} days ago", d.unsigned_abs()),
        d => format!("{d} days"),
    }
}

/// `DD/MM/YY`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_label_covers_past_today_and_future() {
        assert_eq!(days_label(-12), "12 days ago");
        assert_eq!(days_label(0), "Today");
        assert_eq!(days_label(14), "14 days");
    }

    #[test]
    fn short_dates_are_day_first() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date");
        assert_eq!(format_short_date(date), "02/05/24");
    }
}
