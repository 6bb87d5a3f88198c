use super::super::alerts::{aggregate, Alert};
use super::super::classifier::{ExpiryPolicy, ExpiryStatus};
use super::super::fields::DocumentFieldMap;
use super::views::{AlertCounts, AlertPage, AlertView, FleetStats};
use crate::fleet::FleetSnapshot;
use chrono::NaiveDate;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
    #[error("failed to write alert export: {0}")]
    Export(String),
}

/// Dashboard view of one aggregation pass.
#[derive(Debug, Clone)]
pub struct ExpiryReport {
    pub today: NaiveDate,
    pub horizon_days: u32,
    pub stats: FleetStats,
    pub alerts: Vec<Alert>,
}

impl ExpiryReport {
    pub fn build(
        snapshot: &FleetSnapshot,
        fields: &DocumentFieldMap,
        today: NaiveDate,
        policy: &ExpiryPolicy,
    ) -> Self {
        let alerts = aggregate(
            &snapshot.vehicles,
            &snapshot.drivers,
            &snapshot.companies,
            fields,
            today,
            policy,
        );

        Self {
            today,
            horizon_days: policy.horizon_days(),
            stats: FleetStats {
                vehicles: snapshot.vehicles.len(),
                drivers: snapshot.drivers.len(),
                companies: snapshot.companies.len(),
            },
            alerts,
        }
    }

    pub fn counts(&self) -> AlertCounts {
        let expired = self
            .alerts
            .iter()
            .filter(|alert| alert.status == ExpiryStatus::Expired)
            .count();
        let expiring_soon = self
            .alerts
            .iter()
            .filter(|alert| alert.status == ExpiryStatus::ExpiringSoon)
            .count();

        AlertCounts {
            expired,
            expiring_soon,
            total: self.alerts.len(),
        }
    }

    pub fn views(&self) -> Vec<AlertView> {
        self.alerts.iter().map(Alert::to_view).collect()
    }

    /// One 1-based page of alert views. Pages below 1 clamp to the first page.
    pub fn page(&self, page: usize, per_page: usize) -> Result<AlertPage, ReportError> {
        if per_page == 0 {
            return Err(ReportError::ZeroPageSize);
        }

        let page = page.max(1);
        let total = self.alerts.len();
        let items = self
            .alerts
            .iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .map(Alert::to_view)
            .collect();

        Ok(AlertPage {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
            items,
        })
    }
}
