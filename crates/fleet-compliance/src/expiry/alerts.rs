use super::classifier::{classify, days_until, ExpiryPolicy, ExpiryStatus};
use super::fields::DocumentFieldMap;
use crate::fleet::{Company, DocumentHolder, Driver, EntityRef, Vehicle};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// A monitored document that has lapsed or is about to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub document: String,
    pub owner: EntityRef,
    pub expiry_date: NaiveDate,
    /// Always `Expired` or `ExpiringSoon`.
    pub status: ExpiryStatus,
    pub days_until_expiry: i64,
}

/// Collect every expired or expiring document across the fleet.
///
/// Alerts come out sorted by expiry date. Equal dates keep traversal order: vehicles,
/// then drivers, then companies, each in input order and field-table order.
pub fn aggregate(
    vehicles: &[Vehicle],
    drivers: &[Driver],
    companies: &[Company],
    fields: &DocumentFieldMap,
    today: NaiveDate,
    policy: &ExpiryPolicy,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    collect(&mut alerts, vehicles, fields, today, policy);
    collect(&mut alerts, drivers, fields, today, policy);
    collect(&mut alerts, companies, fields, today, policy);

    // `sort_by_key` is stable, which preserves traversal order on ties.
    alerts.sort_by_key(|alert| alert.expiry_date);

    debug!(
        %today,
        horizon_days = policy.horizon_days(),
        alerts = alerts.len(),
        "aggregated expiry alerts"
    );
    alerts
}

fn collect<E: DocumentHolder>(
    alerts: &mut Vec<Alert>,
    entities: &[E],
    fields: &DocumentFieldMap,
    today: NaiveDate,
    policy: &ExpiryPolicy,
) {
    let monitored = fields.fields(E::KIND);
    if monitored.is_empty() {
        return;
    }

    for entity in entities {
        for entry in monitored {
            let Some(expiry_date) = entity.document_date(&entry.field) else {
                continue;
            };

            let status = classify(Some(expiry_date), today, policy);
            if !status.needs_attention() {
                continue;
            }

            alerts.push(Alert {
                document: entry.label.clone(),
                owner: entity.entity_ref(),
                expiry_date,
                status,
                days_until_expiry: days_until(expiry_date, today),
            });
        }
    }
}
