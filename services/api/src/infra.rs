use chrono::NaiveDate;
use fleet_compliance::error::AppError;
use fleet_compliance::expiry::{local_today, DocumentFieldMap, ExpiryPolicy};
use fleet_compliance::fleet::{parse_document_date, DateParseError, FleetSnapshot};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Policy, field table, and optional preloaded fleet shared by the expiry handlers.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpiryContext {
    pub(crate) policy: ExpiryPolicy,
    pub(crate) fields: DocumentFieldMap,
    pub(crate) snapshot: Option<FleetSnapshot>,
}

impl ExpiryContext {
    pub(crate) fn new(
        policy: ExpiryPolicy,
        fields: DocumentFieldMap,
        snapshot: Option<FleetSnapshot>,
    ) -> Self {
        Self {
            policy,
            fields,
            snapshot,
        }
    }

    /// A per-request horizon override, or the configured policy.
    pub(crate) fn policy_for(&self, horizon_days: Option<i64>) -> Result<ExpiryPolicy, AppError> {
        match horizon_days {
            Some(days) => Ok(ExpiryPolicy::new(days)?),
            None => Ok(self.policy),
        }
    }
}

/// Clap value parser for `YYYY-MM-DD` arguments.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// The reference date for a request: the supplied one, else the local clock.
pub(crate) fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, DateParseError> {
    let supplied = match raw {
        Some(value) => parse_document_date(value)?,
        None => None,
    };
    Ok(supplied.unwrap_or_else(local_today))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_today_prefers_supplied_date() {
        let date = resolve_today(Some("2024-06-01")).expect("date parses");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid"));
        assert_eq!(resolve_today(Some("")).expect("blank is clock"), local_today());
        assert!(resolve_today(Some("yesterday")).is_err());
    }

    #[test]
    fn request_horizon_overrides_configured_policy() {
        let context = ExpiryContext::default();
        assert_eq!(context.policy_for(None).expect("default").horizon_days(), 30);
        assert_eq!(context.policy_for(Some(5)).expect("override").horizon_days(), 5);
        assert!(context.policy_for(Some(-1)).is_err());
    }
}
