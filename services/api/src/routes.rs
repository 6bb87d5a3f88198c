use crate::infra::{resolve_today, AppState, ExpiryContext};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use fleet_compliance::error::AppError;
use fleet_compliance::expiry::report::{
    days_label, AlertCounts, AlertPage, FleetStats, DEFAULT_PAGE_SIZE,
};
use fleet_compliance::expiry::{
    days_until, local_today, DocumentFieldMap, ExpiryReport, ExpiryStatus,
};
use fleet_compliance::fleet::search::{
    search_companies, search_drivers, search_vehicles, CompanyQuery, DriverQuery, VehicleQuery,
};
use fleet_compliance::fleet::{deserialize_document_date, Company, Driver, FleetSnapshot, Vehicle};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct AlertsRequest {
    #[serde(default)]
    pub(crate) vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub(crate) drivers: Vec<Driver>,
    #[serde(default)]
    pub(crate) companies: Vec<Company>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) horizon_days: Option<i64>,
    #[serde(default)]
    pub(crate) page: Option<usize>,
    #[serde(default)]
    pub(crate) per_page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlertsQuery {
    pub(crate) today: Option<String>,
    pub(crate) horizon_days: Option<i64>,
    pub(crate) page: Option<usize>,
    pub(crate) per_page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    pub(crate) q: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub(crate) company_id: Option<i64>,
    pub(crate) car_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AlertsResponse {
    pub(crate) today: NaiveDate,
    pub(crate) horizon_days: u32,
    pub(crate) stats: FleetStats,
    pub(crate) counts: AlertCounts,
    pub(crate) page: AlertPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyRequest {
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub(crate) date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_document_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) horizon_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyResponse {
    pub(crate) date: Option<NaiveDate>,
    pub(crate) today: NaiveDate,
    pub(crate) horizon_days: u32,
    pub(crate) status: ExpiryStatus,
    pub(crate) status_label: &'static str,
    pub(crate) field_state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) days_until_expiry: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) days_label: Option<String>,
}

pub(crate) fn expiry_router(context: Arc<ExpiryContext>) -> Router {
    Router::new()
        .route(
            "/api/v1/expiry/alerts",
            post(alerts_endpoint).get(snapshot_alerts_endpoint),
        )
        .route("/api/v1/expiry/classify", post(classify_endpoint))
        .route(
            "/api/v1/expiry/document-fields",
            get(document_fields_endpoint),
        )
        .route("/api/v1/search/companies", get(search_companies_endpoint))
        .route("/api/v1/search/vehicles", get(search_vehicles_endpoint))
        .route("/api/v1/search/drivers", get(search_drivers_endpoint))
        .with_state(context)
}

pub(crate) fn with_service_routes(context: Arc<ExpiryContext>) -> Router {
    expiry_router(context)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn alerts_endpoint(
    State(context): State<Arc<ExpiryContext>>,
    Json(payload): Json<AlertsRequest>,
) -> Result<Json<AlertsResponse>, AppError> {
    let AlertsRequest {
        vehicles,
        drivers,
        companies,
        today,
        horizon_days,
        page,
        per_page,
    } = payload;

    let snapshot = FleetSnapshot {
        vehicles,
        drivers,
        companies,
    };
    let today = today.unwrap_or_else(local_today);
    build_response(&context, &snapshot, today, horizon_days, page, per_page).map(Json)
}

pub(crate) async fn snapshot_alerts_endpoint(
    State(context): State<Arc<ExpiryContext>>,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<AlertsResponse>, AppError> {
    let snapshot = loaded_snapshot(&context)?;
    let today = resolve_today(query.today.as_deref())?;
    build_response(
        &context,
        snapshot,
        today,
        query.horizon_days,
        query.page,
        query.per_page,
    )
    .map(Json)
}

pub(crate) async fn classify_endpoint(
    State(context): State<Arc<ExpiryContext>>,
    Json(payload): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let policy = context.policy_for(payload.horizon_days)?;
    let today = payload.today.unwrap_or_else(local_today);
    let status = policy.classify(payload.date, today);
    let days = payload.date.map(|date| days_until(date, today));

    Ok(Json(ClassifyResponse {
        date: payload.date,
        today,
        horizon_days: policy.horizon_days(),
        status,
        status_label: status.label(),
        field_state: status.field_state(),
        days_until_expiry: days,
        days_label: days.map(days_label),
    }))
}

pub(crate) async fn document_fields_endpoint(
    State(context): State<Arc<ExpiryContext>>,
) -> Json<DocumentFieldMap> {
    Json(context.fields.clone())
}

pub(crate) async fn search_companies_endpoint(
    State(context): State<Arc<ExpiryContext>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Company>>, AppError> {
    let snapshot = loaded_snapshot(&context)?;
    let query = CompanyQuery { q: params.q };
    let hits = search_companies(&snapshot.companies, &query);
    Ok(Json(hits.into_iter().cloned().collect()))
}

pub(crate) async fn search_vehicles_endpoint(
    State(context): State<Arc<ExpiryContext>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let snapshot = loaded_snapshot(&context)?;
    let query = VehicleQuery {
        q: params.q,
        company_id: params.company_id,
        car_type: params.car_type,
    };
    let hits = search_vehicles(&snapshot.vehicles, &query);
    Ok(Json(hits.into_iter().cloned().collect()))
}

pub(crate) async fn search_drivers_endpoint(
    State(context): State<Arc<ExpiryContext>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Driver>>, AppError> {
    let snapshot = loaded_snapshot(&context)?;
    let query = DriverQuery {
        q: params.q,
        company_id: params.company_id,
    };
    let hits = search_drivers(&snapshot.drivers, &query);
    Ok(Json(hits.into_iter().cloned().collect()))
}

/// `company_id=` with no value means no filter.
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn loaded_snapshot(context: &ExpiryContext) -> Result<&FleetSnapshot, AppError> {
    context
        .snapshot
        .as_ref()
        .ok_or(AppError::SnapshotUnavailable)
}

fn build_response(
    context: &ExpiryContext,
    snapshot: &FleetSnapshot,
    today: NaiveDate,
    horizon_days: Option<i64>,
    page: Option<usize>,
    per_page: Option<usize>,
) -> Result<AlertsResponse, AppError> {
    let policy = context.policy_for(horizon_days)?;
    let report = ExpiryReport::build(snapshot, &context.fields, today, &policy);
    let counts = report.counts();
    let page = report.page(page.unwrap_or(1), per_page.unwrap_or(DEFAULT_PAGE_SIZE))?;

    info!(
        %today,
        horizon_days = report.horizon_days,
        expired = counts.expired,
        expiring_soon = counts.expiring_soon,
        "expiry alerts computed"
    );

    Ok(AlertsResponse {
        today,
        horizon_days: report.horizon_days,
        stats: report.stats,
        counts,
        page,
    })
}
