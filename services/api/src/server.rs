use crate::cli::ServeArgs;
use crate::infra::{AppState, ExpiryContext};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleet_compliance::config::AppConfig;
use fleet_compliance::error::AppError;
use fleet_compliance::fleet::FleetSnapshot;
use fleet_compliance::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let fields = config.expiry.field_map()?;
    let snapshot = match &config.expiry.fleet_snapshot {
        Some(path) => {
            let snapshot = FleetSnapshot::from_path(path)?;
            info!(
                path = %path.display(),
                vehicles = snapshot.vehicles.len(),
                drivers = snapshot.drivers.len(),
                companies = snapshot.companies.len(),
                "fleet snapshot loaded"
            );
            Some(snapshot)
        }
        None => None,
    };
    let context = Arc::new(ExpiryContext::new(config.expiry.policy, fields, snapshot));

    let app = with_service_routes(context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        horizon_days = config.expiry.policy.horizon_days(),
        "fleet expiry service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
