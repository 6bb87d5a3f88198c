use crate::config::ConfigError;
use crate::expiry::{ExpiryError, FieldMapError, ReportError};
use crate::fleet::{DateParseError, SnapshotError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Expiry(ExpiryError),
    Date(DateParseError),
    Fields(FieldMapError),
    Snapshot(SnapshotError),
    Report(ReportError),
    SnapshotUnavailable,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Expiry(err) => write!(f, "expiry policy error: {}", err),
            AppError::Date(err) => write!(f, "date error: {}", err),
            AppError::Fields(err) => write!(f, "document field error: {}", err),
            AppError::Snapshot(err) => write!(f, "fleet data error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::SnapshotUnavailable => {
                write!(f, "no fleet snapshot configured (set APP_FLEET_SNAPSHOT)")
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Expiry(err) => Some(err),
            AppError::Date(err) => Some(err),
            AppError::Fields(err) => Some(err),
            AppError::Snapshot(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::SnapshotUnavailable => None,
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Expiry(_) | AppError::Date(_) | AppError::Report(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::SnapshotUnavailable => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Fields(_)
            | AppError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ExpiryError> for AppError {
    fn from(value: ExpiryError) -> Self {
        Self::Expiry(value)
    }
}

impl From<DateParseError> for AppError {
    fn from(value: DateParseError) -> Self {
        Self::Date(value)
    }
}

impl From<FieldMapError> for AppError {
    fn from(value: FieldMapError) -> Self {
        Self::Fields(value)
    }
}

impl From<SnapshotError> for AppError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_data_errors_map_to_bad_request() {
        let err = AppError::from(ExpiryError::NegativeHorizon(-2));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("-2"));

        let response = AppError::from(ReportError::ZeroPageSize).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_snapshot_is_not_found() {
        let response = AppError::SnapshotUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn listener_failures_are_internal_io_errors() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address in use",
        ));
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
