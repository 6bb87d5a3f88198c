use crate::expiry::{DocumentFieldMap, ExpiryPolicy, FieldMapError, DEFAULT_HORIZON_DAYS};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub expiry: ExpiryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let raw_horizon = env::var("APP_EXPIRY_HORIZON_DAYS")
            .unwrap_or_else(|_| DEFAULT_HORIZON_DAYS.to_string());
        let policy = raw_horizon
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|days| ExpiryPolicy::new(days).ok())
            .ok_or(ConfigError::InvalidHorizon { value: raw_horizon })?;

        let document_fields = optional_path("APP_DOCUMENT_FIELDS");
        let fleet_snapshot = optional_path("APP_FLEET_SNAPSHOT");

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            expiry: ExpiryConfig {
                policy,
                document_fields,
                fleet_snapshot,
            },
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Expiry alerting tunables.
#[derive(Debug, Clone)]
pub struct ExpiryConfig {
    pub policy: ExpiryPolicy,
    pub document_fields: Option<PathBuf>,
    pub fleet_snapshot: Option<PathBuf>,
}

impl ExpiryConfig {
    /// The configured field table, or the standard one when no path is set.
    pub fn field_map(&self) -> Result<DocumentFieldMap, ConfigError> {
        match &self.document_fields {
            Some(path) => DocumentFieldMap::from_path(path).map_err(|source| {
                ConfigError::DocumentFields {
                    path: path.clone(),
                    source,
                }
            }),
            None => Ok(DocumentFieldMap::standard()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidHorizon { value: String },
    DocumentFields { path: PathBuf, source: FieldMapError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidHorizon { value } => write!(
                f,
                "APP_EXPIRY_HORIZON_DAYS must be a non-negative number of days (found '{}')",
                value
            ),
            ConfigError::DocumentFields { path, source } => write!(
                f,
                "could not load document fields from {}: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidHorizon { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::DocumentFields { source, .. } => Some(source),
        }
    }
}
