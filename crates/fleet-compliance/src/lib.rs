pub mod config;
pub mod error;
pub mod expiry;
pub mod fleet;
pub mod telemetry;
