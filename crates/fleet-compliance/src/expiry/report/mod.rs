mod export;
mod summary;
pub mod views;

pub use summary::{ExpiryReport, ReportError, DEFAULT_PAGE_SIZE};
pub use views::{days_label, format_short_date, AlertCounts, AlertPage, AlertView, FleetStats};
