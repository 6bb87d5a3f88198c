//! Document expiry classification and alert aggregation.

mod alerts;
mod classifier;
mod fields;
pub mod report;

pub use alerts::{aggregate, Alert};
pub use classifier::{
    classify, days_until, local_today, reference_date, ExpiryError, ExpiryPolicy, ExpiryStatus,
    DEFAULT_HORIZON_DAYS,
};
pub use fields::{DocumentField, DocumentFieldMap, FieldMapError};
pub use report::{ExpiryReport, ReportError};
