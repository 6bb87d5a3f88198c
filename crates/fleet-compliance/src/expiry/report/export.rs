use super::summary::{ExpiryReport, ReportError};
use std::io::Write;

const HEADER: [&str; 8] = [
    "document",
    "owner_kind",
    "owner",
    "related",
    "expiry_date",
    "status",
    "days_until_expiry",
    "days",
];

impl ExpiryReport {
    /// Write every alert as a CSV row, soonest first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(HEADER).map_err(export_error)?;

        for view in self.views() {
            let expiry_date = view.expiry_date.to_string();
            let days_until = view.days_until_expiry.to_string();
            csv_writer
                .write_record([
                    view.document.as_str(),
                    view.owner_kind.label(),
                    view.owner_name.as_str(),
                    view.related.as_deref().unwrap_or_default(),
                    expiry_date.as_str(),
                    view.status_label,
                    days_until.as_str(),
                    view.days_label.as_str(),
                ])
                .map_err(export_error)?;
        }

        csv_writer
            .flush()
            .map_err(|err| ReportError::Export(err.to_string()))
    }
}

fn export_error(err: csv::Error) -> ReportError {
    ReportError::Export(err.to_string())
}
