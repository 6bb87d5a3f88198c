use crate::infra::parse_date;
use chrono::NaiveDate;
use clap::Args;
use fleet_compliance::config::AppConfig;
use fleet_compliance::error::AppError;
use fleet_compliance::expiry::report::{AlertPage, DEFAULT_PAGE_SIZE};
use fleet_compliance::expiry::{local_today, DocumentFieldMap, ExpiryPolicy, ExpiryReport};
use fleet_compliance::fleet::FleetSnapshot;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AlertsArgs {
    /// JSON snapshot with `vehicles`, `drivers`, and `companies` arrays
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Reference date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Days ahead that count as expiring soon (defaults to APP_EXPIRY_HORIZON_DAYS)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) horizon_days: Option<i64>,
    /// JSON document field table (defaults to APP_DOCUMENT_FIELDS or the standard table)
    #[arg(long)]
    pub(crate) fields: Option<PathBuf>,
    /// Page of the alert table to print
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Alerts per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub(crate) per_page: usize,
    /// Also write every alert to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) fn run_alerts_report(args: AlertsArgs) -> Result<(), AppError> {
    let AlertsArgs {
        snapshot,
        today,
        horizon_days,
        fields,
        page,
        per_page,
        csv,
    } = args;

    let config = AppConfig::load()?;
    let policy = match horizon_days {
        Some(days) => ExpiryPolicy::new(days)?,
        None => config.expiry.policy,
    };
    let fields = match fields {
        Some(path) => DocumentFieldMap::from_path(path)?,
        None => config.expiry.field_map()?,
    };
    let today = today.unwrap_or_else(local_today);

    let snapshot = FleetSnapshot::from_path(&snapshot)?;
    let report = ExpiryReport::build(&snapshot, &fields, today, &policy);
    let alert_page = report.page(page, per_page)?;

    render_report(&report, &alert_page);

    if let Some(path) = csv {
        let file = std::fs::File::create(&path)?;
        report.write_csv(file)?;
        println!("\nWrote {} alerts to {}", report.alerts.len(), path.display());
    }

    Ok(())
}

fn render_report(report: &ExpiryReport, page: &AlertPage) {
    let counts = report.counts();

    println!("Fleet document expiry report");
    println!(
        "Reference date: {} | Horizon: {} days",
        report.today, report.horizon_days
    );
    println!(
        "Fleet: {} vehicles, {} drivers, {} companies",
        report.stats.vehicles, report.stats.drivers, report.stats.companies
    );
    println!(
        "Alerts: {} expired, {} expiring soon ({} total)",
        counts.expired, counts.expiring_soon, counts.total
    );

    if page.total == 0 {
        println!("\nNo expiry alerts");
        return;
    }

    println!();
    println!(
        "{:<24} {:<20} {:<20} {:<10} {:<14} {}",
        "Document", "Owner", "Related", "Expiry", "Status", "Days"
    );
    for item in &page.items {
        println!(
            "{:<24} {:<20} {:<20} {:<10} {:<14} {}",
            item.document,
            format!("{} {}", item.owner_kind.label(), item.owner_name),
            item.related.as_deref().unwrap_or("-"),
            item.formatted_date,
            item.status_label,
            item.days_label
        );
    }

    if page.total_pages > 1 {
        println!(
            "\nPage {} of {} ({} total)",
            page.page, page.total_pages, page.total
        );
    }
}
