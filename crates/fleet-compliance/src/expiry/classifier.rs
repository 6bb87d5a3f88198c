use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZON_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpiryError {
    #[error("expiry horizon must be zero or more days (found {0})")]
    NegativeHorizon(i64),
    #[error("expiry horizon of {0} days is out of range")]
    HorizonOutOfRange(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Valid,
    ExpiringSoon,
    Expired,
}

impl ExpiryStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
        }
    }

    /// Highlight state for a single form input.
    pub const fn field_state(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
        }
    }

    pub const fn needs_attention(self) -> bool {
        !matches!(self, Self::Valid)
    }
}

/// How far ahead of today a document counts as expiring soon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpiryPolicy {
    horizon_days: u32,
}

impl ExpiryPolicy {
    pub fn new(horizon_days: i64) -> Result<Self, ExpiryError> {
        if horizon_days < 0 {
            return Err(ExpiryError::NegativeHorizon(horizon_days));
        }

        let horizon_days = u32::try_from(horizon_days)
            .map_err(|_| ExpiryError::HorizonOutOfRange(horizon_days))?;
        Ok(Self { horizon_days })
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Last date still inside the horizon, or `None` when it runs past the calendar.
    pub fn horizon_end(&self, today: NaiveDate) -> Option<NaiveDate> {
        today.checked_add_days(Days::new(u64::from(self.horizon_days)))
    }

    pub fn classify(&self, date: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
        classify(date, today, self)
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

/// Classify a document date against `today`.
///
/// An absent date is `Valid`: nothing is on file, so nothing can lapse. A date equal
/// to `today` is still `ExpiringSoon`, and the horizon end is inclusive.
pub fn classify(date: Option<NaiveDate>, today: NaiveDate, policy: &ExpiryPolicy) -> ExpiryStatus {
    let Some(date) = date else {
        return ExpiryStatus::Valid;
    };

    if date < today {
        return ExpiryStatus::Expired;
    }

    match policy.horizon_end(today) {
        Some(end) if date > end => ExpiryStatus::Valid,
        _ => ExpiryStatus::ExpiringSoon,
    }
}

/// Whole days from `today` to `date`; negative once the date has passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// Calendar date of `instant` in its own timezone, discarding the time of day.
pub fn reference_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// Today according to the local process clock.
pub fn local_today() -> NaiveDate {
    reference_date(&Local::now())
}
