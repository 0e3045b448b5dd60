use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::core::{AppError, Result};

const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Resolves "today" in the salon's local timezone.
///
/// Timestamps are UTC everywhere else; only calendar-day based reports
/// (quick stats, dashboard) need the salon's local date.
#[derive(Debug, Clone, Copy)]
pub struct SalonClock {
    offset: FixedOffset,
    pinned: Option<NaiveDate>,
}

impl SalonClock {
    /// Clock for a fixed UTC offset, in minutes east of UTC
    pub fn new(offset_minutes: i32) -> Result<Self> {
        if offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(AppError::configuration(format!(
                "UTC offset {} minutes is outside +/-{} minutes",
                offset_minutes, MAX_OFFSET_MINUTES
            )));
        }

        let offset = FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| {
            AppError::configuration(format!("Invalid UTC offset: {} minutes", offset_minutes))
        })?;

        Ok(Self {
            offset,
            pinned: None,
        })
    }

    /// Clock that always reports the given date
    pub fn pinned(today: NaiveDate) -> Self {
        Self {
            offset: Utc.fix(),
            pinned: Some(today),
        }
    }

    /// Current date in salon local time
    pub fn today(&self) -> NaiveDate {
        match self.pinned {
            Some(date) => date,
            None => self.local_date(Utc::now()),
        }
    }

    /// Convert a UTC instant to the salon's calendar date
    pub fn local_date(&self, utc_time: DateTime<Utc>) -> NaiveDate {
        utc_time.with_timezone(&self.offset).date_naive()
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for SalonClock {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
            pinned: None,
        }
    }
}
