use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// Inclusive bounds on `scheduled_date`; either side may be open.
///
/// A range whose start is after its end is allowed and simply matches
/// nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// No bounds at all
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::new(Some(start_date), Some(end_date))
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self::between(date, date)
    }

    /// True when both bounds are set and the start is after the end
    pub fn is_reversed(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if start > end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }
}

/// Filters shared by every report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub range: DateRange,
    pub professional_id: Option<Uuid>,
    pub service_type_id: Option<Uuid>,
}

impl ReportFilter {
    pub fn for_range(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn with_professional(mut self, professional_id: Uuid) -> Self {
        self.professional_id = Some(professional_id);
        self
    }

    pub fn with_service_type(mut self, service_type_id: Uuid) -> Self {
        self.service_type_id = Some(service_type_id);
        self
    }
}
