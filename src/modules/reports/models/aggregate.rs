// Grouped aggregation rows exchanged between the report service and the
// appointment store. Stores only count and sum; averages, rates, rounding
// and ordering are derived by the report service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::filter::ReportFilter;
use crate::core::rounding;
use crate::modules::appointments::{Appointment, AppointmentStatus};

/// Dimension a query is grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// Single row over the whole filtered set
    Total,
    ServiceType,
    Professional,
    Day,
    Status,
}

/// "Query the appointment set with these filters, grouped by this dimension"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateQuery {
    pub filter: ReportFilter,
    /// `None` aggregates over every status
    pub status: Option<AppointmentStatus>,
    pub group_by: GroupBy,
}

impl AggregateQuery {
    pub fn completed(filter: ReportFilter, group_by: GroupBy) -> Self {
        Self {
            filter,
            status: Some(AppointmentStatus::Completed),
            group_by,
        }
    }

    pub fn all_statuses(filter: ReportFilter, group_by: GroupBy) -> Self {
        Self {
            filter,
            status: None,
            group_by,
        }
    }

    /// Row-level predicate equivalent to the SQL WHERE clause
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.status.map_or(true, |status| appointment.status == status)
            && self.filter.range.contains(appointment.scheduled_date)
            && self
                .filter
                .professional_id
                .map_or(true, |id| appointment.professional_id == id)
            && self
                .filter
                .service_type_id
                .map_or(true, |id| appointment.service_type_id == id)
    }
}

/// Identity of an aggregated group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    Total,
    ServiceType {
        id: Uuid,
        name: String,
        base_price: Decimal,
    },
    Professional {
        id: Uuid,
        name: String,
    },
    Day(NaiveDate),
    Status(AppointmentStatus),
}

impl GroupKey {
    /// Human label used as the tie-break when counts are equal
    pub fn label(&self) -> Option<&str> {
        match self {
            GroupKey::ServiceType { name, .. } | GroupKey::Professional { name, .. } => {
                Some(name.as_str())
            }
            GroupKey::Status(status) => Some(status.as_str()),
            GroupKey::Total | GroupKey::Day(_) => None,
        }
    }
}

/// Count and sums for one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub key: GroupKey,
    pub count: i64,
    pub revenue: Decimal,
    pub duration_minutes: i64,
}

impl AggregateRow {
    pub fn empty(key: GroupKey) -> Self {
        Self {
            key,
            count: 0,
            revenue: Decimal::ZERO,
            duration_minutes: 0,
        }
    }

    /// Fold one appointment into the group
    pub fn add(&mut self, appointment: &Appointment) {
        self.count += 1;
        self.revenue += appointment.price;
        self.duration_minutes += i64::from(appointment.duration_minutes);
    }

    pub fn average_price(&self) -> Decimal {
        rounding::average_money(self.revenue, self.count)
    }

    pub fn average_duration_minutes(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.duration_minutes as f64 / self.count as f64
    }
}
