use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::filter::DateRange;
use crate::modules::appointments::AppointmentStatus;

/// Reporting period echoed back to callers (`null` for open bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<DateRange> for ReportPeriod {
    fn from(range: DateRange) -> Self {
        Self {
            start_date: range.start_date,
            end_date: range.end_date,
        }
    }
}

/// Headline totals of completed services
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_services: i64,
    pub total_revenue: Decimal,
    pub average_price: Decimal,
    /// Sum of durations in hours, rounded to 2 decimals
    pub total_duration_hours: f64,
    pub period: ReportPeriod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceTypeBreakdown {
    pub service_type_id: Uuid,
    pub service_type_name: String,
    pub count: i64,
    pub revenue: Decimal,
    pub avg_duration_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessionalBreakdown {
    pub professional_id: Uuid,
    pub professional_name: String,
    pub count: i64,
    pub revenue: Decimal,
    pub avg_duration_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    pub count: i64,
    pub revenue: Decimal,
}

/// Completed services over a period with three breakdowns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedServicesReport {
    pub summary: ReportSummary,
    /// Count descending, then name
    pub services_by_type: Vec<ServiceTypeBreakdown>,
    /// Count descending, then name
    pub services_by_professional: Vec<ProfessionalBreakdown>,
    /// Date ascending
    pub daily_breakdown: Vec<DailyBreakdown>,
}

impl CompletedServicesReport {
    pub fn is_empty(&self) -> bool {
        self.summary.total_services == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: AppointmentStatus,
    pub count: i64,
}

/// Outcome rates over every appointment in a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub total_appointments: i64,
    pub completed_appointments: i64,
    pub completion_rate: f64,
    pub cancellation_rate: f64,
    pub no_show_rate: f64,
    /// All five statuses, alphabetical by status value
    pub status_breakdown: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopService {
    pub service_type_id: Uuid,
    pub service_name: String,
    pub base_price: Decimal,
    pub completion_count: i64,
    pub total_revenue: Decimal,
    pub average_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessionalPerformance {
    pub professional_id: Uuid,
    pub professional_name: String,
    pub services_completed: i64,
    pub total_revenue: Decimal,
    pub average_service_price: Decimal,
    /// Sum of durations in hours, deliberately not rounded
    pub total_hours_worked: f64,
}

/// Completed counts for the current day, ISO week and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub today_completed: i64,
    pub week_completed: i64,
    pub month_completed: i64,
    pub date: NaiveDate,
    pub week_start: NaiveDate,
    pub month_start: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_clients: i64,
    pub total_professionals: i64,
    pub total_services: i64,
    pub today_appointments: i64,
    pub pending_appointments: i64,
    pub completed_appointments: i64,
    pub date: NaiveDate,
}
