pub mod aggregate;
pub mod filter;
pub mod service_report;

pub use aggregate::{AggregateQuery, AggregateRow, GroupBy, GroupKey};
pub use filter::{DateRange, ReportFilter};
pub use service_report::{
    CompletedServicesReport, DailyBreakdown, DashboardStats, PerformanceMetrics,
    ProfessionalBreakdown, ProfessionalPerformance, QuickStats, ReportPeriod, ReportSummary,
    ServiceTypeBreakdown, StatusCount, TopService,
};
