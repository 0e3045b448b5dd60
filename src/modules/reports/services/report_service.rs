use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, info};

use crate::core::rounding::{minutes_to_hours, percentage, round_hundredths, round_money};
use crate::core::{AppError, Result};
use crate::modules::appointments::{AppointmentStatus, DirectoryEntity};
use crate::modules::reports::models::{
    AggregateQuery, AggregateRow, CompletedServicesReport, DailyBreakdown, DashboardStats,
    DateRange, GroupBy, GroupKey, PerformanceMetrics, ProfessionalBreakdown,
    ProfessionalPerformance, QuickStats, ReportFilter, ReportPeriod, ReportSummary,
    ServiceTypeBreakdown, StatusCount, TopService,
};
use crate::modules::reports::repositories::ReportStore;

/// Report engine: runs grouped aggregations against a [`ReportStore`] and
/// derives averages, rates, rounding and ordering from the raw sums.
///
/// Stateless apart from the store handle. Reversed date ranges and unknown
/// entity ids produce empty results here; rejecting them is up to the caller
/// (see [`ReportService::validate_date_range`] and
/// [`ReportService::validate_filter`]).
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ReportStore> {
        &self.store
    }

    /// Reject ranges whose start is after their end
    pub fn validate_date_range(&self, range: &DateRange) -> Result<()> {
        if range.is_reversed() {
            return Err(AppError::validation("start_date cannot be after end_date."));
        }
        Ok(())
    }

    /// Check that the professional and service type a filter references exist
    pub async fn validate_filter(&self, filter: &ReportFilter) -> Result<()> {
        self.validate_date_range(&filter.range)?;

        if let Some(professional_id) = filter.professional_id {
            if !self.store.professional_exists(professional_id).await? {
                return Err(AppError::not_found("Professional not found."));
            }
        }

        if let Some(service_type_id) = filter.service_type_id {
            if !self.store.service_type_exists(service_type_id).await? {
                return Err(AppError::not_found("Service type not found."));
            }
        }

        Ok(())
    }

    /// Completed services with summary, per-type, per-professional and
    /// per-day breakdowns
    pub async fn completed_services_report(
        &self,
        filter: &ReportFilter,
    ) -> Result<CompletedServicesReport> {
        info!(
            start_date = ?filter.range.start_date,
            end_date = ?filter.range.end_date,
            professional_id = ?filter.professional_id,
            service_type_id = ?filter.service_type_id,
            "Generating completed services report"
        );

        let total_query = AggregateQuery::completed(*filter, GroupBy::Total);
        let type_query = AggregateQuery::completed(*filter, GroupBy::ServiceType);
        let professional_query = AggregateQuery::completed(*filter, GroupBy::Professional);
        let day_query = AggregateQuery::completed(*filter, GroupBy::Day);

        let (totals, by_type, by_professional, by_day) = futures_util::try_join!(
            self.store.aggregate(&total_query),
            self.store.aggregate(&type_query),
            self.store.aggregate(&professional_query),
            self.store.aggregate(&day_query),
        )?;

        let total = single_total(totals);
        let summary = ReportSummary {
            total_services: total.count,
            total_revenue: round_money(total.revenue),
            average_price: total.average_price(),
            total_duration_hours: round_hundredths(minutes_to_hours(total.duration_minutes)),
            period: ReportPeriod::from(filter.range),
        };

        let services_by_type = ranked(by_type)
            .into_iter()
            .filter_map(|row| match &row.key {
                GroupKey::ServiceType { id, name, .. } => Some(ServiceTypeBreakdown {
                    service_type_id: *id,
                    service_type_name: name.clone(),
                    count: row.count,
                    revenue: round_money(row.revenue),
                    avg_duration_minutes: row.average_duration_minutes(),
                }),
                _ => None,
            })
            .collect();

        let services_by_professional = ranked(by_professional)
            .into_iter()
            .filter_map(|row| match &row.key {
                GroupKey::Professional { id, name } => Some(ProfessionalBreakdown {
                    professional_id: *id,
                    professional_name: name.clone(),
                    count: row.count,
                    revenue: round_money(row.revenue),
                    avg_duration_minutes: row.average_duration_minutes(),
                }),
                _ => None,
            })
            .collect();

        let mut daily_breakdown: Vec<DailyBreakdown> = by_day
            .into_iter()
            .filter_map(|row| match row.key {
                GroupKey::Day(date) => Some(DailyBreakdown {
                    date,
                    count: row.count,
                    revenue: round_money(row.revenue),
                }),
                _ => None,
            })
            .collect();
        daily_breakdown.sort_by_key(|day| day.date);

        let report = CompletedServicesReport {
            summary,
            services_by_type,
            services_by_professional,
            daily_breakdown,
        };

        if report.is_empty() {
            debug!("No completed services matched the report filter");
        } else {
            info!(
                total_services = report.summary.total_services,
                service_types = report.services_by_type.len(),
                professionals = report.services_by_professional.len(),
                days = report.daily_breakdown.len(),
                "Completed services report generated"
            );
        }

        Ok(report)
    }

    /// Completion, cancellation and no-show rates over every appointment in
    /// the range
    pub async fn performance_metrics(&self, range: &DateRange) -> Result<PerformanceMetrics> {
        info!(
            start_date = ?range.start_date,
            end_date = ?range.end_date,
            "Generating performance metrics"
        );

        let rows = self
            .store
            .aggregate(&AggregateQuery::all_statuses(
                ReportFilter::for_range(*range),
                GroupBy::Status,
            ))
            .await?;

        let count_of = |status: AppointmentStatus| -> i64 {
            rows.iter()
                .filter(|row| row.key == GroupKey::Status(status))
                .map(|row| row.count)
                .sum()
        };

        let mut status_breakdown: Vec<StatusCount> = AppointmentStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: count_of(status),
            })
            .collect();
        status_breakdown.sort_by(|a, b| a.status.as_str().cmp(b.status.as_str()));

        let total_appointments: i64 = status_breakdown.iter().map(|s| s.count).sum();
        let completed_appointments = count_of(AppointmentStatus::Completed);

        Ok(PerformanceMetrics {
            total_appointments,
            completed_appointments,
            completion_rate: percentage(completed_appointments, total_appointments),
            cancellation_rate: percentage(
                count_of(AppointmentStatus::Cancelled),
                total_appointments,
            ),
            no_show_rate: percentage(count_of(AppointmentStatus::NoShow), total_appointments),
            status_breakdown,
        })
    }

    /// Service types ranked by completed count, at most `limit` entries
    pub async fn top_services(&self, range: &DateRange, limit: usize) -> Result<Vec<TopService>> {
        info!(
            start_date = ?range.start_date,
            end_date = ?range.end_date,
            limit,
            "Generating top services"
        );

        if limit == 0 {
            return Ok(Vec::new());
        }

        let rows = self
            .store
            .aggregate(&AggregateQuery::completed(
                ReportFilter::for_range(*range),
                GroupBy::ServiceType,
            ))
            .await?;

        Ok(ranked(rows)
            .into_iter()
            .filter_map(|row| match &row.key {
                GroupKey::ServiceType {
                    id,
                    name,
                    base_price,
                } => Some(TopService {
                    service_type_id: *id,
                    service_name: name.clone(),
                    base_price: *base_price,
                    completion_count: row.count,
                    total_revenue: round_money(row.revenue),
                    average_price: row.average_price(),
                }),
                _ => None,
            })
            .take(limit)
            .collect())
    }

    /// Completed work per professional; hours are left unrounded
    pub async fn professional_performance(
        &self,
        range: &DateRange,
    ) -> Result<Vec<ProfessionalPerformance>> {
        info!(
            start_date = ?range.start_date,
            end_date = ?range.end_date,
            "Generating professional performance"
        );

        let rows = self
            .store
            .aggregate(&AggregateQuery::completed(
                ReportFilter::for_range(*range),
                GroupBy::Professional,
            ))
            .await?;

        Ok(ranked(rows)
            .into_iter()
            .filter_map(|row| match &row.key {
                GroupKey::Professional { id, name } => Some(ProfessionalPerformance {
                    professional_id: *id,
                    professional_name: name.clone(),
                    services_completed: row.count,
                    total_revenue: round_money(row.revenue),
                    average_service_price: row.average_price(),
                    total_hours_worked: minutes_to_hours(row.duration_minutes),
                }),
                _ => None,
            })
            .collect())
    }

    /// Number of completed appointments in the range
    pub async fn completed_count(&self, range: &DateRange) -> Result<i64> {
        let rows = self
            .store
            .aggregate(&AggregateQuery::completed(
                ReportFilter::for_range(*range),
                GroupBy::Total,
            ))
            .await?;

        Ok(single_total(rows).count)
    }

    /// Completed counts for `today`, its ISO week (from Monday) and its month
    pub async fn quick_stats(&self, today: NaiveDate) -> Result<QuickStats> {
        let week_start = today
            .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
            .unwrap_or(today);
        let month_start = today.with_day(1).unwrap_or(today);

        let today_range = DateRange::single_day(today);
        let week_range = DateRange::between(week_start, today);
        let month_range = DateRange::between(month_start, today);

        let (today_completed, week_completed, month_completed) = futures_util::try_join!(
            self.completed_count(&today_range),
            self.completed_count(&week_range),
            self.completed_count(&month_range),
        )?;

        debug!(
            %today,
            today_completed,
            week_completed,
            month_completed,
            "Quick stats computed"
        );

        Ok(QuickStats {
            today_completed,
            week_completed,
            month_completed,
            date: today,
            week_start,
            month_start,
        })
    }

    /// Directory sizes and today's appointment counters
    pub async fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats> {
        let today_query = AggregateQuery::all_statuses(
            ReportFilter::for_range(DateRange::single_day(today)),
            GroupBy::Status,
        );

        let (total_clients, total_professionals, total_services, today_rows) = futures_util::try_join!(
            self.store.count_active(DirectoryEntity::Clients),
            self.store.count_active(DirectoryEntity::Professionals),
            self.store.count_active(DirectoryEntity::ServiceTypes),
            self.store.aggregate(&today_query),
        )?;

        let count_of = |status: AppointmentStatus| -> i64 {
            today_rows
                .iter()
                .filter(|row| row.key == GroupKey::Status(status))
                .map(|row| row.count)
                .sum()
        };

        Ok(DashboardStats {
            total_clients,
            total_professionals,
            total_services,
            today_appointments: today_rows.iter().map(|row| row.count).sum(),
            pending_appointments: count_of(AppointmentStatus::Scheduled),
            completed_appointments: count_of(AppointmentStatus::Completed),
            date: today,
        })
    }
}

/// The single `GroupBy::Total` row, zeroed if the store returned none
fn single_total(rows: Vec<AggregateRow>) -> AggregateRow {
    rows.into_iter()
        .next()
        .unwrap_or_else(|| AggregateRow::empty(GroupKey::Total))
}

/// Count descending, then label ascending, then key (id) ascending
fn ranked(mut rows: Vec<AggregateRow>) -> Vec<AggregateRow> {
    rows.sort_by(compare_ranked);
    rows
}

fn compare_ranked(a: &AggregateRow, b: &AggregateRow) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.key.label().cmp(&b.key.label()))
        .then_with(|| a.key.cmp(&b.key))
}
