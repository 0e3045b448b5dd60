//! Report engine scenarios against the in-memory store

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use uuid::Uuid;

use helpers::{date, SalonFixture};
use salonbook::appointments::{AppointmentStatus, DirectoryEntity, Professional};
use salonbook::core::{AppError, Result};
use salonbook::reports::models::{
    AggregateQuery, AggregateRow, DateRange, ReportFilter, ReportPeriod,
};
use salonbook::reports::{InMemoryReportStore, ReportService, ReportStore};

#[tokio::test]
async fn test_reference_day_summary_and_rates() {
    let salon = SalonFixture::new();
    let day = date(2025, 3, 12);
    salon.seed_reference_day(day);
    let service = salon.service();

    let report = service
        .completed_services_report(&ReportFilter::for_range(DateRange::single_day(day)))
        .await
        .unwrap();

    assert_eq!(report.summary.total_services, 7);
    assert_eq!(report.summary.total_revenue, dec!(350.00));
    assert_eq!(report.summary.average_price, dec!(50.00));
    // 7 x 45 minutes
    assert_eq!(report.summary.total_duration_hours, 5.25);
    assert_eq!(
        report.summary.period,
        ReportPeriod {
            start_date: Some(day),
            end_date: Some(day)
        }
    );

    let metrics = service
        .performance_metrics(&DateRange::single_day(day))
        .await
        .unwrap();
    assert_eq!(metrics.total_appointments, 10);
    assert_eq!(metrics.completed_appointments, 7);
    assert_eq!(metrics.completion_rate, 70.0);
    assert_eq!(metrics.cancellation_rate, 20.0);
    assert_eq!(metrics.no_show_rate, 10.0);
}

#[tokio::test]
async fn test_breakdowns_are_ordered() {
    let salon = SalonFixture::new();
    salon.book_many(2, &salon.bruno, &salon.haircut, date(2025, 3, 5), AppointmentStatus::Completed);
    salon.book_many(2, &salon.ana, &salon.coloring, date(2025, 3, 3), AppointmentStatus::Completed);
    salon.book(&salon.ana, &salon.manicure, date(2025, 3, 4), AppointmentStatus::Completed);
    salon.book(&salon.bruno, &salon.manicure, date(2025, 3, 4), AppointmentStatus::Scheduled);

    let report = salon
        .service()
        .completed_services_report(&ReportFilter::default())
        .await
        .unwrap();

    // Coloring and Haircut tie on count 2: name decides
    let types: Vec<_> = report
        .services_by_type
        .iter()
        .map(|t| (t.service_type_name.as_str(), t.count))
        .collect();
    assert_eq!(types, vec![("Coloring", 2), ("Haircut", 2), ("Manicure", 1)]);

    let professionals: Vec<_> = report
        .services_by_professional
        .iter()
        .map(|p| (p.professional_name.as_str(), p.count))
        .collect();
    assert_eq!(professionals, vec![("Ana", 3), ("Bruno", 2)]);

    let days: Vec<_> = report.daily_breakdown.iter().map(|d| d.date).collect();
    assert_eq!(days, vec![date(2025, 3, 3), date(2025, 3, 4), date(2025, 3, 5)]);
    assert_eq!(report.daily_breakdown[0].revenue, dec!(240.00));

    let total: i64 = report.services_by_type.iter().map(|t| t.count).sum();
    assert_eq!(total, report.summary.total_services);
}

#[tokio::test]
async fn test_equal_names_fall_back_to_id() {
    let salon = SalonFixture::new();
    let mut first = Professional::new("Dani");
    first.id = Uuid::from_u128(1);
    let mut second = Professional::new("Dani");
    second.id = Uuid::from_u128(2);
    salon.store.add_professional(second.clone()).unwrap();
    salon.store.add_professional(first.clone()).unwrap();

    salon.book(&second, &salon.haircut, date(2025, 3, 1), AppointmentStatus::Completed);
    salon.book(&first, &salon.haircut, date(2025, 3, 1), AppointmentStatus::Completed);

    let performance = salon
        .service()
        .professional_performance(&DateRange::unbounded())
        .await
        .unwrap();

    let ids: Vec<_> = performance.iter().map(|p| p.professional_id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_entity_filters_narrow_the_report() {
    let salon = SalonFixture::new();
    let day = date(2025, 3, 12);
    salon.seed_reference_day(day);
    salon.book(&salon.ana, &salon.manicure, day, AppointmentStatus::Completed);
    let service = salon.service();

    let ana_only = service
        .completed_services_report(&ReportFilter::default().with_professional(salon.ana.id))
        .await
        .unwrap();
    assert_eq!(ana_only.summary.total_services, 5);
    assert_eq!(ana_only.services_by_professional.len(), 1);

    let ana_manicures = service
        .completed_services_report(
            &ReportFilter::default()
                .with_professional(salon.ana.id)
                .with_service_type(salon.manicure.id),
        )
        .await
        .unwrap();
    assert_eq!(ana_manicures.summary.total_services, 1);
    assert_eq!(ana_manicures.summary.total_revenue, dec!(30.00));

    // Unknown ids are not an engine error
    let nobody = service
        .completed_services_report(&ReportFilter::default().with_professional(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn test_per_professional_totals_add_up() {
    let salon = SalonFixture::new();
    salon.seed_reference_day(date(2025, 3, 12));
    salon.book(&salon.bruno, &salon.coloring, date(2025, 3, 14), AppointmentStatus::Completed);
    let service = salon.service();

    let all = service
        .completed_services_report(&ReportFilter::default())
        .await
        .unwrap();

    let mut count = 0;
    let mut revenue = dec!(0);
    for professional in [&salon.ana, &salon.bruno] {
        let report = service
            .completed_services_report(&ReportFilter::default().with_professional(professional.id))
            .await
            .unwrap();
        count += report.summary.total_services;
        revenue += report.summary.total_revenue;
    }

    assert_eq!(count, all.summary.total_services);
    assert_eq!(revenue, all.summary.total_revenue);
}

#[tokio::test]
async fn test_hours_rounded_in_summary_but_not_per_professional() {
    let salon = SalonFixture::new();
    salon.book_priced(
        &salon.ana,
        &salon.coloring,
        date(2025, 3, 12),
        AppointmentStatus::Completed,
        dec!(120.00),
        100,
    );
    let service = salon.service();

    let report = service
        .completed_services_report(&ReportFilter::default())
        .await
        .unwrap();
    assert_eq!(report.summary.total_duration_hours, 1.67);

    let performance = service
        .professional_performance(&DateRange::unbounded())
        .await
        .unwrap();
    assert_eq!(performance[0].total_hours_worked, 100.0 / 60.0);
}

#[tokio::test]
async fn test_average_price_rounds_to_cents() {
    let salon = SalonFixture::new();
    let day = date(2025, 3, 12);
    for price in [dec!(33.33), dec!(33.33), dec!(33.34)] {
        salon.book_priced(&salon.ana, &salon.manicure, day, AppointmentStatus::Completed, price, 30);
    }

    let top = salon
        .service()
        .top_services(&DateRange::unbounded(), 10)
        .await
        .unwrap();

    assert_eq!(top[0].total_revenue, dec!(100.00));
    assert_eq!(top[0].average_price, dec!(33.33));
    assert_eq!(top[0].average_price.to_string(), "33.33");
    assert_eq!(top[0].base_price, dec!(30.00));
}

#[tokio::test]
async fn test_top_services_limit() {
    let salon = SalonFixture::new();
    let day = date(2025, 3, 12);
    salon.book_many(3, &salon.ana, &salon.haircut, day, AppointmentStatus::Completed);
    salon.book_many(2, &salon.bruno, &salon.coloring, day, AppointmentStatus::Completed);
    salon.book(&salon.ana, &salon.manicure, day, AppointmentStatus::Completed);
    let service = salon.service();

    let top = service.top_services(&DateRange::unbounded(), 2).await.unwrap();
    let names: Vec<_> = top.iter().map(|t| t.service_name.as_str()).collect();
    assert_eq!(names, vec!["Haircut", "Coloring"]);
    assert_eq!(top[0].completion_count, 3);

    assert!(service
        .top_services(&DateRange::unbounded(), 0)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        service.top_services(&DateRange::unbounded(), 50).await.unwrap().len(),
        3
    );
}

#[tokio::test]
async fn test_reversed_range_yields_zeroed_results() {
    let salon = SalonFixture::new();
    salon.seed_reference_day(date(2025, 3, 12));
    let service = salon.service();
    let reversed = DateRange::between(date(2025, 3, 31), date(2025, 3, 1));

    let report = service
        .completed_services_report(&ReportFilter::for_range(reversed))
        .await
        .unwrap();
    assert!(report.is_empty());
    assert!(report.daily_breakdown.is_empty());

    let metrics = service.performance_metrics(&reversed).await.unwrap();
    assert_eq!(metrics.total_appointments, 0);
    assert_eq!(metrics.completion_rate, 0.0);

    assert!(service.top_services(&reversed, 10).await.unwrap().is_empty());
    assert!(service
        .professional_performance(&reversed)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(service.completed_count(&reversed).await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_store() {
    let service = ReportService::new(Arc::new(InMemoryReportStore::new()));

    let report = service
        .completed_services_report(&ReportFilter::default())
        .await
        .unwrap();
    assert_eq!(report.summary.total_services, 0);
    assert_eq!(report.summary.total_revenue.to_string(), "0.00");
    assert_eq!(report.summary.average_price.to_string(), "0.00");
    assert_eq!(report.summary.total_duration_hours, 0.0);
    assert!(report.services_by_type.is_empty());

    let metrics = service
        .performance_metrics(&DateRange::unbounded())
        .await
        .unwrap();
    assert_eq!(metrics.status_breakdown.len(), 5);
    assert!(metrics.status_breakdown.iter().all(|s| s.count == 0));
    assert_eq!(metrics.no_show_rate, 0.0);

    let stats = service.quick_stats(date(2025, 3, 12)).await.unwrap();
    assert_eq!(
        (stats.today_completed, stats.week_completed, stats.month_completed),
        (0, 0, 0)
    );
}

#[tokio::test]
async fn test_status_breakdown_is_alphabetical() {
    let salon = SalonFixture::new();
    salon.seed_reference_day(date(2025, 3, 12));

    let metrics = salon
        .service()
        .performance_metrics(&DateRange::unbounded())
        .await
        .unwrap();

    let statuses: Vec<_> = metrics
        .status_breakdown
        .iter()
        .map(|s| (s.status.as_str(), s.count))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("cancelled", 2),
            ("completed", 7),
            ("in_progress", 0),
            ("no_show", 1),
            ("scheduled", 0),
        ]
    );
}

#[tokio::test]
async fn test_quick_stats_windows() {
    let salon = SalonFixture::new();
    let today = date(2025, 3, 12); // Wednesday
    let completed = AppointmentStatus::Completed;
    salon.book_many(2, &salon.ana, &salon.haircut, today, completed);
    salon.book(&salon.ana, &salon.haircut, date(2025, 3, 10), completed);
    salon.book(&salon.bruno, &salon.haircut, date(2025, 3, 3), completed);
    salon.book(&salon.bruno, &salon.haircut, date(2025, 2, 28), completed);
    salon.book(&salon.bruno, &salon.haircut, date(2025, 3, 13), completed);
    salon.book(&salon.bruno, &salon.haircut, today, AppointmentStatus::Cancelled);

    let stats = salon.service().quick_stats(today).await.unwrap();

    assert_eq!(stats.today_completed, 2);
    assert_eq!(stats.week_completed, 3);
    assert_eq!(stats.month_completed, 4);
    assert_eq!(stats.week_start, date(2025, 3, 10));
    assert_eq!(stats.month_start, date(2025, 3, 1));
    assert_eq!(stats.date, today);
}

#[tokio::test]
async fn test_quick_stats_week_starts_monday_on_sunday() {
    let salon = SalonFixture::new();
    let stats = salon.service().quick_stats(date(2025, 3, 16)).await.unwrap();
    assert_eq!(stats.week_start, date(2025, 3, 10));
}

#[tokio::test]
async fn test_dashboard_stats() {
    let salon = SalonFixture::new();
    let today = date(2025, 3, 12);
    salon.book_many(2, &salon.ana, &salon.haircut, today, AppointmentStatus::Scheduled);
    salon.book(&salon.bruno, &salon.haircut, today, AppointmentStatus::Completed);
    salon.book(&salon.bruno, &salon.coloring, today, AppointmentStatus::Cancelled);
    salon.book(&salon.ana, &salon.coloring, date(2025, 3, 11), AppointmentStatus::Completed);

    let mut retired = Professional::new("Edu");
    retired.is_active = false;
    salon.store.add_professional(retired).unwrap();

    let stats = salon.service().dashboard_stats(today).await.unwrap();

    assert_eq!(stats.total_clients, 1);
    assert_eq!(stats.total_professionals, 2);
    assert_eq!(stats.total_services, 3);
    assert_eq!(stats.today_appointments, 4);
    assert_eq!(stats.pending_appointments, 2);
    assert_eq!(stats.completed_appointments, 1);
    assert_eq!(stats.date, today);
}

#[tokio::test]
async fn test_validate_filter() {
    let salon = SalonFixture::new();
    let service = salon.service();

    let known = ReportFilter::default()
        .with_professional(salon.ana.id)
        .with_service_type(salon.haircut.id);
    assert!(service.validate_filter(&known).await.is_ok());

    let unknown_professional = ReportFilter::default().with_professional(Uuid::new_v4());
    let err = service.validate_filter(&unknown_professional).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Professional not found."));

    let unknown_service = ReportFilter::default().with_service_type(Uuid::new_v4());
    let err = service.validate_filter(&unknown_service).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Service type not found."));

    let reversed = ReportFilter::for_range(DateRange::between(date(2025, 3, 2), date(2025, 3, 1)));
    assert!(matches!(
        service.validate_filter(&reversed).await,
        Err(AppError::Validation(_))
    ));
}

/// Store whose every call fails like a dropped connection
struct UnavailableStore;

#[async_trait]
impl ReportStore for UnavailableStore {
    async fn aggregate(&self, _query: &AggregateQuery) -> Result<Vec<AggregateRow>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn professional_exists(&self, _id: Uuid) -> Result<bool> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn service_type_exists(&self, _id: Uuid) -> Result<bool> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn count_active(&self, _entity: DirectoryEntity) -> Result<i64> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<()> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn test_store_errors_propagate_unmodified() {
    let service = ReportService::new(Arc::new(UnavailableStore));

    let err = service
        .completed_services_report(&ReportFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(sqlx::Error::PoolTimedOut)));

    assert!(matches!(
        service.dashboard_stats(date(2025, 3, 12)).await,
        Err(AppError::Database(_))
    ));
}
