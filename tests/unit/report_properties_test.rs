//! Property tests for report engine invariants over generated salons

#[path = "../helpers/mod.rs"]
mod helpers;

use proptest::prelude::*;
use rust_decimal::Decimal;

use helpers::{date, SalonFixture};
use salonbook::appointments::AppointmentStatus;
use salonbook::reports::models::{DateRange, ReportFilter};

#[derive(Debug, Clone)]
struct Booking {
    professional: usize,
    service_type: usize,
    day: u32,
    status: AppointmentStatus,
    price_cents: i64,
    duration_minutes: u32,
}

fn status_strategy() -> impl Strategy<Value = AppointmentStatus> {
    prop::sample::select(AppointmentStatus::ALL.to_vec())
}

fn booking_strategy() -> impl Strategy<Value = Booking> {
    (0..2usize, 0..3usize, 1..=28u32, status_strategy(), 0..20_000i64, 1..=240u32).prop_map(
        |(professional, service_type, day, status, price_cents, duration_minutes)| Booking {
            professional,
            service_type,
            day,
            status,
            price_cents,
            duration_minutes,
        },
    )
}

fn salon_with(bookings: &[Booking]) -> SalonFixture {
    let salon = SalonFixture::new();
    for booking in bookings {
        let professional = [&salon.ana, &salon.bruno][booking.professional];
        let service_type = [&salon.haircut, &salon.coloring, &salon.manicure][booking.service_type];
        salon.book_priced(
            professional,
            service_type,
            date(2025, 2, booking.day),
            booking.status,
            Decimal::new(booking.price_cents, 2),
            booking.duration_minutes,
        );
    }
    salon
}

fn range(start_day: u32, end_day: u32) -> DateRange {
    DateRange::between(date(2025, 2, start_day), date(2025, 2, end_day))
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reversed_range_is_always_empty(
        bookings in prop::collection::vec(booking_strategy(), 0..40),
        start_day in 2..=28u32,
        gap in 1..=27u32,
    ) {
        let end_day = start_day.saturating_sub(gap).max(1);
        prop_assume!(end_day < start_day);

        let salon = salon_with(&bookings);
        let service = salon.service();
        let reversed = range(start_day, end_day);

        block_on(async {
            let report = service
                .completed_services_report(&ReportFilter::for_range(reversed))
                .await
                .unwrap();
            prop_assert!(report.is_empty());
            prop_assert!(report.services_by_type.is_empty());
            prop_assert!(report.daily_breakdown.is_empty());

            let metrics = service.performance_metrics(&reversed).await.unwrap();
            prop_assert_eq!(metrics.total_appointments, 0);
            prop_assert_eq!(metrics.completion_rate, 0.0);

            prop_assert!(service.top_services(&reversed, 10).await.unwrap().is_empty());
            prop_assert!(service.professional_performance(&reversed).await.unwrap().is_empty());
            Ok(())
        })?;
    }

    #[test]
    fn prop_breakdowns_sum_to_summary(
        bookings in prop::collection::vec(booking_strategy(), 0..40),
        start_day in 1..=28u32,
        span in 0..=27u32,
    ) {
        let salon = salon_with(&bookings);
        let service = salon.service();
        let filter = ReportFilter::for_range(range(start_day, (start_day + span).min(28)));

        block_on(async {
            let report = service.completed_services_report(&filter).await.unwrap();
            let total = report.summary.total_services;

            prop_assert_eq!(report.services_by_type.iter().map(|t| t.count).sum::<i64>(), total);
            prop_assert_eq!(report.services_by_professional.iter().map(|p| p.count).sum::<i64>(), total);
            prop_assert_eq!(report.daily_breakdown.iter().map(|d| d.count).sum::<i64>(), total);
            prop_assert_eq!(
                report.services_by_type.iter().map(|t| t.revenue).sum::<Decimal>(),
                report.summary.total_revenue
            );
            prop_assert!(report
                .daily_breakdown
                .windows(2)
                .all(|pair| pair[0].date < pair[1].date));
            Ok(())
        })?;
    }

    #[test]
    fn prop_rates_are_bounded(bookings in prop::collection::vec(booking_strategy(), 0..40)) {
        let salon = salon_with(&bookings);
        let metrics = block_on(salon.service().performance_metrics(&DateRange::unbounded())).unwrap();

        for rate in [metrics.completion_rate, metrics.cancellation_rate, metrics.no_show_rate] {
            prop_assert!((0.0..=100.0).contains(&rate));
        }
        prop_assert!(
            metrics.completion_rate + metrics.cancellation_rate + metrics.no_show_rate <= 100.02
        );
        prop_assert_eq!(metrics.total_appointments as usize, bookings.len());
        if bookings.is_empty() {
            prop_assert_eq!(metrics.completion_rate, 0.0);
        }
    }

    #[test]
    fn prop_top_services_respects_limit_and_order(
        bookings in prop::collection::vec(booking_strategy(), 0..40),
        limit in 0..5usize,
    ) {
        let salon = salon_with(&bookings);
        let top = block_on(salon.service().top_services(&DateRange::unbounded(), limit)).unwrap();

        prop_assert!(top.len() <= limit);
        prop_assert!(top
            .windows(2)
            .all(|pair| pair[0].completion_count >= pair[1].completion_count));
    }

    #[test]
    fn prop_professional_filters_partition_the_total(
        bookings in prop::collection::vec(booking_strategy(), 0..40),
    ) {
        let salon = salon_with(&bookings);
        let service = salon.service();

        block_on(async {
            let all = service
                .completed_services_report(&ReportFilter::default())
                .await
                .unwrap();

            let mut count = 0;
            let mut revenue = Decimal::ZERO;
            for professional in [&salon.ana, &salon.bruno] {
                let report = service
                    .completed_services_report(&ReportFilter::default().with_professional(professional.id))
                    .await
                    .unwrap();
                count += report.summary.total_services;
                revenue += report.summary.total_revenue;
            }

            prop_assert_eq!(count, all.summary.total_services);
            prop_assert_eq!(revenue, all.summary.total_revenue);
            Ok(())
        })?;
    }
}
