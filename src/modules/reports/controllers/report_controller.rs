use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result, SalonClock};
use crate::modules::reports::models::{
    DateRange, ProfessionalPerformance, ReportFilter, ReportPeriod, TopService,
};
use crate::modules::reports::services::ReportService;

/// Number of entries returned by top services when `limit` is absent or unusable
pub const DEFAULT_TOP_SERVICES_LIMIT: usize = 10;

/// Query parameters for date-ranged reports.
///
/// Fields stay raw strings so malformed values surface as our own 400
/// messages instead of a generic deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    fn parse(&self) -> Result<DateRange> {
        Ok(DateRange::new(
            parse_date_param("start_date", self.start_date.as_deref())?,
            parse_date_param("end_date", self.end_date.as_deref())?,
        ))
    }
}

/// Query parameters for the completed services report
#[derive(Debug, Default, Deserialize)]
pub struct CompletedServicesQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub professional_id: Option<String>,
    pub service_type_id: Option<String>,
}

impl CompletedServicesQuery {
    fn parse(&self) -> Result<ReportFilter> {
        let range = DateRangeQuery {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
        .parse()?;

        let mut filter = ReportFilter::for_range(range);
        if let Some(id) = parse_uuid_param("professional_id", self.professional_id.as_deref())? {
            filter = filter.with_professional(id);
        }
        if let Some(id) = parse_uuid_param("service_type_id", self.service_type_id.as_deref())? {
            filter = filter.with_service_type(id);
        }
        Ok(filter)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TopServicesQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopServicesResponse {
    pub top_services: Vec<TopService>,
    pub limit: usize,
    pub period: ReportPeriod,
}

#[derive(Debug, Serialize)]
pub struct ProfessionalPerformanceResponse {
    pub professional_performance: Vec<ProfessionalPerformance>,
    pub period: ReportPeriod,
}

/// Blank parameters count as absent
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse an optional `YYYY-MM-DD` query parameter
pub fn parse_date_param(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    non_empty(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                AppError::validation(format!("Invalid {} format. Use YYYY-MM-DD.", name))
            })
        })
        .transpose()
}

/// Parse an optional UUID query parameter
pub fn parse_uuid_param(name: &str, value: Option<&str>) -> Result<Option<Uuid>> {
    non_empty(value)
        .map(|raw| {
            Uuid::parse_str(raw)
                .map_err(|_| AppError::validation(format!("Invalid {}. Expected a UUID.", name)))
        })
        .transpose()
}

/// Missing, non-numeric and non-positive limits fall back to the default
pub fn parse_limit(value: Option<&str>) -> usize {
    non_empty(value)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .and_then(|limit| usize::try_from(limit).ok())
        .unwrap_or(DEFAULT_TOP_SERVICES_LIMIT)
}

/// GET /reports/completed-services
pub async fn completed_services(
    service: web::Data<ReportService>,
    query: web::Query<CompletedServicesQuery>,
) -> Result<HttpResponse> {
    let filter = query.parse()?;
    service.validate_filter(&filter).await?;

    let report = service.completed_services_report(&filter).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/performance-metrics
pub async fn performance_metrics(
    service: web::Data<ReportService>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse> {
    let range = query.parse()?;
    service.validate_date_range(&range)?;

    let metrics = service.performance_metrics(&range).await?;
    Ok(HttpResponse::Ok().json(metrics))
}

/// GET /reports/top-services
pub async fn top_services(
    service: web::Data<ReportService>,
    query: web::Query<TopServicesQuery>,
) -> Result<HttpResponse> {
    let range = DateRange::new(
        parse_date_param("start_date", query.start_date.as_deref())?,
        parse_date_param("end_date", query.end_date.as_deref())?,
    );
    service.validate_date_range(&range)?;
    let limit = parse_limit(query.limit.as_deref());

    let top_services = service.top_services(&range, limit).await?;
    Ok(HttpResponse::Ok().json(TopServicesResponse {
        top_services,
        limit,
        period: ReportPeriod::from(range),
    }))
}

/// GET /reports/professional-performance
pub async fn professional_performance(
    service: web::Data<ReportService>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse> {
    let range = query.parse()?;
    service.validate_date_range(&range)?;

    let professional_performance = service.professional_performance(&range).await?;
    Ok(HttpResponse::Ok().json(ProfessionalPerformanceResponse {
        professional_performance,
        period: ReportPeriod::from(range),
    }))
}

/// GET /reports/quick-stats
pub async fn quick_stats(
    service: web::Data<ReportService>,
    clock: web::Data<SalonClock>,
) -> Result<HttpResponse> {
    let stats = service.quick_stats(clock.today()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// GET /dashboard/stats
pub async fn dashboard_stats(
    service: web::Data<ReportService>,
    clock: web::Data<SalonClock>,
) -> Result<HttpResponse> {
    let stats = service.dashboard_stats(clock.today()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Configure routes for the reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/completed-services", web::get().to(completed_services))
            .route("/performance-metrics", web::get().to(performance_metrics))
            .route("/top-services", web::get().to(top_services))
            .route(
                "/professional-performance",
                web::get().to(professional_performance),
            )
            .route("/quick-stats", web::get().to(quick_stats)),
    )
    .service(web::scope("/dashboard").route("/stats", web::get().to(dashboard_stats)));
}
