use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::appointments::{AppointmentStatus, DirectoryEntity};
use crate::modules::reports::models::{AggregateQuery, AggregateRow, GroupBy, GroupKey};

/// Read-only access to the appointment store for report aggregation
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Count and sum the appointments matching `query`, one row per group.
    ///
    /// `GroupBy::Total` always yields exactly one row, zeroed when nothing
    /// matches. Row order is unspecified.
    async fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateRow>>;

    async fn professional_exists(&self, id: Uuid) -> Result<bool>;

    async fn service_type_exists(&self, id: Uuid) -> Result<bool>;

    /// Number of active rows in a reference table
    async fn count_active(&self, entity: DirectoryEntity) -> Result<i64>;

    /// Connectivity check for readiness probes
    async fn ping(&self) -> Result<()>;
}

/// MySQL-backed store running grouped aggregations in the database
#[derive(Clone)]
pub struct MySqlReportStore {
    pool: MySqlPool,
}

impl MySqlReportStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, table: &'static str, id: Uuid) -> Result<bool> {
        let mut query = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM ");
        query.push(table).push(" WHERE id = ").push_bind(id.to_string());

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl ReportStore for MySqlReportStore {
    async fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateRow>> {
        let mut sql = build_aggregate_query(query);
        let rows = sql.build().fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| decode_aggregate_row(query.group_by, row))
            .collect()
    }

    async fn professional_exists(&self, id: Uuid) -> Result<bool> {
        self.exists(DirectoryEntity::Professionals.table_name(), id).await
    }

    async fn service_type_exists(&self, id: Uuid) -> Result<bool> {
        self.exists(DirectoryEntity::ServiceTypes.table_name(), id).await
    }

    async fn count_active(&self, entity: DirectoryEntity) -> Result<i64> {
        let mut query = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM ");
        query.push(entity.table_name()).push(" WHERE is_active = TRUE");

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Build the grouped aggregation over `appointments` for `query`
pub(crate) fn build_aggregate_query(query: &AggregateQuery) -> QueryBuilder<'static, MySql> {
    let mut sql = QueryBuilder::<MySql>::new("SELECT ");

    match query.group_by {
        GroupBy::Total => {}
        GroupBy::ServiceType => {
            sql.push("st.id AS group_id, st.name AS group_name, st.base_price AS group_base_price, ");
        }
        GroupBy::Professional => {
            sql.push("p.id AS group_id, p.name AS group_name, ");
        }
        GroupBy::Day => {
            sql.push("a.scheduled_date AS group_day, ");
        }
        GroupBy::Status => {
            sql.push("a.status AS group_status, ");
        }
    }

    sql.push(
        "COUNT(a.id) AS appointment_count, \
         COALESCE(SUM(a.price), 0) AS revenue, \
         CAST(COALESCE(SUM(a.duration_minutes), 0) AS SIGNED) AS duration_minutes \
         FROM appointments a",
    );

    match query.group_by {
        GroupBy::ServiceType => {
            sql.push(" JOIN service_types st ON st.id = a.service_type_id");
        }
        GroupBy::Professional => {
            sql.push(" JOIN professionals p ON p.id = a.professional_id");
        }
        GroupBy::Total | GroupBy::Day | GroupBy::Status => {}
    }

    sql.push(" WHERE 1 = 1");

    if let Some(status) = query.status {
        sql.push(" AND a.status = ").push_bind(status.as_str());
    }
    if let Some(start_date) = query.filter.range.start_date {
        sql.push(" AND a.scheduled_date >= ").push_bind(start_date);
    }
    if let Some(end_date) = query.filter.range.end_date {
        sql.push(" AND a.scheduled_date <= ").push_bind(end_date);
    }
    if let Some(professional_id) = query.filter.professional_id {
        sql.push(" AND a.professional_id = ")
            .push_bind(professional_id.to_string());
    }
    if let Some(service_type_id) = query.filter.service_type_id {
        sql.push(" AND a.service_type_id = ")
            .push_bind(service_type_id.to_string());
    }

    match query.group_by {
        GroupBy::Total => {}
        GroupBy::ServiceType => {
            sql.push(" GROUP BY st.id, st.name, st.base_price");
        }
        GroupBy::Professional => {
            sql.push(" GROUP BY p.id, p.name");
        }
        GroupBy::Day => {
            sql.push(" GROUP BY a.scheduled_date");
        }
        GroupBy::Status => {
            sql.push(" GROUP BY a.status");
        }
    }

    sql
}

fn decode_aggregate_row(group_by: GroupBy, row: &MySqlRow) -> Result<AggregateRow> {
    let key = match group_by {
        GroupBy::Total => GroupKey::Total,
        GroupBy::ServiceType => GroupKey::ServiceType {
            id: parse_uuid(row.try_get("group_id")?)?,
            name: row.try_get("group_name")?,
            base_price: row.try_get::<Decimal, _>("group_base_price")?,
        },
        GroupBy::Professional => GroupKey::Professional {
            id: parse_uuid(row.try_get("group_id")?)?,
            name: row.try_get("group_name")?,
        },
        GroupBy::Day => GroupKey::Day(row.try_get::<NaiveDate, _>("group_day")?),
        GroupBy::Status => {
            let status: String = row.try_get("group_status")?;
            GroupKey::Status(status.parse::<AppointmentStatus>().map_err(|_| {
                AppError::internal(format!("Unknown appointment status in store: {}", status))
            })?)
        }
    };

    Ok(AggregateRow {
        key,
        count: row.try_get("appointment_count")?,
        revenue: row.try_get("revenue")?,
        duration_minutes: row.try_get("duration_minutes")?,
    })
}

fn parse_uuid(value: String) -> Result<Uuid> {
    Uuid::parse_str(&value)
        .map_err(|e| AppError::internal(format!("Malformed id '{}' in store: {}", value, e)))
}
