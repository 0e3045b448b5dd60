// Appointment rows are owned by the scheduling CRUD layer; this crate only
// reads them. The model mirrors the `appointments` table so the in-memory
// store can enforce the same constraints the database does.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

/// Appointment lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Every status, in lifecycle order
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// Value stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "in_progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            _ => Err(AppError::validation(format!(
                "Invalid appointment status: {}",
                s
            ))),
        }
    }
}

/// A booked service linking a client, a professional and a service type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub service_type_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub duration_minutes: u32,
    /// Charged price, two decimal places
    pub price: Decimal,
    pub status: AppointmentStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// New appointment in `scheduled` status
    pub fn new(
        client_id: Uuid,
        professional_id: Uuid,
        service_type_id: Uuid,
        scheduled_date: NaiveDate,
        scheduled_time: NaiveTime,
        duration_minutes: u32,
        price: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_id,
            professional_id,
            service_type_id,
            scheduled_date,
            scheduled_time,
            duration_minutes,
            price,
            status: AppointmentStatus::default(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    /// The double-booking key: one appointment per professional per slot
    pub fn slot(&self) -> (Uuid, NaiveDate, NaiveTime) {
        (self.professional_id, self.scheduled_date, self.scheduled_time)
    }

    /// Check the column constraints of the `appointments` table
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(AppError::validation(
                "Appointment duration must be a positive number of minutes",
            ));
        }

        if self.price < Decimal::ZERO {
            return Err(AppError::validation("Appointment price cannot be negative"));
        }

        if self.price.scale() > 2 {
            return Err(AppError::validation(format!(
                "Appointment price must have at most 2 decimal places, got {}",
                self.price
            )));
        }

        Ok(())
    }
}
