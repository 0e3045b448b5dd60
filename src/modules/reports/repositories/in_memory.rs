use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::appointments::{
    Appointment, Client, DirectoryEntity, Professional, ServiceType,
};
use crate::modules::reports::models::{AggregateQuery, AggregateRow, GroupBy, GroupKey};

use super::report_repository::ReportStore;

#[derive(Debug, Default)]
struct SalonData {
    clients: HashMap<Uuid, Client>,
    professionals: HashMap<Uuid, Professional>,
    service_types: HashMap<Uuid, ServiceType>,
    appointments: Vec<Appointment>,
}

/// Process-local store with the same constraints as the MySQL schema.
///
/// Used by tests and local demos; aggregation folds rows in memory instead
/// of issuing GROUP BY queries.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    data: RwLock<SalonData>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SalonData>> {
        self.data
            .read()
            .map_err(|_| AppError::internal("In-memory report store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SalonData>> {
        self.data
            .write()
            .map_err(|_| AppError::internal("In-memory report store lock poisoned"))
    }

    pub fn add_client(&self, client: Client) -> Result<()> {
        self.write()?.clients.insert(client.id, client);
        Ok(())
    }

    pub fn add_professional(&self, professional: Professional) -> Result<()> {
        self.write()?
            .professionals
            .insert(professional.id, professional);
        Ok(())
    }

    pub fn add_service_type(&self, service_type: ServiceType) -> Result<()> {
        self.write()?
            .service_types
            .insert(service_type.id, service_type);
        Ok(())
    }

    /// Insert an appointment, enforcing column checks, foreign keys and the
    /// one-appointment-per-professional-slot key
    pub fn insert_appointment(&self, appointment: Appointment) -> Result<()> {
        appointment.validate()?;

        let mut data = self.write()?;

        if !data.clients.contains_key(&appointment.client_id) {
            return Err(AppError::validation(format!(
                "Unknown client {}",
                appointment.client_id
            )));
        }
        if !data.professionals.contains_key(&appointment.professional_id) {
            return Err(AppError::validation(format!(
                "Unknown professional {}",
                appointment.professional_id
            )));
        }
        if !data.service_types.contains_key(&appointment.service_type_id) {
            return Err(AppError::validation(format!(
                "Unknown service type {}",
                appointment.service_type_id
            )));
        }

        let slot = appointment.slot();
        if data.appointments.iter().any(|existing| existing.slot() == slot) {
            return Err(AppError::validation(format!(
                "Professional {} is already booked on {} at {}",
                slot.0, slot.1, slot.2
            )));
        }

        data.appointments.push(appointment);
        Ok(())
    }

    pub fn appointment_count(&self) -> Result<usize> {
        Ok(self.read()?.appointments.len())
    }
}

/// Group key for one appointment, `None` when the joined row is missing
fn group_key(data: &SalonData, group_by: GroupBy, appointment: &Appointment) -> Option<GroupKey> {
    match group_by {
        GroupBy::Total => Some(GroupKey::Total),
        GroupBy::ServiceType => data
            .service_types
            .get(&appointment.service_type_id)
            .map(|service_type| GroupKey::ServiceType {
                id: service_type.id,
                name: service_type.name.clone(),
                base_price: service_type.base_price,
            }),
        GroupBy::Professional => data
            .professionals
            .get(&appointment.professional_id)
            .map(|professional| GroupKey::Professional {
                id: professional.id,
                name: professional.name.clone(),
            }),
        GroupBy::Day => Some(GroupKey::Day(appointment.scheduled_date)),
        GroupBy::Status => Some(GroupKey::Status(appointment.status)),
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateRow>> {
        let data = self.read()?;
        let mut groups: BTreeMap<GroupKey, AggregateRow> = BTreeMap::new();

        if query.group_by == GroupBy::Total {
            groups.insert(GroupKey::Total, AggregateRow::empty(GroupKey::Total));
        }

        for appointment in data.appointments.iter().filter(|a| query.matches(a)) {
            let Some(key) = group_key(&data, query.group_by, appointment) else {
                continue;
            };
            groups
                .entry(key.clone())
                .or_insert_with(|| AggregateRow::empty(key))
                .add(appointment);
        }

        Ok(groups.into_values().collect())
    }

    async fn professional_exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.read()?.professionals.contains_key(&id))
    }

    async fn service_type_exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.read()?.service_types.contains_key(&id))
    }

    async fn count_active(&self, entity: DirectoryEntity) -> Result<i64> {
        let data = self.read()?;
        let active = match entity {
            DirectoryEntity::Clients => data.clients.values().filter(|c| c.is_active).count(),
            DirectoryEntity::Professionals => {
                data.professionals.values().filter(|p| p.is_active).count()
            }
            DirectoryEntity::ServiceTypes => {
                data.service_types.values().filter(|s| s.is_active).count()
            }
        };
        Ok(active as i64)
    }

    async fn ping(&self) -> Result<()> {
        self.read().map(|_| ())
    }
}
