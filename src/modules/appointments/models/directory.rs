use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Salon professional, referenced by reports for labels and filter checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

impl Professional {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
        }
    }
}

/// A service offered by the salon, with its list price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: Uuid,
    pub name: String,
    pub base_price: Decimal,
    pub duration_minutes: u32,
    pub is_active: bool,
}

impl ServiceType {
    pub fn new(name: impl Into<String>, base_price: Decimal, duration_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            base_price,
            duration_minutes,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
        }
    }
}

/// Reference tables that can be counted by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryEntity {
    Clients,
    Professionals,
    ServiceTypes,
}

impl DirectoryEntity {
    pub fn table_name(&self) -> &'static str {
        match self {
            DirectoryEntity::Clients => "clients",
            DirectoryEntity::Professionals => "professionals",
            DirectoryEntity::ServiceTypes => "service_types",
        }
    }
}
