pub mod models;

pub use models::{Appointment, AppointmentStatus, Client, DirectoryEntity, Professional, ServiceType};
