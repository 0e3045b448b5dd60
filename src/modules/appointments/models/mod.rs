pub mod appointment;
pub mod directory;

pub use appointment::{Appointment, AppointmentStatus};
pub use directory::{Client, DirectoryEntity, Professional, ServiceType};
