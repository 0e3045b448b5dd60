pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use repositories::{InMemoryReportStore, MySqlReportStore, ReportStore};
pub use services::ReportService;
