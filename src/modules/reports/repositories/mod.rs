pub mod in_memory;
pub mod report_repository;

pub use in_memory::InMemoryReportStore;
pub use report_repository::{MySqlReportStore, ReportStore};
