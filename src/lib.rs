//! Salon scheduling backend: appointment reporting and dashboard aggregates.
//!
//! The report engine ([`modules::reports::ReportService`]) runs grouped
//! aggregations over the appointment store and reshapes them into JSON
//! summaries served under `/api`.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::appointments;
pub use modules::reports;
