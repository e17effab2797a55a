pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::{IssueType, Report, ReportSeverity, ReportStatus};
pub use services::{ReportService, WizardService};
