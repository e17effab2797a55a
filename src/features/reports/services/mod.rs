mod report_service;
mod wizard_service;

pub use report_service::ReportService;
pub use wizard_service::WizardService;
