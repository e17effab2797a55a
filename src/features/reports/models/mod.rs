mod draft;
mod report;

pub use draft::{ImageRef, ReportDraft, WizardSession, WizardStep};
pub use report::{IssueType, NewReport, Report, ReportSeverity, ReportStatus};
