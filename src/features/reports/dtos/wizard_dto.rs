use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{
    IssueType, ReportDraft, ReportSeverity, WizardSession, WizardStep,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct WizardSessionDto {
    pub id: Uuid,
    pub step: WizardStep,
    pub draft: ReportDraft,
    pub submitted_reference: Option<String>,
}

impl From<WizardSession> for WizardSessionDto {
    fn from(session: WizardSession) -> Self {
        Self {
            id: session.id,
            step: session.step,
            draft: session.draft,
            submitted_reference: session.submitted_reference,
        }
    }
}

/// Details step payload. All three fields must be present for the
/// wizard to advance.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WizardDetailsDto {
    pub issue_type: Option<IssueType>,
    pub severity: Option<ReportSeverity>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WizardLocationDto {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
}

/// Confirmation payload returned once a draft becomes a report
#[derive(Debug, Serialize, ToSchema)]
pub struct WizardConfirmationDto {
    pub report_id: i64,
    pub reference: String,
}
