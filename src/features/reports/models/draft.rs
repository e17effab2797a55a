use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::analysis::models::AnalysisResult;
use crate::features::reports::models::{IssueType, ReportSeverity};

/// Linear steps of the report submission wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Details,
    PhotoLocation,
    Confirmation,
}

/// An uploaded image attached to a draft, with its analysis once available
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageRef {
    pub display_url: String,
    pub analysis: Option<AnalysisResult>,
}

impl ImageRef {
    pub fn new(display_url: String) -> Self {
        Self {
            display_url,
            analysis: None,
        }
    }

    /// Records the analysis result. Returns false if one was already set;
    /// an attached image is analyzed at most once.
    pub fn set_analysis(&mut self, analysis: AnalysisResult) -> bool {
        if self.analysis.is_some() {
            return false;
        }
        self.analysis = Some(analysis);
        true
    }
}

/// The in-progress report a wizard session is building
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReportDraft {
    pub issue_type: Option<IssueType>,
    pub severity: Option<ReportSeverity>,
    pub description: String,
    pub location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub material_estimate: Option<String>,
    pub images: Vec<ImageRef>,
}

impl ReportDraft {
    /// The details step is complete when type, severity and description
    /// are all present.
    pub fn details_complete(&self) -> bool {
        self.issue_type.is_some()
            && self.severity.is_some()
            && !self.description.trim().is_empty()
    }

    pub fn has_uploaded_image(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn has_location(&self) -> bool {
        !self.location_text.trim().is_empty()
    }

    /// Attaches an analyzed image and folds its analysis into the draft.
    /// Severity is only taken from the analysis when the reporter has not
    /// chosen one already.
    pub fn attach_analyzed_image(&mut self, display_url: String, analysis: AnalysisResult) {
        if self.severity.is_none() {
            self.severity = Some(analysis.severity);
        }
        self.material_estimate = Some(analysis.material_estimate());
        let mut image = ImageRef::new(display_url);
        image.set_analysis(analysis);
        self.images.push(image);
    }
}

/// One wizard session; sessions are independent of each other
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WizardSession {
    pub id: Uuid,
    pub step: WizardStep,
    pub draft: ReportDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once the draft has been submitted as a report
    pub submitted_reference: Option<String>,
}

impl WizardSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            step: WizardStep::Details,
            draft: ReportDraft::default(),
            created_at: now,
            updated_at: now,
            submitted_reference: None,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::analysis::models::AnalysisResult;

    fn sample_analysis(severity: ReportSeverity) -> AnalysisResult {
        AnalysisResult {
            area_m2: 0.8,
            depth_m: 0.05,
            asphalt_estimate: "8 kg".to_string(),
            cement_estimate: "2 bags".to_string(),
            severity,
        }
    }

    #[test]
    fn analysis_is_set_at_most_once() {
        let mut image = ImageRef::new("https://storage.example/one.jpg".to_string());
        assert!(image.set_analysis(sample_analysis(ReportSeverity::Medium)));
        assert!(!image.set_analysis(sample_analysis(ReportSeverity::High)));
        assert_eq!(
            image.analysis.as_ref().map(|a| a.severity),
            Some(ReportSeverity::Medium)
        );
    }

    #[test]
    fn analysis_severity_fills_unset_draft_severity() {
        let mut draft = ReportDraft::default();
        draft.attach_analyzed_image(
            "https://storage.example/one.jpg".to_string(),
            sample_analysis(ReportSeverity::High),
        );
        assert_eq!(draft.severity, Some(ReportSeverity::High));
    }

    #[test]
    fn analysis_severity_never_overrides_chosen_severity() {
        let mut draft = ReportDraft {
            severity: Some(ReportSeverity::Low),
            ..Default::default()
        };
        draft.attach_analyzed_image(
            "https://storage.example/one.jpg".to_string(),
            sample_analysis(ReportSeverity::Critical),
        );
        assert_eq!(draft.severity, Some(ReportSeverity::Low));
    }

    #[test]
    fn details_complete_requires_all_three_fields() {
        let mut draft = ReportDraft::default();
        assert!(!draft.details_complete());
        draft.issue_type = Some(IssueType::Pothole);
        draft.severity = Some(ReportSeverity::Medium);
        draft.description = "   ".to_string();
        assert!(!draft.details_complete());
        draft.description = "Large pothole near the crossing".to_string();
        assert!(draft.details_complete());
    }
}
