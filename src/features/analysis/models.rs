use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{IssueType, ReportSeverity};

/// Result of analyzing a damage photo. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    /// Damaged surface area in square meters
    pub area_m2: f64,
    /// Estimated depth in meters
    pub depth_m: f64,
    pub asphalt_estimate: String,
    pub cement_estimate: String,
    pub severity: ReportSeverity,
}

impl AnalysisResult {
    /// Renders the material estimate in the dashboard's format,
    /// e.g. "8 kg asphalt, 2 bags cement".
    pub fn material_estimate(&self) -> String {
        format!(
            "{} asphalt, {} cement",
            self.asphalt_estimate, self.cement_estimate
        )
    }
}

/// Canned material guidance shown per issue category before any photo
/// has been analyzed.
pub fn material_guidance(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Pothole => {
            "Estimated materials: 15kg asphalt mix, 2 bags cement, 0.5m³ aggregate"
        }
        IssueType::Waterlogged => "Estimated solution: Drainage pipe cleaning, 3 drain covers",
        IssueType::Sewage => "Emergency response required: Professional cleaning crew",
        IssueType::BlockedDrain | IssueType::RoadDamage => {
            "Material estimate will be calculated by municipal engineers"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_estimate_matches_dashboard_format() {
        let result = AnalysisResult {
            area_m2: 0.8,
            depth_m: 0.05,
            asphalt_estimate: "8 kg".to_string(),
            cement_estimate: "2 bags".to_string(),
            severity: ReportSeverity::Medium,
        };
        assert_eq!(result.material_estimate(), "8 kg asphalt, 2 bags cement");
    }

    #[test]
    fn guidance_covers_every_issue_type() {
        assert!(material_guidance(IssueType::Pothole).contains("asphalt"));
        assert!(material_guidance(IssueType::Waterlogged).contains("Drainage"));
        assert!(material_guidance(IssueType::Sewage).contains("Emergency"));
        assert!(material_guidance(IssueType::BlockedDrain).contains("municipal engineers"));
        assert!(material_guidance(IssueType::RoadDamage).contains("municipal engineers"));
    }
}
