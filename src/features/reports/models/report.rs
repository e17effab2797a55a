use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Issue categories a citizen can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Pothole,
    Waterlogged,
    Sewage,
    BlockedDrain,
    RoadDamage,
}

impl IssueType {
    /// Human-readable label shown on the dashboard and map popups
    pub fn label(&self) -> &'static str {
        match self {
            IssueType::Pothole => "Pothole",
            IssueType::Waterlogged => "Waterlogged Area",
            IssueType::Sewage => "Sewage Overflow",
            IssueType::BlockedDrain => "Blocked Drain",
            IssueType::RoadDamage => "Road Damage",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportSeverity {
    /// Map pin color used by the dashboard map
    pub fn marker_color(severity: Option<ReportSeverity>) -> &'static str {
        match severity {
            Some(ReportSeverity::High) | Some(ReportSeverity::Critical) => "#ef4444",
            Some(ReportSeverity::Medium) => "#f59e0b",
            Some(ReportSeverity::Low) => "#10b981",
            None => "#6b7280",
        }
    }
}

impl std::fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportSeverity::Low => write!(f, "low"),
            ReportSeverity::Medium => write!(f, "medium"),
            ReportSeverity::High => write!(f, "high"),
            ReportSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// A submitted issue report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub id: i64,
    /// Public reference in the form IR-YYYY-NNNNNN
    pub reference: String,
    pub issue_type: IssueType,
    pub description: String,
    pub location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ReportStatus,
    pub severity: Option<ReportSeverity>,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub material_estimate: Option<String>,
    pub estimated_cost: Option<String>,
    pub image_urls: Vec<String>,
}

impl Report {
    pub fn marker_color(&self) -> &'static str {
        ReportSeverity::marker_color(self.severity)
    }

    /// Parses a "$1,200" style cost string into its numeric value
    pub fn cost_value(&self) -> Option<f64> {
        let raw = self.estimated_cost.as_ref()?;
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        cleaned.parse().ok()
    }
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub issue_type: IssueType,
    pub description: String,
    pub location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub severity: Option<ReportSeverity>,
    pub reported_by: String,
    pub material_estimate: Option<String>,
    pub estimated_cost: Option<String>,
    pub image_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering_ranks_critical_highest() {
        assert!(ReportSeverity::Critical > ReportSeverity::High);
        assert!(ReportSeverity::High > ReportSeverity::Medium);
        assert!(ReportSeverity::Medium > ReportSeverity::Low);
    }

    #[test]
    fn marker_color_follows_severity() {
        assert_eq!(
            ReportSeverity::marker_color(Some(ReportSeverity::Critical)),
            "#ef4444"
        );
        assert_eq!(
            ReportSeverity::marker_color(Some(ReportSeverity::High)),
            "#ef4444"
        );
        assert_eq!(
            ReportSeverity::marker_color(Some(ReportSeverity::Medium)),
            "#f59e0b"
        );
        assert_eq!(
            ReportSeverity::marker_color(Some(ReportSeverity::Low)),
            "#10b981"
        );
        assert_eq!(ReportSeverity::marker_color(None), "#6b7280");
    }

    #[test]
    fn issue_type_labels_match_display() {
        assert_eq!(IssueType::Waterlogged.label(), "Waterlogged Area");
        assert_eq!(IssueType::Sewage.to_string(), "Sewage Overflow");
    }

    #[test]
    fn cost_value_strips_currency_formatting() {
        let mut report = Report {
            id: 1,
            reference: "IR-2024-000001".to_string(),
            issue_type: IssueType::Pothole,
            description: String::new(),
            location_text: "Main St".to_string(),
            latitude: None,
            longitude: None,
            status: ReportStatus::Pending,
            severity: None,
            reported_by: "John Doe".to_string(),
            reported_at: Utc::now(),
            material_estimate: None,
            estimated_cost: Some("$1,200".to_string()),
            image_urls: vec![],
        };
        assert_eq!(report.cost_value(), Some(1200.0));
        report.estimated_cost = None;
        assert_eq!(report.cost_value(), None);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&IssueType::BlockedDrain).unwrap();
        assert_eq!(json, "\"blocked_drain\"");
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
