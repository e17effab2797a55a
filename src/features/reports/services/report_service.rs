use chrono::{TimeZone, Utc};
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    MapMarkerDto, ReportFilterQuery, ReportStatsDto, UpdateReportDto,
};
use crate::features::reports::models::{
    IssueType, NewReport, Report, ReportSeverity, ReportStatus,
};

struct ReportStore {
    reports: Vec<Report>,
    next_id: i64,
    next_ref_seq: i64,
}

/// In-memory report collection
pub struct ReportService {
    store: RwLock<ReportStore>,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(ReportStore {
                reports: Vec::new(),
                next_id: 1,
                next_ref_seq: 1,
            }),
        }
    }

    /// Collection pre-loaded with the demo city's reports
    pub fn seeded() -> Self {
        let reports = seed_reports();
        let next_id = reports.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let next_ref_seq = reports.len() as i64 + 1;
        Self {
            store: RwLock::new(ReportStore {
                reports,
                next_id,
                next_ref_seq,
            }),
        }
    }

    /// Reference format: IR-YYYY-NNNNNN
    fn generate_reference(store: &mut ReportStore) -> String {
        let year = Utc::now().format("%Y").to_string();
        let seq = store.next_ref_seq;
        store.next_ref_seq += 1;
        format!("IR-{}-{:06}", year, seq)
    }

    pub async fn list(&self, filter: &ReportFilterQuery) -> Vec<Report> {
        let store = self.store.read().await;
        store
            .reports
            .iter()
            .filter(|r| matches_filter(r, filter))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<Report> {
        let store = self.store.read().await;
        store
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Appends a report in one atomic step; id and reference are
    /// assigned under the same lock.
    pub async fn create(&self, data: NewReport) -> Result<Report> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;
        let reference = Self::generate_reference(&mut store);

        let report = Report {
            id,
            reference,
            issue_type: data.issue_type,
            description: data.description,
            location_text: data.location_text,
            latitude: data.latitude,
            longitude: data.longitude,
            status: ReportStatus::Pending,
            severity: data.severity,
            reported_by: data.reported_by,
            reported_at: Utc::now(),
            material_estimate: data.material_estimate,
            estimated_cost: data.estimated_cost,
            image_urls: data.image_urls,
        };

        store.reports.push(report.clone());
        tracing::info!("Created report {} ({})", report.id, report.reference);

        Ok(report)
    }

    pub async fn update(&self, id: i64, changes: &UpdateReportDto) -> Result<Report> {
        let mut store = self.store.write().await;
        let report = store
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        if let Some(status) = changes.status {
            report.status = status;
        }
        if let Some(severity) = changes.severity {
            report.severity = Some(severity);
        }
        if let Some(ref description) = changes.description {
            report.description = description.clone();
        }
        if let Some(ref location) = changes.location {
            report.location_text = location.clone();
        }
        if let Some(ref material) = changes.material_estimate {
            report.material_estimate = Some(material.clone());
        }
        if let Some(ref cost) = changes.estimated_cost {
            report.estimated_cost = Some(cost.clone());
        }

        Ok(report.clone())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut store = self.store.write().await;
        let before = store.reports.len();
        store.reports.retain(|r| r.id != id);
        if store.reports.len() == before {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }
        Ok(())
    }

    /// Pure projection over the collection
    pub async fn stats(&self) -> ReportStatsDto {
        let store = self.store.read().await;
        let reports = &store.reports;

        ReportStatsDto {
            total: reports.len(),
            pending: reports
                .iter()
                .filter(|r| r.status == ReportStatus::Pending)
                .count(),
            in_progress: reports
                .iter()
                .filter(|r| r.status == ReportStatus::InProgress)
                .count(),
            resolved: reports
                .iter()
                .filter(|r| r.status == ReportStatus::Resolved)
                .count(),
            high_severity: reports
                .iter()
                .filter(|r| {
                    matches!(
                        r.severity,
                        Some(ReportSeverity::High) | Some(ReportSeverity::Critical)
                    )
                })
                .count(),
            total_estimated_cost: reports.iter().filter_map(|r| r.cost_value()).sum(),
        }
    }

    /// Map pins for every filtered report that has coordinates
    pub async fn map_markers(&self, filter: &ReportFilterQuery) -> Vec<MapMarkerDto> {
        let store = self.store.read().await;
        store
            .reports
            .iter()
            .filter(|r| matches_filter(r, filter))
            .filter_map(|r| {
                let (latitude, longitude) = (r.latitude?, r.longitude?);
                Some(MapMarkerDto {
                    id: r.id,
                    reference: r.reference.clone(),
                    issue_type_label: r.issue_type.label().to_string(),
                    latitude,
                    longitude,
                    severity: r.severity,
                    color: r.marker_color().to_string(),
                    status: r.status,
                    description: r.description.clone(),
                })
            })
            .collect()
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(report: &Report, filter: &ReportFilterQuery) -> bool {
    let type_ok = match filter.issue_type.as_deref() {
        None => true,
        Some(t) if t.eq_ignore_ascii_case("all") => true,
        Some(t) => report
            .issue_type
            .label()
            .to_lowercase()
            .contains(&t.to_lowercase()),
    };

    let severity_ok = match filter.severity.as_deref() {
        None => true,
        Some(s) if s.eq_ignore_ascii_case("all") => true,
        Some(s) => report
            .severity
            .map(|sev| sev.to_string().eq_ignore_ascii_case(s))
            .unwrap_or(false),
    };

    type_ok && severity_ok
}

/// The four demo reports the dashboard starts with
fn seed_reports() -> Vec<Report> {
    vec![
        Report {
            id: 1,
            reference: "IR-2024-000001".to_string(),
            issue_type: IssueType::Pothole,
            description: "Large pothole blocking traffic lane".to_string(),
            location_text: "Main St & 5th Ave".to_string(),
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
            status: ReportStatus::InProgress,
            severity: Some(ReportSeverity::High),
            reported_by: "John Doe".to_string(),
            reported_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            material_estimate: Some("12 kg asphalt, 3 bags cement".to_string()),
            estimated_cost: Some("$450".to_string()),
            image_urls: vec![
                "https://images.unsplash.com/photo-1482881497185-d4a9ddbe4151".to_string(),
            ],
        },
        Report {
            id: 2,
            reference: "IR-2024-000002".to_string(),
            issue_type: IssueType::Waterlogged,
            description: "Standing water after rainfall".to_string(),
            location_text: "Park Avenue".to_string(),
            latitude: Some(40.7589),
            longitude: Some(-73.9851),
            status: ReportStatus::Resolved,
            severity: Some(ReportSeverity::Medium),
            reported_by: "Jane Smith".to_string(),
            reported_at: Utc.with_ymd_and_hms(2024, 1, 14, 14, 20, 0).unwrap(),
            material_estimate: Some("Drainage pipe cleaning".to_string()),
            estimated_cost: Some("$280".to_string()),
            image_urls: vec![
                "https://images.unsplash.com/photo-1433086966358-54859d0ed716".to_string(),
            ],
        },
        Report {
            id: 3,
            reference: "IR-2024-000003".to_string(),
            issue_type: IssueType::Sewage,
            description: "Sewage overflow onto the street".to_string(),
            location_text: "Elm Street".to_string(),
            latitude: Some(40.7505),
            longitude: Some(-73.9934),
            status: ReportStatus::Pending,
            severity: Some(ReportSeverity::High),
            reported_by: "Mike Johnson".to_string(),
            reported_at: Utc.with_ymd_and_hms(2024, 1, 16, 8, 45, 0).unwrap(),
            material_estimate: Some("Emergency response required".to_string()),
            estimated_cost: Some("$1,200".to_string()),
            image_urls: vec![
                "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07".to_string(),
            ],
        },
        Report {
            id: 4,
            reference: "IR-2024-000004".to_string(),
            issue_type: IssueType::BlockedDrain,
            description: "Drain blocked by debris".to_string(),
            location_text: "Broadway & 42nd".to_string(),
            latitude: Some(40.7580),
            longitude: Some(-73.9855),
            status: ReportStatus::InProgress,
            severity: Some(ReportSeverity::Medium),
            reported_by: "Sarah Wilson".to_string(),
            reported_at: Utc.with_ymd_and_hms(2024, 1, 17, 16, 15, 0).unwrap(),
            material_estimate: Some("Drain cleaning equipment".to_string()),
            estimated_cost: Some("$180".to_string()),
            image_urls: vec![
                "https://images.unsplash.com/photo-1426604966848-d7adac402bff".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(issue_type: Option<&str>, severity: Option<&str>) -> ReportFilterQuery {
        ReportFilterQuery {
            issue_type: issue_type.map(str::to_string),
            severity: severity.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn seeded_collection_has_the_four_demo_reports() {
        let service = ReportService::seeded();
        let reports = service.list(&ReportFilterQuery::default()).await;
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].location_text, "Main St & 5th Ave");
    }

    #[tokio::test]
    async fn seeded_stats_match_the_fixture() {
        let service = ReportService::seeded();
        let stats = service.stats().await;
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.high_severity, 2);
        assert_eq!(stats.total_estimated_cost, 2110.0);
        assert_eq!(stats.pending + stats.in_progress + stats.resolved, stats.total);
    }

    #[tokio::test]
    async fn type_filter_is_a_case_insensitive_substring_match() {
        let service = ReportService::seeded();
        let reports = service.list(&filter(Some("POTHOLE"), None)).await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].issue_type, IssueType::Pothole);

        // "water" matches "Waterlogged Area"
        let reports = service.list(&filter(Some("water"), None)).await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].issue_type, IssueType::Waterlogged);
    }

    #[tokio::test]
    async fn all_filter_is_the_identity() {
        let service = ReportService::seeded();
        let unfiltered = service.list(&ReportFilterQuery::default()).await;
        let all = service.list(&filter(Some("all"), Some("All"))).await;
        assert_eq!(all.len(), unfiltered.len());
    }

    #[tokio::test]
    async fn filtering_is_idempotent_and_preserves_order() {
        let service = ReportService::seeded();
        let once = service.list(&filter(None, Some("medium"))).await;
        let twice = service.list(&filter(None, Some("medium"))).await;
        let ids_once: Vec<_> = once.iter().map(|r| r.id).collect();
        let ids_twice: Vec<_> = twice.iter().map(|r| r.id).collect();
        assert_eq!(ids_once, ids_twice);
        assert_eq!(ids_once, vec![2, 4]);
    }

    #[tokio::test]
    async fn create_assigns_unique_ids_and_references() {
        let service = ReportService::seeded();
        let new_report = NewReport {
            issue_type: IssueType::RoadDamage,
            description: "Cracked surface".to_string(),
            location_text: "7th Ave".to_string(),
            latitude: None,
            longitude: None,
            severity: Some(ReportSeverity::Low),
            reported_by: "John Doe".to_string(),
            material_estimate: None,
            estimated_cost: None,
            image_urls: vec![],
        };
        let first = service.create(new_report.clone()).await.unwrap();
        let second = service.create(new_report).await.unwrap();

        assert_eq!(first.id, 5);
        assert_eq!(second.id, 6);
        assert_ne!(first.reference, second.reference);
        assert_eq!(first.status, ReportStatus::Pending);
    }

    #[tokio::test]
    async fn update_changes_only_the_given_fields() {
        let service = ReportService::seeded();
        let updated = service
            .update(
                3,
                &UpdateReportDto {
                    status: Some(ReportStatus::InProgress),
                    severity: None,
                    description: None,
                    location: None,
                    material_estimate: None,
                    estimated_cost: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ReportStatus::InProgress);
        assert_eq!(updated.severity, Some(ReportSeverity::High));
        assert_eq!(updated.location_text, "Elm Street");
    }

    #[tokio::test]
    async fn delete_removes_the_report() {
        let service = ReportService::seeded();
        service.delete(2).await.unwrap();
        assert!(matches!(
            service.get(2).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(2).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn markers_carry_severity_colors() {
        let service = ReportService::seeded();
        let markers = service.map_markers(&ReportFilterQuery::default()).await;
        assert_eq!(markers.len(), 4);

        let by_id = |id: i64| markers.iter().find(|m| m.id == id).unwrap();
        assert_eq!(by_id(1).color, "#ef4444");
        assert_eq!(by_id(2).color, "#f59e0b");
    }

    #[tokio::test]
    async fn markers_skip_reports_without_coordinates() {
        let service = ReportService::seeded();
        service
            .create(NewReport {
                issue_type: IssueType::Pothole,
                description: "No coordinates captured".to_string(),
                location_text: "Somewhere".to_string(),
                latitude: None,
                longitude: None,
                severity: None,
                reported_by: "John Doe".to_string(),
                material_estimate: None,
                estimated_cost: None,
                image_urls: vec![],
            })
            .await
            .unwrap();

        let markers = service.map_markers(&ReportFilterQuery::default()).await;
        assert_eq!(markers.len(), 4);
    }
}
