use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::{DashboardMapDto, DashboardSummaryDto};
use crate::features::geo::models::Coordinates;
use crate::features::reports::dtos::ReportFilterQuery;
use crate::features::reports::services::ReportService;
use crate::features::weather::services::WeatherProvider;

/// Admin projections over the report collection. Pure reads.
pub struct DashboardService {
    reports: Arc<ReportService>,
    weather: Arc<dyn WeatherProvider>,
    city_center: Coordinates,
}

impl DashboardService {
    pub fn new(
        reports: Arc<ReportService>,
        weather: Arc<dyn WeatherProvider>,
        city_center: Coordinates,
    ) -> Self {
        Self {
            reports,
            weather,
            city_center,
        }
    }

    /// Counts, recent reports and the weather panel record
    pub async fn summary(&self) -> Result<DashboardSummaryDto> {
        let stats = self.reports.stats().await;

        let mut reports = self.reports.list(&ReportFilterQuery::default()).await;
        reports.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
        let recent_reports = reports.into_iter().map(Into::into).collect();

        let weather = self
            .weather
            .current(self.city_center.latitude, self.city_center.longitude)
            .await?;

        Ok(DashboardSummaryDto {
            stats,
            recent_reports,
            weather,
        })
    }

    /// Map pins plus the weather overlay record
    pub async fn map(&self, filter: &ReportFilterQuery) -> Result<DashboardMapDto> {
        let markers = self.reports.map_markers(filter).await;
        let weather = self
            .weather
            .current(self.city_center.latitude, self.city_center.longitude)
            .await?;

        Ok(DashboardMapDto { markers, weather })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::weather::services::MockWeatherProvider;

    fn service() -> DashboardService {
        DashboardService::new(
            Arc::new(ReportService::seeded()),
            Arc::new(MockWeatherProvider),
            Coordinates::new(40.7128, -74.0060),
        )
    }

    #[tokio::test]
    async fn summary_combines_stats_reports_and_weather() {
        let summary = service().summary().await.unwrap();
        assert_eq!(summary.stats.total, 4);
        assert_eq!(summary.recent_reports.len(), 4);
        assert_eq!(summary.weather.description, "Light rain");

        // Most recent first
        assert_eq!(summary.recent_reports[0].id, 4);
        assert_eq!(summary.recent_reports[3].id, 2);
    }

    #[tokio::test]
    async fn map_applies_the_report_filter() {
        let map = service()
            .map(&ReportFilterQuery {
                issue_type: Some("pothole".to_string()),
                severity: None,
            })
            .await
            .unwrap();
        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].issue_type_label, "Pothole");
    }
}
