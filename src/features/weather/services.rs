use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::weather::models::WeatherReport;

/// Seam for the weather backend. The demo serves a fixed record;
/// a real OpenWeatherMap client plugs in behind the same trait.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReport>;
}

/// Always reports the same light-rain conditions
pub struct MockWeatherProvider;

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReport> {
        tracing::debug!("Serving mock weather for {:.4}, {:.4}", latitude, longitude);
        Ok(WeatherReport::new(24.0, "Light rain", 78, 12.0, 15))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::weather::models::FloodRisk;

    #[tokio::test]
    async fn mock_provider_serves_the_fixed_record() {
        let report = MockWeatherProvider
            .current(40.7128, -74.0060)
            .await
            .unwrap();
        assert_eq!(report.temp_c, 24.0);
        assert_eq!(report.description, "Light rain");
        assert_eq!(report.humidity_pct, 78);
        assert_eq!(report.precipitation_pct, 15);
        assert_eq!(report.flood_risk, FloodRisk::Medium);
    }
}
