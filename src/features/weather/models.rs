use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flood risk band shown on the dashboard weather panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FloodRisk {
    Low,
    Medium,
    High,
}

impl FloodRisk {
    /// Derived from rain chance; a 20% chance reads as medium risk.
    pub fn from_precipitation(precipitation_pct: u8) -> Self {
        match precipitation_pct {
            0..=9 => FloodRisk::Low,
            10..=39 => FloodRisk::Medium,
            _ => FloodRisk::High,
        }
    }
}

impl std::fmt::Display for FloodRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloodRisk::Low => write!(f, "Low"),
            FloodRisk::Medium => write!(f, "Medium"),
            FloodRisk::High => write!(f, "High"),
        }
    }
}

/// Current conditions for a map position
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeatherReport {
    pub temp_c: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub precipitation_pct: u8,
    pub flood_risk: FloodRisk,
}

impl WeatherReport {
    pub fn new(
        temp_c: f64,
        description: impl Into<String>,
        humidity_pct: u8,
        wind_speed: f64,
        precipitation_pct: u8,
    ) -> Self {
        Self {
            temp_c,
            description: description.into(),
            humidity_pct,
            wind_speed,
            precipitation_pct,
            flood_risk: FloodRisk::from_precipitation(precipitation_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flood_risk_bands() {
        assert_eq!(FloodRisk::from_precipitation(0), FloodRisk::Low);
        assert_eq!(FloodRisk::from_precipitation(9), FloodRisk::Low);
        assert_eq!(FloodRisk::from_precipitation(15), FloodRisk::Medium);
        assert_eq!(FloodRisk::from_precipitation(20), FloodRisk::Medium);
        assert_eq!(FloodRisk::from_precipitation(40), FloodRisk::High);
        assert_eq!(FloodRisk::from_precipitation(100), FloodRisk::High);
    }

    #[test]
    fn report_derives_risk_from_precipitation() {
        let report = WeatherReport::new(24.0, "Light rain", 78, 12.0, 15);
        assert_eq!(report.flood_risk, FloodRisk::Medium);
    }
}
