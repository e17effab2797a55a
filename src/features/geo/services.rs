use async_trait::async_trait;

use crate::core::config::SimulationConfig;
use crate::core::error::{AppError, Result};
use crate::features::geo::models::Coordinates;

/// Seam for device geolocation. The demo returns a fixed position;
/// a disabled provider models the browser denying the permission prompt.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinates>;
}

pub struct FixedLocationProvider {
    enabled: bool,
    coordinates: Coordinates,
}

impl FixedLocationProvider {
    pub fn new(enabled: bool, coordinates: Coordinates) -> Self {
        Self {
            enabled,
            coordinates,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.location_enabled,
            Coordinates::new(config.location_lat, config.location_lng),
        )
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Result<Coordinates> {
        if !self.enabled {
            return Err(AppError::LocationUnavailable(
                "Could not get your location. Please enter manually.".to_string(),
            ));
        }
        Ok(self.coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enabled_provider_returns_the_fixed_position() {
        let provider = FixedLocationProvider::new(true, Coordinates::new(40.7128, -74.0060));
        let coords = provider.current_location().await.unwrap();
        assert_eq!(coords, Coordinates::new(40.7128, -74.0060));
    }

    #[tokio::test]
    async fn disabled_provider_reports_unavailable() {
        let provider = FixedLocationProvider::new(false, Coordinates::new(0.0, 0.0));
        let result = provider.current_location().await;
        assert!(matches!(result, Err(AppError::LocationUnavailable(_))));
    }
}
