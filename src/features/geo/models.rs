use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A captured device position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Free-text form shown in the location field, "lat, lng" with
    /// six decimals.
    pub fn as_location_text(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_location_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_text_keeps_six_decimals() {
        let coords = Coordinates::new(40.7128, -74.0060);
        assert_eq!(coords.as_location_text(), "40.712800, -74.006000");
    }
}
