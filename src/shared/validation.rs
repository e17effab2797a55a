use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for a "lat, lng" coordinate pair as produced by the geolocation
    /// capture flow (decimal degrees, optional sign, comma separated)
    /// - Valid: "40.712800, -74.006000", "-6.2,106.8"
    /// - Invalid: "Main St & 5th Ave", "40.7128", "40,7128 -74"
    pub static ref COORDINATE_PAIR_REGEX: Regex =
        Regex::new(r"^\s*(-?\d{1,3}(?:\.\d+)?)\s*,\s*(-?\d{1,3}(?:\.\d+)?)\s*$").unwrap();
}

/// Parse a free-text location into coordinates if it is a coordinate pair.
/// Street addresses and landmarks return None and stay text-only.
pub fn parse_coordinate_pair(input: &str) -> Option<(f64, f64)> {
    let caps = COORDINATE_PAIR_REGEX.captures(input)?;
    let lat = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let lng = caps.get(2)?.as_str().parse::<f64>().ok()?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }
    Some((lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_pair_valid() {
        assert_eq!(
            parse_coordinate_pair("40.712800, -74.006000"),
            Some((40.7128, -74.006))
        );
        assert_eq!(parse_coordinate_pair("-6.2,106.8"), Some((-6.2, 106.8)));
        assert_eq!(parse_coordinate_pair(" 40.75 , -73.99 "), Some((40.75, -73.99)));
    }

    #[test]
    fn test_coordinate_pair_invalid() {
        assert_eq!(parse_coordinate_pair("Main St & 5th Ave"), None);
        assert_eq!(parse_coordinate_pair("40.7128"), None); // missing lng
        assert_eq!(parse_coordinate_pair(""), None);
        assert_eq!(parse_coordinate_pair("91.0, 0.0"), None); // out of range
        assert_eq!(parse_coordinate_pair("0.0, 181.0"), None);
    }
}
