use crate::error::{CropSenseError, Result};
use serde::{Deserialize, Serialize};

/// WGS84 point. Immutable once resolved for a request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CropSenseError::InvalidInput("latitude".into()));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CropSenseError::InvalidInput("longitude".into()));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    Primary,
    Fallback,
    Caller,
    Default,
}

impl LocationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationSource::Primary => "ipapi.co",
            LocationSource::Fallback => "ip-api.com",
            LocationSource::Caller => "Caller Supplied",
            LocationSource::Default => "Built-in Default",
        }
    }
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationInfo {
    pub coordinate: Coordinate,
    pub city: String,
    pub country: String,
    pub source: LocationSource,
}

impl LocationInfo {
    /// Fixed fallback used when every geolocation provider fails. Location
    /// resolution never blocks a recommendation.
    pub fn default_location() -> Self {
        Self {
            coordinate: Coordinate {
                latitude: 30.9,
                longitude: 75.8,
            },
            city: "Ludhiana".into(),
            country: "India".into(),
            source: LocationSource::Default,
        }
    }

    /// Caller supplied explicit coordinates, skipping IP geolocation.
    pub fn from_caller(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            city: "Unknown".into(),
            country: "Unknown".into(),
            source: LocationSource::Caller,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_accepts_valid_ranges() {
        assert!(Coordinate::new(30.9, 75.8).is_ok());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(91.0, 0.0),
            Err(CropSenseError::InvalidInput(field)) if field == "latitude"
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.5),
            Err(CropSenseError::InvalidInput(field)) if field == "longitude"
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn default_location_is_ludhiana() {
        let location = LocationInfo::default_location();
        assert_eq!(location.coordinate.latitude, 30.9);
        assert_eq!(location.coordinate.longitude, 75.8);
        assert_eq!(location.city, "Ludhiana");
        assert_eq!(location.country, "India");
        assert_eq!(location.source, LocationSource::Default);
    }

    #[test]
    fn caller_location_defaults_city_and_country() {
        let location = LocationInfo::from_caller(Coordinate {
            latitude: 28.6,
            longitude: 77.2,
        });
        assert_eq!(location.city, "Unknown");
        assert_eq!(location.country, "Unknown");
        assert_eq!(location.source, LocationSource::Caller);
    }
}
