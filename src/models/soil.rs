use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilSource {
    Iot,
    Manual,
}

impl SoilSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilSource::Iot => "IoT Sensors",
            SoilSource::Manual => "Manual Input",
        }
    }
}

impl std::fmt::Display for SoilSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Manually entered soil values. Always complete; the caller supplies all four.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SoilInput {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ph: f64,
}

/// Partial reading from field sensors. Each field is independently optional;
/// a missing field keeps the manual value during resolution.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IotSoilReading {
    #[serde(default)]
    pub n: Option<f64>,
    #[serde(default)]
    pub p: Option<f64>,
    #[serde(default)]
    pub k: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
}

impl IotSoilReading {
    pub fn is_empty(&self) -> bool {
        self.n.is_none() && self.p.is_none() && self.k.is_none() && self.ph.is_none()
    }
}

/// The soil values a recommendation was actually computed from, with their
/// provenance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SoilSample {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ph: f64,
    pub source: SoilSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iot_reading_empty_detection() {
        assert!(IotSoilReading::default().is_empty());

        let partial = IotSoilReading {
            k: Some(43.0),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }

    #[test]
    fn iot_reading_deserializes_with_missing_fields() {
        let reading: IotSoilReading = serde_json::from_str(r#"{"n": 88.0, "ph": 6.2}"#).unwrap();
        assert_eq!(reading.n, Some(88.0));
        assert_eq!(reading.p, None);
        assert_eq!(reading.k, None);
        assert_eq!(reading.ph, Some(6.2));
    }

    #[test]
    fn soil_source_display() {
        assert_eq!(SoilSource::Iot.as_str(), "IoT Sensors");
        assert_eq!(SoilSource::Manual.as_str(), "Manual Input");
    }
}
