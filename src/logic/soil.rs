use crate::error::{CropSenseError, Result};
use crate::models::{IotSoilReading, SoilInput, SoilSample, SoilSource};

/// Choose the soil values for a request. Pure, infallible.
///
/// Precedence is field-wise, not all-or-nothing: every field present in the
/// IoT reading overrides the manual value for that field; absent fields keep
/// the manual value. A missing or empty reading leaves the manual values
/// untouched and tagged Manual.
pub fn resolve_soil(manual: &SoilInput, iot: Option<&IotSoilReading>) -> SoilSample {
    match iot {
        Some(reading) if !reading.is_empty() => SoilSample {
            n: reading.n.unwrap_or(manual.n),
            p: reading.p.unwrap_or(manual.p),
            k: reading.k.unwrap_or(manual.k),
            ph: reading.ph.unwrap_or(manual.ph),
            source: SoilSource::Iot,
        },
        _ => SoilSample {
            n: manual.n,
            p: manual.p,
            k: manual.k,
            ph: manual.ph,
            source: SoilSource::Manual,
        },
    }
}

/// Reject soil values no crop dataset could contain. Applies to both manual
/// input and IoT overrides.
pub fn validate_soil(soil: &SoilSample) -> Result<()> {
    for (field, value) in [("N", soil.n), ("P", soil.p), ("K", soil.k)] {
        if !value.is_finite() || value < 0.0 {
            return Err(CropSenseError::InvalidInput(field.into()));
        }
    }
    if !soil.ph.is_finite() || !(0.0..=14.0).contains(&soil.ph) {
        return Err(CropSenseError::InvalidInput("ph".into()));
    }
    Ok(())
}
