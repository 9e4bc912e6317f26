//! Assessment reports
//!
//! Snapshots a [`BodyWeight`] into a serializable structure for hosts that
//! consume results as JSON (the C bindings and the CLI).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::body_weight::{BodyWeight, HealthyWeightRange};
use crate::error::BodyWeightError;
use crate::units::{UnitConverter, UnitSystem};
use crate::{BODYWEIGHT_VERSION, PRODUCER_NAME};

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
}

/// Healthy range with its unit label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRange {
    pub low: f64,
    pub high: f64,
    /// "kg" or "lb"
    pub unit: String,
}

/// Point-in-time BMI assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightReport {
    pub producer: ReportProducer,
    pub units: UnitSystem,
    pub height_m: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub healthy: bool,
    pub too_low: bool,
    pub healthy_range: ReportRange,
    pub computed_at_utc: DateTime<Utc>,
}

impl BodyWeightReport {
    pub fn from_body_weight<U: UnitConverter>(body_weight: &BodyWeight<U>) -> Self {
        Self::at(body_weight, Utc::now())
    }

    /// Build a report with a fixed computation time
    pub fn at<U: UnitConverter>(body_weight: &BodyWeight<U>, computed_at: DateTime<Utc>) -> Self {
        let units = body_weight.unit_system();
        let HealthyWeightRange { low, high } = body_weight.current_healthy_target_weights();

        Self {
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: BODYWEIGHT_VERSION.to_string(),
            },
            units,
            height_m: body_weight.height_m(),
            weight_kg: body_weight.weight_kg(),
            bmi: body_weight.current_bmi(),
            healthy: body_weight.is_current_bmi_healthy(),
            too_low: body_weight.is_current_weight_too_low(),
            healthy_range: ReportRange {
                low,
                high,
                unit: units.weight_unit().to_string(),
            },
            computed_at_utc: computed_at,
        }
    }

    pub fn to_json(&self) -> Result<String, BodyWeightError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, BodyWeightError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build a record from raw input and report on it in one step.
///
/// # Example
/// ```
/// use bodyweight::{assess, UnitSystem};
///
/// let report = assess(69.0, 150.0, UnitSystem::Imperial).unwrap();
/// assert_eq!(report.bmi, 22.2);
/// assert!(report.healthy);
/// ```
pub fn assess(
    height: f64,
    weight: f64,
    system: UnitSystem,
) -> Result<BodyWeightReport, BodyWeightError> {
    let body_weight = BodyWeight::new(height, weight, system)?;
    Ok(BodyWeightReport::from_body_weight(&body_weight))
}
