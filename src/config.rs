//! Healthy BMI thresholds and rounding precision

use serde::{Deserialize, Serialize};

use crate::error::BodyWeightError;

/// Lowest BMI considered healthy
pub const LOW_HEALTHY_BMI: f64 = 18.5;

/// Highest BMI considered healthy
pub const HIGH_HEALTHY_BMI: f64 = 25.0;

/// Decimal places kept when rounding BMI and weight values
pub const PRECISION: u32 = 1;

/// Most decimal places an f64 can round to meaningfully
pub const MAX_PRECISION: u32 = 15;

/// Thresholds used to classify BMI values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmiConfig {
    /// Lower healthy bound (inclusive)
    pub low_healthy_bmi: f64,
    /// Upper healthy bound (inclusive)
    pub high_healthy_bmi: f64,
    /// Decimal places for rounded outputs
    pub precision: u32,
}

impl Default for BmiConfig {
    fn default() -> Self {
        Self {
            low_healthy_bmi: LOW_HEALTHY_BMI,
            high_healthy_bmi: HIGH_HEALTHY_BMI,
            precision: PRECISION,
        }
    }
}

impl BmiConfig {
    /// Parse a config from JSON; omitted fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, BodyWeightError> {
        let config: BmiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BodyWeightError> {
        if !self.low_healthy_bmi.is_finite() || !self.high_healthy_bmi.is_finite() {
            return Err(BodyWeightError::InvalidConfig(
                "healthy BMI bounds must be finite".to_string(),
            ));
        }
        if self.low_healthy_bmi > self.high_healthy_bmi {
            return Err(BodyWeightError::InvalidConfig(format!(
                "low healthy BMI {} exceeds high healthy BMI {}",
                self.low_healthy_bmi, self.high_healthy_bmi
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(BodyWeightError::InvalidConfig(format!(
                "precision {} exceeds maximum of {}",
                self.precision, MAX_PRECISION
            )));
        }
        Ok(())
    }

    /// Whether `bmi` falls inside the healthy interval, bounds included
    pub fn is_healthy(&self, bmi: f64) -> bool {
        bmi >= self.low_healthy_bmi && bmi <= self.high_healthy_bmi
    }

    /// Round half away from zero to the configured number of decimals
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.precision.min(MAX_PRECISION) as i32);
        (value * scale).round() / scale
    }
}
