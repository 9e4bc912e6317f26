//! Body weight record
//!
//! [`BodyWeight`] holds one person's height and weight in SI units and answers
//! BMI questions about it. Imperial input is converted on the way in; target
//! weights and healthy ranges are converted back so callers always work in the
//! units they started with.

use serde::{Deserialize, Serialize};

use crate::config::BmiConfig;
use crate::error::BodyWeightError;
use crate::units::{StandardUnits, UnitConverter, UnitSystem};

/// Healthy weight bounds for a given height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthyWeightRange {
    /// Lowest healthy weight (kg or lb, matching the record's input units)
    pub low: f64,
    /// Highest healthy weight (kg or lb, matching the record's input units)
    pub high: f64,
}

impl HealthyWeightRange {
    pub fn contains(&self, weight: f64) -> bool {
        weight >= self.low && weight <= self.high
    }
}

/// A person's height and weight with derived BMI queries
#[derive(Debug, Clone)]
pub struct BodyWeight<U: UnitConverter = StandardUnits> {
    /// Height in meters
    height: f64,
    /// Weight in kilograms
    weight: f64,
    /// True when the record was built from inches and pounds
    units_are_imperial: bool,
    units: U,
    config: BmiConfig,
}

impl BodyWeight<StandardUnits> {
    /// Build a record from height (cm or in) and weight (kg or lb)
    pub fn new(height: f64, weight: f64, system: UnitSystem) -> Result<Self, BodyWeightError> {
        Self::with_units(height, weight, system, StandardUnits)
    }
}

impl<U: UnitConverter> BodyWeight<U> {
    /// Build a record using a custom unit converter
    pub fn with_units(
        height: f64,
        weight: f64,
        system: UnitSystem,
        units: U,
    ) -> Result<Self, BodyWeightError> {
        Self::with_config(height, weight, system, units, BmiConfig::default())
    }

    /// Build a record using a custom unit converter and thresholds
    pub fn with_config(
        height: f64,
        weight: f64,
        system: UnitSystem,
        units: U,
        config: BmiConfig,
    ) -> Result<Self, BodyWeightError> {
        config.validate()?;
        validate_height(height, height)?;
        validate_weight(weight, weight)?;

        let (height_m, weight_kg) = match system {
            UnitSystem::Imperial => (
                units.inches_to_centimeters(height) / 100.0,
                units.pounds_to_kilograms(weight),
            ),
            UnitSystem::Metric => (height / 100.0, weight),
        };

        // BMI divides by height squared, which must not underflow or overflow
        validate_height(height, height_m.powi(2))?;
        validate_weight(weight, weight_kg)?;

        tracing::debug!(
            height_m,
            weight_kg,
            units = system.as_str(),
            "body weight record created"
        );

        Ok(Self {
            height: height_m,
            weight: weight_kg,
            units_are_imperial: system == UnitSystem::Imperial,
            units,
            config,
        })
    }

    /// Height in meters
    pub fn height_m(&self) -> f64 {
        self.height
    }

    /// Current weight in kilograms
    pub fn weight_kg(&self) -> f64 {
        self.weight
    }

    pub fn units_are_imperial(&self) -> bool {
        self.units_are_imperial
    }

    pub fn unit_system(&self) -> UnitSystem {
        if self.units_are_imperial {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }

    pub fn config(&self) -> &BmiConfig {
        &self.config
    }

    /// Record a new weight measurement, in kilograms
    pub fn set_weight_kg(&mut self, weight_kg: f64) -> Result<(), BodyWeightError> {
        validate_weight(weight_kg, weight_kg)?;
        tracing::debug!(previous_kg = self.weight, weight_kg, "weight updated");
        self.weight = weight_kg;
        Ok(())
    }

    /// BMI for an arbitrary weight in kilograms at this record's height
    pub fn bmi_for_weight(&self, weight_kg: f64) -> f64 {
        self.config.round(weight_kg / self.height.powi(2))
    }

    pub fn current_bmi(&self) -> f64 {
        self.bmi_for_weight(self.weight)
    }

    /// True when the current BMI lies within the healthy interval
    pub fn is_current_bmi_healthy(&self) -> bool {
        self.config.is_healthy(self.current_bmi())
    }

    /// True when the current BMI is at or below the low healthy bound.
    ///
    /// A BMI exactly on the bound counts as both healthy and too low.
    pub fn is_current_weight_too_low(&self) -> bool {
        self.current_bmi() <= self.config.low_healthy_bmi
    }

    /// Check a goal weight given in the record's input units (kg or lb)
    pub fn is_target_weight_healthy(&self, target_weight: f64) -> bool {
        let target_kg = if self.units_are_imperial {
            self.units.pounds_to_kilograms(target_weight)
        } else {
            target_weight
        };

        self.config.is_healthy(self.bmi_for_weight(target_kg))
    }

    /// Healthy weight bounds for this height, in the record's input units.
    ///
    /// Depends on height only, so replacing the weight leaves it unchanged.
    pub fn current_healthy_target_weights(&self) -> HealthyWeightRange {
        let height_squared = self.height.powi(2);

        let mut low = self.config.low_healthy_bmi * height_squared;
        let mut high = self.config.high_healthy_bmi * height_squared;

        if self.units_are_imperial {
            low = self.units.kilograms_to_pounds(low);
            high = self.units.kilograms_to_pounds(high);
        }

        HealthyWeightRange {
            low: self.config.round(low),
            high: self.config.round(high),
        }
    }
}

/// Reject `height` unless `checked` (the raw value or a value derived from it)
/// is a normal, strictly positive float. Errors carry the caller's input.
fn validate_height(height: f64, checked: f64) -> Result<(), BodyWeightError> {
    if checked.is_normal() && checked > 0.0 {
        Ok(())
    } else {
        tracing::warn!(height, "rejected height");
        Err(BodyWeightError::InvalidHeight(height))
    }
}

fn validate_weight(weight: f64, checked: f64) -> Result<(), BodyWeightError> {
    if checked.is_finite() && checked >= 0.0 {
        Ok(())
    } else {
        tracing::warn!(weight, "rejected weight");
        Err(BodyWeightError::InvalidWeight(weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{inches_to_centimeters, pounds_to_kilograms};
    use pretty_assertions::assert_eq;

    const HEIGHT_INCHES: f64 = 69.0;
    const WEIGHT_POUNDS: f64 = 150.0;

    fn make_imperial() -> BodyWeight {
        BodyWeight::new(HEIGHT_INCHES, WEIGHT_POUNDS, UnitSystem::Imperial).unwrap()
    }

    fn make_metric() -> BodyWeight {
        BodyWeight::new(
            inches_to_centimeters(HEIGHT_INCHES),
            pounds_to_kilograms(WEIGHT_POUNDS),
            UnitSystem::Metric,
        )
        .unwrap()
    }

    #[test]
    fn test_init_stores_si_units() {
        let expected_height = inches_to_centimeters(HEIGHT_INCHES) / 100.0;
        let expected_weight = pounds_to_kilograms(WEIGHT_POUNDS);

        let imperial = make_imperial();
        assert_eq!(imperial.height_m(), expected_height);
        assert_eq!(imperial.weight_kg(), expected_weight);
        assert!(imperial.units_are_imperial());

        let metric = make_metric();
        assert_eq!(metric.height_m(), expected_height);
        assert_eq!(metric.weight_kg(), expected_weight);
        assert!(!metric.units_are_imperial());
        assert_eq!(metric.unit_system(), UnitSystem::Metric);
    }

    #[test]
    fn test_imperial_record() {
        let mut body_weight = make_imperial();
        assert_eq!(body_weight.current_bmi(), 22.2);
        assert!(!body_weight.is_current_weight_too_low());
        assert!(body_weight.is_current_bmi_healthy());

        let range = HealthyWeightRange { low: 125.3, high: 169.3 };
        assert_eq!(body_weight.current_healthy_target_weights(), range);

        body_weight.set_weight_kg(300.0).unwrap();
        assert_eq!(body_weight.current_bmi(), 97.7);
        assert!(!body_weight.is_current_bmi_healthy());

        body_weight.set_weight_kg(50.0).unwrap();
        assert!(body_weight.is_current_weight_too_low());

        assert!(body_weight.is_target_weight_healthy(150.0));
        assert!(!body_weight.is_target_weight_healthy(500.0));

        // range depends on height only
        assert_eq!(body_weight.current_healthy_target_weights(), range);
    }

    #[test]
    fn test_metric_record() {
        let mut body_weight = make_metric();
        assert_eq!(body_weight.current_bmi(), 22.2);
        assert!(!body_weight.is_current_weight_too_low());
        assert!(body_weight.is_current_bmi_healthy());

        let range = HealthyWeightRange { low: 56.8, high: 76.8 };
        assert_eq!(body_weight.current_healthy_target_weights(), range);

        body_weight.set_weight_kg(300.0).unwrap();
        assert_eq!(body_weight.current_bmi(), 97.7);
        assert!(!body_weight.is_current_bmi_healthy());

        body_weight.set_weight_kg(50.0).unwrap();
        assert!(body_weight.is_current_weight_too_low());

        assert!(body_weight.is_target_weight_healthy(pounds_to_kilograms(WEIGHT_POUNDS)));
        assert!(!body_weight.is_target_weight_healthy(200.0));

        assert_eq!(body_weight.current_healthy_target_weights(), range);
    }

    #[test]
    fn test_low_bound_is_both_healthy_and_too_low() {
        // 1 m tall, so BMI equals weight in kg
        let body_weight = BodyWeight::new(100.0, 18.5, UnitSystem::Metric).unwrap();
        assert_eq!(body_weight.current_bmi(), 18.5);
        assert!(body_weight.is_current_bmi_healthy());
        assert!(body_weight.is_current_weight_too_low());

        let upper = BodyWeight::new(100.0, 25.0, UnitSystem::Metric).unwrap();
        assert!(upper.is_current_bmi_healthy());
        assert!(!upper.is_current_weight_too_low());
    }

    #[test]
    fn test_bmi_rounds_before_threshold_check() {
        // 25.04 rounds down to 25.0 and stays healthy
        let body_weight = BodyWeight::new(100.0, 25.04, UnitSystem::Metric).unwrap();
        assert_eq!(body_weight.current_bmi(), 25.0);
        assert!(body_weight.is_current_bmi_healthy());

        let over = BodyWeight::new(100.0, 25.05, UnitSystem::Metric).unwrap();
        assert_eq!(over.current_bmi(), 25.1);
        assert!(!over.is_current_bmi_healthy());
    }

    #[test]
    fn test_rejects_invalid_height() {
        for height in [0.0, -170.0, f64::NAN, f64::INFINITY] {
            let result = BodyWeight::new(height, 70.0, UnitSystem::Metric);
            assert!(
                matches!(result, Err(BodyWeightError::InvalidHeight(_))),
                "height {height} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_height_with_degenerate_square() {
        // positive, but squares to zero or infinity in meters
        for height in [1e-160, f64::MIN_POSITIVE, 1e160] {
            let result = BodyWeight::new(height, 70.0, UnitSystem::Metric);
            assert!(
                matches!(result, Err(BodyWeightError::InvalidHeight(h)) if h == height),
                "height {height} accepted"
            );
        }

        let result = BodyWeight::new(1e-160, 0.0, UnitSystem::Metric);
        assert!(matches!(result, Err(BodyWeightError::InvalidHeight(_))));
    }

    #[test]
    fn test_errors_report_raw_input() {
        let result = BodyWeight::new(-170.0, 150.0, UnitSystem::Imperial);
        assert!(matches!(result, Err(BodyWeightError::InvalidHeight(h)) if h == -170.0));

        let result = BodyWeight::new(69.0, -1.0, UnitSystem::Imperial);
        assert!(matches!(result, Err(BodyWeightError::InvalidWeight(w)) if w == -1.0));

        let message = BodyWeight::new(-170.0, 150.0, UnitSystem::Imperial)
            .unwrap_err()
            .to_string();
        assert!(message.starts_with("Invalid height: -170 "), "{message}");
    }

    #[test]
    fn test_rejects_invalid_weight() {
        let result = BodyWeight::new(69.0, -1.0, UnitSystem::Imperial);
        assert!(matches!(result, Err(BodyWeightError::InvalidWeight(_))));

        let mut body_weight = make_imperial();
        assert!(body_weight.set_weight_kg(f64::NAN).is_err());
        assert_eq!(body_weight.current_bmi(), 22.2);

        // zero weight is a valid, if unhealthy, measurement
        body_weight.set_weight_kg(0.0).unwrap();
        assert_eq!(body_weight.current_bmi(), 0.0);
        assert!(body_weight.is_current_weight_too_low());
    }

    #[test]
    fn test_custom_converter() {
        struct CoarseUnits;
        impl UnitConverter for CoarseUnits {
            fn pounds_to_kilograms(&self, pounds: f64) -> f64 {
                pounds * 0.5
            }
            fn kilograms_to_pounds(&self, kilograms: f64) -> f64 {
                kilograms * 2.0
            }
        }

        let body_weight =
            BodyWeight::with_units(HEIGHT_INCHES, 200.0, UnitSystem::Imperial, CoarseUnits)
                .unwrap();
        assert_eq!(body_weight.weight_kg(), 100.0);
        assert_eq!(body_weight.current_bmi(), 32.6);
        assert_eq!(body_weight.current_healthy_target_weights().low, 113.6);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = BmiConfig {
            low_healthy_bmi: 20.0,
            high_healthy_bmi: 22.0,
            precision: 1,
        };
        let body_weight = BodyWeight::with_config(
            HEIGHT_INCHES,
            WEIGHT_POUNDS,
            UnitSystem::Imperial,
            StandardUnits,
            config,
        )
        .unwrap();

        assert_eq!(body_weight.current_bmi(), 22.2);
        assert!(!body_weight.is_current_bmi_healthy());
        assert!(!body_weight.is_current_weight_too_low());
    }

    #[test]
    fn test_range_contains() {
        let range = make_imperial().current_healthy_target_weights();
        assert!(range.contains(150.0));
        assert!(range.contains(125.3));
        assert!(!range.contains(170.0));
    }
}
