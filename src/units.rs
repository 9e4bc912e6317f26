//! Unit systems and conversions
//!
//! Measurements enter the crate either in metric (centimeters, kilograms) or
//! imperial (inches, pounds) units. Everything is stored in meters and
//! kilograms; the [`UnitConverter`] trait is the seam through which inputs and
//! outputs cross between the two systems.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BodyWeightError;

/// Centimeters per inch (exact by definition)
pub const CENTIMETERS_PER_INCH: f64 = 2.54;

/// Kilograms per pound (exact by definition)
pub const KILOGRAMS_PER_POUND: f64 = 0.453_592_37;

/// Unit system a measurement was taken in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Centimeters and kilograms
    Metric,
    /// Inches and pounds
    #[default]
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Label for weights expressed in this system
    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    /// Label for heights expressed in this system
    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = BodyWeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(BodyWeightError::UnknownUnitSystem(other.to_string())),
        }
    }
}

/// Length and mass conversions between imperial and metric units
///
/// Implementations must be pure: the same input always yields the same output.
/// The default methods use the exact international definitions; override them
/// to plug in a different precision.
pub trait UnitConverter {
    fn inches_to_centimeters(&self, inches: f64) -> f64 {
        inches * CENTIMETERS_PER_INCH
    }

    fn centimeters_to_inches(&self, centimeters: f64) -> f64 {
        centimeters / CENTIMETERS_PER_INCH
    }

    fn pounds_to_kilograms(&self, pounds: f64) -> f64 {
        pounds * KILOGRAMS_PER_POUND
    }

    fn kilograms_to_pounds(&self, kilograms: f64) -> f64 {
        kilograms / KILOGRAMS_PER_POUND
    }
}

/// Converter using the exact international inch and pound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardUnits;

impl UnitConverter for StandardUnits {}

pub fn inches_to_centimeters(inches: f64) -> f64 {
    StandardUnits.inches_to_centimeters(inches)
}

pub fn centimeters_to_inches(centimeters: f64) -> f64 {
    StandardUnits.centimeters_to_inches(centimeters)
}

pub fn pounds_to_kilograms(pounds: f64) -> f64 {
    StandardUnits.pounds_to_kilograms(pounds)
}

pub fn kilograms_to_pounds(kilograms: f64) -> f64 {
    StandardUnits.kilograms_to_pounds(kilograms)
}
