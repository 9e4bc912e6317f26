//! bodyweight - BMI and healthy weight ranges
//!
//! Builds a [`BodyWeight`] record from a height and weight in metric
//! (centimeters, kilograms) or imperial (inches, pounds) units and answers:
//! current BMI, whether it is healthy or too low, whether a goal weight is
//! healthy, and which weights are healthy for that height.
//!
//! ## Modules
//!
//! - **Body weight**: the record and its BMI queries
//! - **Units**: unit systems and the pluggable [`UnitConverter`]
//! - **Config**: healthy BMI thresholds and rounding precision
//! - **Report**: JSON-serializable assessments for host applications

pub mod body_weight;
pub mod config;
pub mod error;
pub mod report;
pub mod units;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use body_weight::{BodyWeight, HealthyWeightRange};
pub use config::{BmiConfig, HIGH_HEALTHY_BMI, LOW_HEALTHY_BMI, MAX_PRECISION, PRECISION};
pub use error::BodyWeightError;
pub use report::{assess, BodyWeightReport};
pub use units::{StandardUnits, UnitConverter, UnitSystem};

/// Crate version embedded in reports
pub const BODYWEIGHT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "bodyweight";
