//! bmi - Command-line interface for bodyweight
//!
//! Commands:
//! - assess: Report BMI, health flags and the healthy weight range
//! - target: Check whether a goal weight is healthy
//! - range: Print the healthy weight range for a height
//! - config: Print the default BMI thresholds

use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bodyweight::{
    BmiConfig, BodyWeight, BodyWeightError, BodyWeightReport, HealthyWeightRange, UnitSystem,
    BODYWEIGHT_VERSION,
};

/// bmi - BMI and healthy weight ranges from height and weight
#[derive(Parser)]
#[command(name = "bmi")]
#[command(version = BODYWEIGHT_VERSION)]
#[command(about = "Compute BMI and healthy weight ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report BMI, health flags and the healthy weight range
    Assess {
        /// Height (centimeters or inches)
        #[arg(long, allow_negative_numbers = true)]
        height: f64,

        /// Weight (kilograms or pounds)
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Unit system of the inputs
        #[arg(long, default_value = "imperial")]
        units: UnitSystem,

        /// Output format (defaults to text on a terminal, JSON otherwise)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Check whether a goal weight is healthy
    Target {
        /// Height (centimeters or inches)
        #[arg(long, allow_negative_numbers = true)]
        height: f64,

        /// Current weight (kilograms or pounds)
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Goal weight, in the same units as --weight
        #[arg(long, allow_negative_numbers = true)]
        target: f64,

        /// Unit system of the inputs
        #[arg(long, default_value = "imperial")]
        units: UnitSystem,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the healthy weight range for a height
    Range {
        /// Height (centimeters or inches)
        #[arg(long, allow_negative_numbers = true)]
        height: f64,

        /// Unit system of the inputs
        #[arg(long, default_value = "imperial")]
        units: UnitSystem,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default BMI thresholds as JSON
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Single-line JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bodyweight=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = CliError::from(e);
            eprintln!(
                "{}",
                serde_json::to_string(&error).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), BmiCliError> {
    match cli.command {
        Commands::Assess {
            height,
            weight,
            units,
            format,
        } => cmd_assess(height, weight, units, format),

        Commands::Target {
            height,
            weight,
            target,
            units,
            json,
        } => cmd_target(height, weight, target, units, json),

        Commands::Range { height, units, json } => cmd_range(height, units, json),

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&BmiConfig::default())?);
            Ok(())
        }
    }
}

fn cmd_assess(
    height: f64,
    weight: f64,
    units: UnitSystem,
    format: Option<OutputFormat>,
) -> Result<(), BmiCliError> {
    let report = bodyweight::assess(height, weight, units)?;

    let format = format.unwrap_or_else(|| {
        if atty::is(atty::Stream::Stdout) {
            OutputFormat::Text
        } else {
            OutputFormat::Json
        }
    });

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::JsonPretty => println!("{}", report.to_json_pretty()?),
        OutputFormat::Text => print_report(&report),
    }

    Ok(())
}

fn cmd_target(
    height: f64,
    weight: f64,
    target: f64,
    units: UnitSystem,
    json: bool,
) -> Result<(), BmiCliError> {
    let body_weight = BodyWeight::new(height, weight, units)?;
    let healthy = body_weight.is_target_weight_healthy(target);

    if json {
        let output = TargetOutput {
            target,
            unit: units.weight_unit(),
            healthy,
            healthy_range: body_weight.current_healthy_target_weights(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let verdict = if healthy { "healthy" } else { "not healthy" };
        println!("Target {} {} is {}", target, units.weight_unit(), verdict);
    }

    Ok(())
}

fn cmd_range(height: f64, units: UnitSystem, json: bool) -> Result<(), BmiCliError> {
    // Range depends on height only; any valid weight will do
    let body_weight = BodyWeight::new(height, 0.0, units)?;
    let range = body_weight.current_healthy_target_weights();

    if json {
        println!("{}", serde_json::to_string(&range)?);
    } else {
        println!(
            "Healthy weight for {} {}: {} - {} {}",
            height,
            units.height_unit(),
            range.low,
            range.high,
            units.weight_unit()
        );
    }

    Ok(())
}

fn print_report(report: &BodyWeightReport) {
    let status = if report.too_low {
        "too low"
    } else if report.healthy {
        "healthy"
    } else {
        "too high"
    };

    println!("BMI Report");
    println!("==========");
    println!("Units:          {}", report.units);
    println!("BMI:            {}", report.bmi);
    println!("Status:         {}", status);
    println!(
        "Healthy range:  {} - {} {}",
        report.healthy_range.low, report.healthy_range.high, report.healthy_range.unit
    );
}

#[derive(serde::Serialize)]
struct TargetOutput {
    target: f64,
    unit: &'static str,
    healthy: bool,
    healthy_range: HealthyWeightRange,
}

// Error types

#[derive(Debug)]
enum BmiCliError {
    Input(BodyWeightError),
    Json(serde_json::Error),
}

impl From<BodyWeightError> for BmiCliError {
    fn from(e: BodyWeightError) -> Self {
        BmiCliError::Input(e)
    }
}

impl From<serde_json::Error> for BmiCliError {
    fn from(e: serde_json::Error) -> Self {
        BmiCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BmiCliError> for CliError {
    fn from(e: BmiCliError) -> Self {
        match e {
            BmiCliError::Input(
                e @ (BodyWeightError::InvalidHeight(_) | BodyWeightError::InvalidWeight(_)),
            ) => CliError {
                code: "INVALID_MEASUREMENT".to_string(),
                message: e.to_string(),
                hint: Some("Height must be positive and weight must not be negative".to_string()),
            },
            BmiCliError::Input(e) => CliError {
                code: "INPUT_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            BmiCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_measurements_reach_validation() {
        let cli = Cli::try_parse_from([
            "bmi", "assess", "--height", "-170", "--weight", "-1", "--units", "metric",
        ])
        .unwrap();

        let Commands::Assess { height, weight, units, .. } = cli.command else {
            panic!("expected assess command");
        };
        assert_eq!(height, -170.0);
        assert_eq!(weight, -1.0);
        assert_eq!(units, UnitSystem::Metric);

        let error = CliError::from(run_assess_error(height, weight, units));
        assert_eq!(error.code, "INVALID_MEASUREMENT");
        assert_eq!(error.message, BodyWeightError::InvalidHeight(-170.0).to_string());
    }

    #[test]
    fn test_negative_target_is_accepted() {
        let cli = Cli::try_parse_from([
            "bmi", "target", "--height", "69", "--weight", "150", "--target", "-5",
        ])
        .unwrap();

        let Commands::Target { target, units, .. } = cli.command else {
            panic!("expected target command");
        };
        assert_eq!(target, -5.0);
        assert_eq!(units, UnitSystem::Imperial);
    }

    #[test]
    fn test_units_parse_through_unit_system() {
        let cli = Cli::try_parse_from(["bmi", "range", "--height", "175", "--units", "METRIC"])
            .unwrap();
        let Commands::Range { units, .. } = cli.command else {
            panic!("expected range command");
        };
        assert_eq!(units, UnitSystem::Metric);

        let result = Cli::try_parse_from(["bmi", "range", "--height", "175", "--units", "stone"]);
        assert!(result.is_err());
    }

    fn run_assess_error(height: f64, weight: f64, units: UnitSystem) -> BmiCliError {
        match bodyweight::assess(height, weight, units) {
            Ok(_) => panic!("measurement accepted"),
            Err(e) => BmiCliError::from(e),
        }
    }
}
