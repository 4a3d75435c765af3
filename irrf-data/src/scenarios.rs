//! CSV loader for batches of paycheck scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed. Amounts use `.` as the decimal separator and no thousands
//! separator.
//!
//! | Column                 | Required | Type    | Notes |
//! |------------------------|----------|---------|-------|
//! | `label`                | no       | string  | Defaults to `Scenario <row>` |
//! | `gross_salary`         | yes      | decimal | e.g. `4161.00` |
//! | `pension_contribution` | no       | decimal | Empty → derived from `pension_rate`, else 0 |
//! | `pension_rate`         | no       | decimal | Fraction of gross, e.g. `0.12` |
//! | `health_expense`       | no       | decimal | Empty → 0 |
//! | `dependents`           | no       | integer | Empty → 0 |
//!
//! ### Example
//!
//! ```csv
//! label,gross_salary,pension_contribution,pension_rate,health_expense,dependents
//! October paycheck,4161.00,499.32,,145.63,
//! Senior analyst,9000.00,,0.12,145.63,1
//! ```

use std::path::Path;

use irrf_core::{CalculationError, CalculationInput};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    label: Option<String>,
    #[serde(deserialize_with = "deserialize_decimal")]
    gross_salary: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pension_contribution: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pension_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    health_expense: Option<Decimal>,
    #[serde(default)]
    dependents: Option<u32>,
}

/// Parses decimals from their text form so no value passes through `f64`.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A labelled, validated calculation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,
    pub input: CalculationInput,
}

/// Errors that can occur while loading scenarios.
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    /// The file could not be read.
    #[error("cannot read scenario file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, missing required column or unparseable value.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row parsed but its amounts are out of domain. `row` is 1-based,
    /// not counting the header.
    #[error("invalid scenario on row {row}: {source}")]
    InvalidScenario {
        row: usize,
        #[source]
        source: CalculationError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let invalid = |source| ScenarioLoadError::InvalidScenario {
        row: row_number,
        source,
    };

    let input = match (row.pension_contribution, row.pension_rate) {
        (Some(amount), _) => CalculationInput::new(row.gross_salary, amount),
        (None, Some(rate)) => CalculationInput::with_pension_rate(row.gross_salary, rate),
        (None, None) => CalculationInput::new(row.gross_salary, Decimal::ZERO),
    }
    .and_then(|input| input.with_health_expense(row.health_expense.unwrap_or_default()))
        .map_err(invalid)?
        .with_dependents(row.dependents.unwrap_or_default());

    let label = row
        .label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| format!("Scenario {row_number}"));

    debug!(row = row_number, label = %label, "parsed scenario");
    Ok(Scenario { label, input })
}

/// Parses CSV text into scenarios, in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is malformed or a value cannot
///   be deserialised (including a negative `dependents`).
/// * [`ScenarioLoadError::InvalidScenario`] if an amount is negative.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let scenarios = load_from_str(&contents)?;
    info!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
gross_salary
4161.00
";

    const FULL_CSV: &str = "\
label,gross_salary,pension_contribution,pension_rate,health_expense,dependents
October paycheck,4161.00,499.32,,145.63,
Senior analyst,9000.00,,0.12,145.63,1
";

    // -----------------------------------------------------------------------
    // 1. Minimal CSV – only the required column
    // -----------------------------------------------------------------------
    #[test]
    fn minimal_csv_defaults_everything_else() {
        let scenarios = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(scenarios.len(), 1);
        let s = &scenarios[0];
        assert_eq!(s.label, "Scenario 1");
        assert_eq!(s.input.gross_salary, dec!(4161.00));
        assert_eq!(s.input.pension_contribution, Decimal::ZERO);
        assert_eq!(s.input.health_expense, Decimal::ZERO);
        assert_eq!(s.input.dependents, 0);
    }

    // -----------------------------------------------------------------------
    // 2. Full CSV – explicit pension and rate-derived pension
    // -----------------------------------------------------------------------
    #[test]
    fn full_csv_keeps_explicit_pension() {
        let scenarios = load_from_str(FULL_CSV).expect("should parse full CSV");
        let s = &scenarios[0];

        assert_eq!(s.label, "October paycheck");
        assert_eq!(s.input.pension_contribution, dec!(499.32));
        assert_eq!(s.input.health_expense, dec!(145.63));
    }

    #[test]
    fn full_csv_derives_pension_from_rate() {
        let scenarios = load_from_str(FULL_CSV).expect("should parse full CSV");
        let s = &scenarios[1];

        assert_eq!(s.input.pension_contribution, dec!(1080.00));
        assert_eq!(s.input.dependents, 1);
    }

    #[test]
    fn explicit_pension_wins_over_rate() {
        let csv = "\
gross_salary,pension_contribution,pension_rate
5000,100,0.12
";
        let scenarios = load_from_str(csv).unwrap();

        assert_eq!(scenarios[0].input.pension_contribution, dec!(100));
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "\
dependents,gross_salary,label
2,3000.00,  Reordered
";
        let scenarios = load_from_str(csv).unwrap();

        assert_eq!(scenarios[0].label, "Reordered");
        assert_eq!(scenarios[0].input.dependents, 2);
    }

    // -----------------------------------------------------------------------
    // 3. Errors
    // -----------------------------------------------------------------------
    #[test]
    fn missing_gross_salary_column_is_parse_error() {
        let csv = "label\nNo salary\n";

        let result = load_from_str(csv);

        assert!(matches!(result, Err(ScenarioLoadError::Parse(_))));
    }

    #[test]
    fn invalid_decimal_is_parse_error() {
        let csv = "gross_salary\nabc\n";

        assert!(matches!(
            load_from_str(csv),
            Err(ScenarioLoadError::Parse(_))
        ));
    }

    #[test]
    fn negative_dependents_is_parse_error() {
        let csv = "gross_salary,dependents\n3000,-1\n";

        assert!(matches!(
            load_from_str(csv),
            Err(ScenarioLoadError::Parse(_))
        ));
    }

    #[test]
    fn negative_salary_reports_row() {
        let csv = "gross_salary\n3000\n-10\n";

        let err = load_from_str(csv).unwrap_err();

        match err {
            ScenarioLoadError::InvalidScenario { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(
                    source,
                    CalculationError::InvalidInput {
                        field: "gross salary",
                        value: dec!(-10),
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pension_rate_above_one_reports_row() {
        let csv = "gross_salary,pension_rate\n9000,12\n";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(
            err,
            ScenarioLoadError::InvalidScenario {
                row: 1,
                source: CalculationError::OutOfRange {
                    field: "pension rate",
                    ..
                },
            }
        ));
    }

    #[test]
    fn huge_amount_is_rejected_not_overflowed() {
        let csv = "gross_salary,health_expense\n3000,79228162514264337593543950335\n";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(
            err,
            ScenarioLoadError::InvalidScenario {
                row: 1,
                source: CalculationError::OutOfRange {
                    field: "health expense",
                    ..
                },
            }
        ));
    }

    #[test]
    fn empty_file_with_header_yields_no_scenarios() {
        let scenarios = load_from_str("gross_salary\n").unwrap();

        assert!(scenarios.is_empty());
    }
}
