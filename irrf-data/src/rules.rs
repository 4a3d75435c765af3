//! TOML overrides for the withholding law tables.
//!
//! Every section and every field is optional; anything left out keeps its
//! statutory value from [`WithholdingRules::statutory`]. Amounts and rates
//! may be written as strings (exact) or as TOML numbers.
//!
//! ```toml
//! [contribution]
//! brackets = [
//!     { upper_bound = "1518.00", rate = "0.075" },
//!     { upper_bound = "2793.88", rate = "0.09" },
//!     { upper_bound = "4190.83", rate = "0.12" },
//!     { upper_bound = "8157.41", rate = "0.14" },
//! ]
//!
//! [income_tax]
//! brackets = [
//!     { upper_bound = "2428.80", rate = "0" },
//!     { upper_bound = "2826.65", rate = "0.075" },
//!     { upper_bound = "3751.05", rate = "0.15" },
//!     { upper_bound = "4664.68", rate = "0.225" },
//! ]
//! top_rate = "0.275"
//!
//! [deductions]
//! dependent_allowance = "189.59"
//! simplified_rate = "0.20"
//! simplified_cap = "16754.34"
//!
//! [reform]
//! exemption_limit = "5000.00"
//! phase_out_limit = "7000.00"
//! max_rebate = "312.89"
//! phase_out_intercept = "1095.11"
//! phase_out_slope = "0.156445"
//! ```
//!
//! A table without `top_rate` keeps the overflow policy of the statutory
//! table it replaces, so `[income_tax]` keeps its 27.5% top rate unless a
//! new one is given. The contribution table is always capped; a `top_rate`
//! there is rejected by validation.

use std::path::Path;

use irrf_core::{BracketTable, Overflow, RulesError, TaxBracket, WithholdingRules};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading a rules file.
#[derive(Debug, Error)]
pub enum RulesLoadError {
    #[error("cannot read rules file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid decimal for {field}: '{value}'")]
    InvalidDecimal { field: String, value: String },

    /// The merged tables are inconsistent.
    #[error("invalid rules: {0}")]
    Invalid(#[from] RulesError),
}

// ---------------------------------------------------------------------------
// File layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RawDecimal {
    fn parse(
        &self,
        field: &str,
    ) -> Result<Decimal, RulesLoadError> {
        let text = match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Integer(i) => i.to_string(),
            // Shortest round-trip form, so 0.075 stays 0.075.
            Self::Float(f) => f.to_string(),
        };
        text.parse::<Decimal>()
            .map_err(|_| RulesLoadError::InvalidDecimal {
                field: field.to_string(),
                value: text,
            })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBracket {
    upper_bound: RawDecimal,
    rate: RawDecimal,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    brackets: Vec<RawBracket>,
    #[serde(default)]
    top_rate: Option<RawDecimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDeductions {
    dependent_allowance: Option<RawDecimal>,
    simplified_rate: Option<RawDecimal>,
    simplified_cap: Option<RawDecimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReform {
    exemption_limit: Option<RawDecimal>,
    phase_out_limit: Option<RawDecimal>,
    max_rebate: Option<RawDecimal>,
    phase_out_intercept: Option<RawDecimal>,
    phase_out_slope: Option<RawDecimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesFile {
    contribution: Option<RawTable>,
    income_tax: Option<RawTable>,
    #[serde(default)]
    deductions: RawDeductions,
    #[serde(default)]
    reform: RawReform,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Converts an overriding table. Without `top_rate` the overflow policy of
/// `replaced` is kept.
fn convert_table(
    name: &str,
    raw: RawTable,
    replaced: &BracketTable,
) -> Result<BracketTable, RulesLoadError> {
    let brackets = raw
        .brackets
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Ok(TaxBracket::new(
                b.upper_bound.parse(&format!("{name}.brackets[{i}].upper_bound"))?,
                b.rate.parse(&format!("{name}.brackets[{i}].rate"))?,
            ))
        })
        .collect::<Result<Vec<_>, RulesLoadError>>()?;

    let overflow = match raw.top_rate {
        Some(rate) => Overflow::Marginal(rate.parse(&format!("{name}.top_rate"))?),
        None => replaced.overflow,
    };

    Ok(BracketTable::new(brackets, overflow))
}

/// Overwrites `target` when the field is present.
fn merge(
    target: &mut Decimal,
    raw: Option<RawDecimal>,
    field: &str,
) -> Result<(), RulesLoadError> {
    if let Some(raw) = raw {
        *target = raw.parse(field)?;
    }
    Ok(())
}

fn merge_into_statutory(file: RulesFile) -> Result<WithholdingRules, RulesLoadError> {
    let mut rules = WithholdingRules::statutory();

    if let Some(table) = file.contribution {
        rules.contribution = convert_table("contribution", table, &rules.contribution)?;
    }
    if let Some(table) = file.income_tax {
        rules.income_tax = convert_table("income_tax", table, &rules.income_tax)?;
    }

    let d = file.deductions;
    merge(
        &mut rules.deductions.dependent_allowance,
        d.dependent_allowance,
        "deductions.dependent_allowance",
    )?;
    merge(
        &mut rules.deductions.simplified_rate,
        d.simplified_rate,
        "deductions.simplified_rate",
    )?;
    merge(
        &mut rules.deductions.simplified_cap,
        d.simplified_cap,
        "deductions.simplified_cap",
    )?;

    let r = file.reform;
    merge(
        &mut rules.reform.exemption_limit,
        r.exemption_limit,
        "reform.exemption_limit",
    )?;
    merge(
        &mut rules.reform.phase_out_limit,
        r.phase_out_limit,
        "reform.phase_out_limit",
    )?;
    merge(
        &mut rules.reform.max_rebate,
        r.max_rebate,
        "reform.max_rebate",
    )?;
    merge(
        &mut rules.reform.phase_out_intercept,
        r.phase_out_intercept,
        "reform.phase_out_intercept",
    )?;
    merge(
        &mut rules.reform.phase_out_slope,
        r.phase_out_slope,
        "reform.phase_out_slope",
    )?;

    Ok(rules)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parses a rules document, merges it over the statutory tables and
/// validates the result.
pub fn load_rules_from_str(input: &str) -> Result<WithholdingRules, RulesLoadError> {
    let file: RulesFile = toml::from_str(input)?;
    let rules = merge_into_statutory(file)?;
    rules.validate()?;
    debug!(?rules, "rules loaded");
    Ok(rules)
}

/// Reads a rules file from disk and delegates to [`load_rules_from_str`].
pub fn load_rules_from_file(path: &Path) -> Result<WithholdingRules, RulesLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RulesLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let rules = load_rules_from_str(&contents)?;
    info!(path = %path.display(), "loaded withholding rules");
    Ok(rules)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
