use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BracketTable, MAX_AMOUNT, Overflow, TaxBracket};

/// Errors raised when a set of law tables is internally inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    /// A bracket table has no brackets at all.
    #[error("{table} table has no brackets")]
    EmptyTable { table: &'static str },

    /// Upper bounds must be positive and strictly increasing.
    #[error("{table} bracket {index} has upper bound {bound}, which does not exceed the previous bound")]
    NonIncreasingBound {
        table: &'static str,
        index: usize,
        bound: Decimal,
    },

    /// Rates are fractions, so they must lie in [0, 1].
    #[error("{table} rate must be between 0 and 1, got {rate}")]
    InvalidRate { table: &'static str, rate: Decimal },

    /// A deduction amount or cap is negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// A deduction or reform amount exceeds [`MAX_AMOUNT`].
    #[error("{field} must not exceed {max}, got {value}")]
    AmountOutOfRange {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },

    /// The contribution table must stop accruing above its last bound and
    /// the income-tax table must keep taxing at a top marginal rate.
    #[error("{table} table must be {expected} above its last bound")]
    WrongOverflow {
        table: &'static str,
        expected: &'static str,
    },

    /// The full-exemption limit must sit below the phase-out limit.
    #[error("reform exemption limit {exemption_limit} must be below phase-out limit {phase_out_limit}")]
    ReformThresholdsOutOfOrder {
        exemption_limit: Decimal,
        phase_out_limit: Decimal,
    },
}

/// Deductions available under each filing method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRules {
    /// Monthly allowance per dependent (itemized method).
    pub dependent_allowance: Decimal,

    /// Fraction of the base discounted under the simplified method.
    pub simplified_rate: Decimal,

    /// Ceiling for the simplified discount.
    pub simplified_cap: Decimal,
}

/// Parameters of the 2026 phase-out rebate.
///
/// Up to `exemption_limit` the rebate is the computed tax, bounded by
/// `max_rebate`. Between the two limits it decays linearly as
/// `phase_out_intercept - phase_out_slope * base`. Above `phase_out_limit`
/// there is no rebate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReformRules {
    pub exemption_limit: Decimal,
    pub phase_out_limit: Decimal,
    pub max_rebate: Decimal,
    pub phase_out_intercept: Decimal,
    pub phase_out_slope: Decimal,
}

/// Complete set of law tables used by the withholding calculators.
///
/// Both regimes share the bracket tables; only the reform rebate differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingRules {
    /// Social-security (INSS) contribution table. Capped above the last bound.
    pub contribution: BracketTable,

    /// Monthly progressive income-tax table.
    pub income_tax: BracketTable,

    pub deductions: DeductionRules,

    pub reform: ReformRules,
}

impl DeductionRules {
    pub fn statutory() -> Self {
        Self {
            dependent_allowance: dec!(189.59),
            simplified_rate: dec!(0.20),
            simplified_cap: dec!(16754.34),
        }
    }
}

impl ReformRules {
    pub fn statutory() -> Self {
        Self {
            exemption_limit: dec!(5000.00),
            phase_out_limit: dec!(7000.00),
            max_rebate: dec!(312.89),
            phase_out_intercept: dec!(1095.11),
            phase_out_slope: dec!(0.156445),
        }
    }
}

impl WithholdingRules {
    /// INSS table in force for 2025 employees.
    pub fn statutory_contribution_table() -> BracketTable {
        BracketTable::new(
            vec![
                TaxBracket::new(dec!(1412.00), dec!(0.075)),
                TaxBracket::new(dec!(2666.68), dec!(0.09)),
                TaxBracket::new(dec!(4000.03), dec!(0.12)),
                TaxBracket::new(dec!(7786.02), dec!(0.14)),
            ],
            Overflow::Capped,
        )
    }

    /// Monthly IRRF progressive table (unchanged between 2025 and 2026).
    pub fn statutory_income_tax_table() -> BracketTable {
        BracketTable::new(
            vec![
                TaxBracket::new(dec!(2259.20), dec!(0)),
                TaxBracket::new(dec!(2826.65), dec!(0.075)),
                TaxBracket::new(dec!(3751.05), dec!(0.15)),
                TaxBracket::new(dec!(4664.68), dec!(0.225)),
            ],
            Overflow::Marginal(dec!(0.275)),
        )
    }

    /// The law tables as published, used whenever no override is supplied.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use irrf_core::WithholdingRules;
    ///
    /// let rules = WithholdingRules::statutory();
    ///
    /// assert_eq!(rules.contribution.top_bound(), dec!(7786.02));
    /// assert_eq!(rules.deductions.simplified_cap, dec!(16754.34));
    /// assert!(rules.validate().is_ok());
    /// ```
    pub fn statutory() -> Self {
        Self {
            contribution: Self::statutory_contribution_table(),
            income_tax: Self::statutory_income_tax_table(),
            deductions: DeductionRules::statutory(),
            reform: ReformRules::statutory(),
        }
    }

    /// Checks every table and parameter for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`RulesError`] found, checking the contribution
    /// table, then the income-tax table, then deductions and reform values.
    pub fn validate(&self) -> Result<(), RulesError> {
        validate_table("contribution", &self.contribution)?;
        if self.contribution.overflow != Overflow::Capped {
            return Err(RulesError::WrongOverflow {
                table: "contribution",
                expected: "capped",
            });
        }
        validate_table("income tax", &self.income_tax)?;
        if !matches!(self.income_tax.overflow, Overflow::Marginal(_)) {
            return Err(RulesError::WrongOverflow {
                table: "income tax",
                expected: "taxed at a marginal top rate",
            });
        }

        let d = &self.deductions;
        amount_in_range("dependent allowance", d.dependent_allowance)?;
        amount_in_range("simplified cap", d.simplified_cap)?;
        rate_in_range("simplified discount", d.simplified_rate)?;

        let r = &self.reform;
        amount_in_range("reform exemption limit", r.exemption_limit)?;
        amount_in_range("reform phase-out limit", r.phase_out_limit)?;
        amount_in_range("reform maximum rebate", r.max_rebate)?;
        amount_in_range("reform phase-out intercept", r.phase_out_intercept)?;
        rate_in_range("reform phase-out slope", r.phase_out_slope)?;
        if r.exemption_limit >= r.phase_out_limit {
            return Err(RulesError::ReformThresholdsOutOfOrder {
                exemption_limit: r.exemption_limit,
                phase_out_limit: r.phase_out_limit,
            });
        }

        Ok(())
    }
}

impl Default for WithholdingRules {
    fn default() -> Self {
        Self::statutory()
    }
}

fn validate_table(
    table: &'static str,
    brackets: &BracketTable,
) -> Result<(), RulesError> {
    if brackets.brackets.is_empty() {
        return Err(RulesError::EmptyTable { table });
    }

    let mut previous = Decimal::ZERO;
    for (index, bracket) in brackets.brackets.iter().enumerate() {
        if bracket.upper_bound <= previous {
            return Err(RulesError::NonIncreasingBound {
                table,
                index,
                bound: bracket.upper_bound,
            });
        }
        rate_in_range(table, bracket.rate)?;
        previous = bracket.upper_bound;
    }

    if let Overflow::Marginal(rate) = brackets.overflow {
        rate_in_range(table, rate)?;
    }

    Ok(())
}

fn rate_in_range(
    table: &'static str,
    rate: Decimal,
) -> Result<(), RulesError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(RulesError::InvalidRate { table, rate });
    }
    Ok(())
}

fn amount_in_range(
    field: &'static str,
    value: Decimal,
) -> Result<(), RulesError> {
    if value < Decimal::ZERO {
        return Err(RulesError::NegativeAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(RulesError::AmountOutOfRange {
            field,
            value,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}
