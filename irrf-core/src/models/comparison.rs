use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{CalculationResult, FilingMethod, Regime};

/// Differences smaller than this are reported as a tie.
pub const PRACTICALLY_EQUAL_THRESHOLD: Decimal = dec!(0.01);

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Itemized vs simplified under one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodComparison {
    pub regime: Regime,
    pub itemized: CalculationResult,
    pub simplified: CalculationResult,

    /// Itemized final tax minus simplified final tax.
    pub difference: Decimal,

    /// Method with the lower final tax, `None` when practically equal.
    pub cheaper: Option<FilingMethod>,

    /// Absolute monthly difference between the two methods.
    pub monthly_saving: Decimal,

    pub annual_saving: Decimal,
}

impl MethodComparison {
    pub fn new(
        itemized: CalculationResult,
        simplified: CalculationResult,
    ) -> Self {
        let difference = itemized.final_tax - simplified.final_tax;
        let cheaper = if difference.abs() < PRACTICALLY_EQUAL_THRESHOLD {
            None
        } else if difference > Decimal::ZERO {
            Some(FilingMethod::Simplified)
        } else {
            Some(FilingMethod::Itemized)
        };
        let monthly_saving = difference.abs();

        Self {
            regime: itemized.regime,
            itemized,
            simplified,
            difference,
            cheaper,
            monthly_saving,
            annual_saving: monthly_saving * MONTHS_PER_YEAR,
        }
    }
}

/// Final tax of one filing method before and after the reform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTrend {
    pub method: FilingMethod,
    pub before: CalculationResult,
    pub after: CalculationResult,

    /// 2025 final tax minus 2026 final tax. Never negative.
    pub monthly_saving: Decimal,

    pub annual_saving: Decimal,
}

impl MethodTrend {
    pub fn new(
        before: CalculationResult,
        after: CalculationResult,
    ) -> Self {
        let monthly_saving = before.final_tax - after.final_tax;
        Self {
            method: before.method,
            before,
            after,
            monthly_saving,
            annual_saving: monthly_saving * MONTHS_PER_YEAR,
        }
    }
}

/// Year-over-year impact of the reform for both filing methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeTrend {
    pub itemized: MethodTrend,
    pub simplified: MethodTrend,
}
