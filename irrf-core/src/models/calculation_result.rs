use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FilingMethod, Regime};
use crate::calculations::common::round_half_up;

/// Every intermediate and final amount of one scenario calculation.
///
/// Amounts are exact; call [`CalculationResult::rounded`] for a view
/// rounded to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub regime: Regime,
    pub method: FilingMethod,

    pub gross_salary: Decimal,

    /// Social-security (INSS) contribution withheld from the gross salary.
    pub contribution: Decimal,

    pub pension_contribution: Decimal,

    /// Gross salary minus contribution and pension.
    pub calculation_base: Decimal,

    /// Legal deductions (itemized) or the simplified discount.
    pub deduction: Decimal,

    /// Calculation base minus `deduction`. May be negative; the tax on a
    /// negative base is zero.
    pub taxable_base: Decimal,

    /// Tax from the progressive table, before any rebate.
    pub computed_tax: Decimal,

    /// Reform rebate. Always zero for 2025.
    pub rebate: Decimal,

    /// `computed_tax - rebate`.
    pub final_tax: Decimal,
}

impl CalculationResult {
    /// Copy with every amount rounded half-up to two decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            regime: self.regime,
            method: self.method,
            gross_salary: round_half_up(self.gross_salary),
            contribution: round_half_up(self.contribution),
            pension_contribution: round_half_up(self.pension_contribution),
            calculation_base: round_half_up(self.calculation_base),
            deduction: round_half_up(self.deduction),
            taxable_base: round_half_up(self.taxable_base),
            computed_tax: round_half_up(self.computed_tax),
            rebate: round_half_up(self.rebate),
            final_tax: round_half_up(self.final_tax),
        }
    }
}
