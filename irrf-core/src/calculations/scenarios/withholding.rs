//! Monthly IRRF withholding under the 2025 and 2026 regimes.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | INSS contribution on the gross salary (capped table) |
//! | 2    | Calculation base: gross - contribution - pension |
//! | 3a   | Itemized: deduction = health expense + dependents × allowance |
//! | 3b   | Simplified: deduction = min(base × 20%, cap) |
//! | 4    | Taxable base: calculation base - deduction |
//! | 5    | Computed tax from the progressive table |
//! | 6    | 2026 only: reform rebate |
//! | 7    | Final tax: computed tax - rebate |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use irrf_core::{CalculationInput, FilingMethod, Regime, WithholdingCalculator};
//!
//! let input = CalculationInput::new(dec!(4161.00), dec!(499.32))
//!     .unwrap()
//!     .with_health_expense(dec!(145.63))
//!     .unwrap();
//!
//! let calculator = WithholdingCalculator::default();
//! let result = calculator
//!     .calculate(&input, Regime::Y2025, FilingMethod::Itemized)
//!     .unwrap();
//!
//! assert_eq!(result.taxable_base, dec!(3114.691));
//! assert_eq!(result.rounded().final_tax, dec!(85.76));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::{contribution, progressive_tax};
use crate::calculations::common::{floor_at_zero, min};
use crate::calculations::reform::reform_rebate;
use crate::{
    CalculationError, CalculationInput, CalculationResult, FilingMethod, MethodComparison,
    MethodTrend, Regime, RegimeTrend, RulesError, WithholdingRules,
};

/// Calculator for every regime and filing method over one set of law tables.
#[derive(Debug, Clone)]
pub struct WithholdingCalculator {
    rules: WithholdingRules,
}

impl WithholdingCalculator {
    /// Creates a calculator over the given law tables.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if the tables fail [`WithholdingRules::validate`].
    pub fn new(rules: WithholdingRules) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &WithholdingRules {
        &self.rules
    }

    /// Runs one scenario and returns every intermediate amount.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] for negative amounts and
    /// [`CalculationError::OutOfRange`] for amounts above
    /// [`MAX_AMOUNT`](crate::MAX_AMOUNT).
    pub fn calculate(
        &self,
        input: &CalculationInput,
        regime: Regime,
        method: FilingMethod,
    ) -> Result<CalculationResult, CalculationError> {
        input.validate()?;

        // Steps 1-2
        let contribution = contribution(&self.rules, input.gross_salary);
        let calculation_base = input.gross_salary - contribution - input.pension_contribution;

        // Step 3
        let deduction = match method {
            FilingMethod::Itemized => self.itemized_deduction(input),
            FilingMethod::Simplified => self.simplified_discount(calculation_base),
        };

        // Steps 4-5
        let taxable_base = calculation_base - deduction;
        let computed_tax = progressive_tax(&self.rules, taxable_base);

        // Steps 6-7
        let rebate = if regime.applies_reform() {
            reform_rebate(&self.rules, taxable_base, computed_tax)
        } else {
            Decimal::ZERO
        };
        let final_tax = computed_tax - rebate;

        debug!(
            regime = %regime,
            method = %method,
            taxable_base = %taxable_base,
            final_tax = %final_tax,
            "withholding calculated"
        );

        Ok(CalculationResult {
            regime,
            method,
            gross_salary: input.gross_salary,
            contribution,
            pension_contribution: input.pension_contribution,
            calculation_base,
            deduction,
            taxable_base,
            computed_tax,
            rebate,
            final_tax,
        })
    }

    /// Itemized against simplified under one regime.
    pub fn compare(
        &self,
        input: &CalculationInput,
        regime: Regime,
    ) -> Result<MethodComparison, CalculationError> {
        let itemized = self.calculate(input, regime, FilingMethod::Itemized)?;
        let simplified = self.calculate(input, regime, FilingMethod::Simplified)?;
        Ok(MethodComparison::new(itemized, simplified))
    }

    /// 2025 against 2026 for both filing methods.
    pub fn trend(
        &self,
        input: &CalculationInput,
    ) -> Result<RegimeTrend, CalculationError> {
        let trend_for = |method| -> Result<MethodTrend, CalculationError> {
            Ok(MethodTrend::new(
                self.calculate(input, Regime::Y2025, method)?,
                self.calculate(input, Regime::Y2026, method)?,
            ))
        };

        Ok(RegimeTrend {
            itemized: trend_for(FilingMethod::Itemized)?,
            simplified: trend_for(FilingMethod::Simplified)?,
        })
    }

    /// Health expense plus the per-dependent allowance.
    fn itemized_deduction(
        &self,
        input: &CalculationInput,
    ) -> Decimal {
        input.health_expense
            + Decimal::from(input.dependents) * self.rules.deductions.dependent_allowance
    }

    /// Flat percentage of the calculation base, capped. A negative base
    /// yields no discount.
    fn simplified_discount(
        &self,
        calculation_base: Decimal,
    ) -> Decimal {
        let deductions = &self.rules.deductions;
        min(
            floor_at_zero(calculation_base * deductions.simplified_rate),
            deductions.simplified_cap,
        )
    }
}

impl Default for WithholdingCalculator {
    /// Calculator over [`WithholdingRules::statutory`].
    fn default() -> Self {
        Self {
            rules: WithholdingRules::statutory(),
        }
    }
}

/// 2025 withholding, itemized deductions.
pub fn calculate_itemized_2025(
    input: &CalculationInput
) -> Result<CalculationResult, CalculationError> {
    WithholdingCalculator::default().calculate(input, Regime::Y2025, FilingMethod::Itemized)
}

/// 2025 withholding, simplified discount.
pub fn calculate_simplified_2025(
    input: &CalculationInput
) -> Result<CalculationResult, CalculationError> {
    WithholdingCalculator::default().calculate(input, Regime::Y2025, FilingMethod::Simplified)
}

/// 2026 withholding, itemized deductions, reform rebate applied.
pub fn calculate_itemized_2026(
    input: &CalculationInput
) -> Result<CalculationResult, CalculationError> {
    WithholdingCalculator::default().calculate(input, Regime::Y2026, FilingMethod::Itemized)
}

/// 2026 withholding, simplified discount, reform rebate applied.
pub fn calculate_simplified_2026(
    input: &CalculationInput
) -> Result<CalculationResult, CalculationError> {
    WithholdingCalculator::default().calculate(input, Regime::Y2026, FilingMethod::Simplified)
}
