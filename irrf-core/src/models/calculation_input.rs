use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest monthly amount accepted for any input field.
///
/// Keeps every intermediate product of the calculation well inside
/// `Decimal`'s range, so the arithmetic cannot overflow.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// Errors raised by the withholding calculators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A monetary input or rate is negative.
    #[error("invalid input: {field} must be non-negative, got {value}")]
    InvalidInput { field: &'static str, value: Decimal },

    /// A monetary input or rate exceeds its upper limit.
    #[error("invalid input: {field} must not exceed {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },
}

/// Monthly paycheck figures a scenario is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Gross monthly salary.
    pub gross_salary: Decimal,

    /// Private pension contribution (FUNCEF, PGBL...), deducted from the base.
    pub pension_contribution: Decimal,

    /// Health-plan expense. Only used by the itemized method.
    #[serde(default)]
    pub health_expense: Decimal,

    /// Number of dependents. Only used by the itemized method.
    #[serde(default)]
    pub dependents: u32,
}

impl CalculationInput {
    /// Builds a validated input with no health expense and no dependents.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] if either amount is negative.
    pub fn new(
        gross_salary: Decimal,
        pension_contribution: Decimal,
    ) -> Result<Self, CalculationError> {
        let input = Self {
            gross_salary,
            pension_contribution,
            health_expense: Decimal::ZERO,
            dependents: 0,
        };
        input.validate()?;
        Ok(input)
    }

    /// Builds a validated input whose pension contribution is a fraction of
    /// the gross salary.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if the salary is out of range or the rate
    /// lies outside [0, 1].
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use irrf_core::CalculationInput;
    ///
    /// let input = CalculationInput::with_pension_rate(dec!(9000), dec!(0.12)).unwrap();
    ///
    /// assert_eq!(input.pension_contribution, dec!(1080));
    /// ```
    pub fn with_pension_rate(
        gross_salary: Decimal,
        pension_rate: Decimal,
    ) -> Result<Self, CalculationError> {
        in_range("gross salary", gross_salary, MAX_AMOUNT)?;
        in_range("pension rate", pension_rate, Decimal::ONE)?;
        Self::new(gross_salary, gross_salary * pension_rate)
    }

    pub fn with_health_expense(
        mut self,
        health_expense: Decimal,
    ) -> Result<Self, CalculationError> {
        self.health_expense = health_expense;
        self.validate()?;
        Ok(self)
    }

    pub fn with_dependents(
        mut self,
        dependents: u32,
    ) -> Self {
        self.dependents = dependents;
        self
    }

    /// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
    ///
    /// Fields are public, so calculators call this again before computing.
    pub fn validate(&self) -> Result<(), CalculationError> {
        in_range("gross salary", self.gross_salary, MAX_AMOUNT)?;
        in_range("pension contribution", self.pension_contribution, MAX_AMOUNT)?;
        in_range("health expense", self.health_expense, MAX_AMOUNT)?;
        Ok(())
    }
}

fn in_range(
    field: &'static str,
    value: Decimal,
    max: Decimal,
) -> Result<(), CalculationError> {
    if value < Decimal::ZERO {
        return Err(CalculationError::InvalidInput { field, value });
    }
    if value > max {
        return Err(CalculationError::OutOfRange { field, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_defaults_optional_fields_to_zero() {
        let input = CalculationInput::new(dec!(4161.00), dec!(499.32)).unwrap();

        assert_eq!(input.health_expense, Decimal::ZERO);
        assert_eq!(input.dependents, 0);
    }

    #[test]
    fn new_rejects_negative_salary() {
        let result = CalculationInput::new(dec!(-1.00), dec!(0));

        assert_eq!(
            result,
            Err(CalculationError::InvalidInput {
                field: "gross salary",
                value: dec!(-1.00),
            })
        );
    }

    #[test]
    fn new_rejects_negative_pension() {
        let result = CalculationInput::new(dec!(3000), dec!(-10));

        assert_eq!(
            result,
            Err(CalculationError::InvalidInput {
                field: "pension contribution",
                value: dec!(-10),
            })
        );
    }

    #[test]
    fn with_health_expense_rejects_negative_amount() {
        let result = CalculationInput::new(dec!(3000), dec!(0))
            .unwrap()
            .with_health_expense(dec!(-0.01));

        assert_eq!(
            result,
            Err(CalculationError::InvalidInput {
                field: "health expense",
                value: dec!(-0.01),
            })
        );
    }

    #[test]
    fn amount_at_limit_is_accepted() {
        let input = CalculationInput::new(MAX_AMOUNT, MAX_AMOUNT)
            .unwrap()
            .with_health_expense(MAX_AMOUNT);

        assert!(input.is_ok());
    }

    #[test]
    fn amount_above_limit_is_rejected() {
        let result = CalculationInput::new(dec!(0), Decimal::MAX);

        assert_eq!(
            result,
            Err(CalculationError::OutOfRange {
                field: "pension contribution",
                value: Decimal::MAX,
                max: MAX_AMOUNT,
            })
        );
    }

    #[test]
    fn health_expense_above_limit_is_rejected() {
        let result = CalculationInput::new(dec!(0), dec!(0))
            .unwrap()
            .with_health_expense(MAX_AMOUNT + dec!(0.01));

        assert!(matches!(
            result,
            Err(CalculationError::OutOfRange {
                field: "health expense",
                ..
            })
        ));
    }

    // =========================================================================
    // with_pension_rate tests
    // =========================================================================

    #[test]
    fn pension_rate_is_applied_to_gross() {
        let input = CalculationInput::with_pension_rate(dec!(9000.00), dec!(0.12)).unwrap();

        assert_eq!(input.pension_contribution, dec!(1080.00));
        assert_eq!(input.health_expense, Decimal::ZERO);
    }

    #[test]
    fn pension_rate_above_one_is_rejected() {
        let result = CalculationInput::with_pension_rate(dec!(9000), dec!(1.5));

        assert_eq!(
            result,
            Err(CalculationError::OutOfRange {
                field: "pension rate",
                value: dec!(1.5),
                max: Decimal::ONE,
            })
        );
    }

    #[test]
    fn pension_rate_with_huge_gross_does_not_overflow() {
        let result = CalculationInput::with_pension_rate(Decimal::MAX, dec!(0.5));

        assert!(matches!(
            result,
            Err(CalculationError::OutOfRange {
                field: "gross salary",
                ..
            })
        ));
    }

    #[test]
    fn zero_amounts_are_accepted() {
        let input = CalculationInput::new(dec!(0), dec!(0))
            .unwrap()
            .with_health_expense(dec!(0))
            .unwrap()
            .with_dependents(3);

        assert_eq!(input.dependents, 3);
    }
}
