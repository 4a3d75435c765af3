mod calculation_input;
mod calculation_result;
mod comparison;
mod regime;
mod tax_bracket;
mod withholding_rules;

pub use calculation_input::{CalculationError, CalculationInput, MAX_AMOUNT};
pub use calculation_result::CalculationResult;
pub use comparison::{
    MONTHS_PER_YEAR, MethodComparison, MethodTrend, PRACTICALLY_EQUAL_THRESHOLD, RegimeTrend,
};
pub use regime::{FilingMethod, Regime};
pub use tax_bracket::{BracketTable, Overflow, TaxBracket};
pub use withholding_rules::{DeductionRules, ReformRules, RulesError, WithholdingRules};
