//! The 2026 reform rebate.
//!
//! Bases up to the exemption limit get their whole tax waived, bounded by the
//! maximum rebate. Between the exemption and phase-out limits the rebate
//! decays linearly; above the phase-out limit nothing is waived. The rebate
//! never exceeds the tax it is applied to.

use rust_decimal::Decimal;
use tracing::debug;

use crate::WithholdingRules;
use crate::calculations::common::{floor_at_zero, min};

/// Rebate to subtract from `computed_tax` under the 2026 rules.
///
/// ```
/// use rust_decimal_macros::dec;
/// use irrf_core::{WithholdingRules, reform_rebate};
///
/// let rules = WithholdingRules::statutory();
///
/// assert_eq!(reform_rebate(&rules, dec!(4000), dec!(200)), dec!(200));
/// assert_eq!(reform_rebate(&rules, dec!(6000), dec!(753.9985)), dec!(156.44));
/// assert_eq!(reform_rebate(&rules, dec!(8000), dec!(1303.9985)), dec!(0));
/// ```
pub fn reform_rebate(
    rules: &WithholdingRules,
    taxable_base: Decimal,
    computed_tax: Decimal,
) -> Decimal {
    let reform = &rules.reform;
    let tax = floor_at_zero(computed_tax);

    let rebate = if taxable_base <= reform.exemption_limit {
        min(reform.max_rebate, tax)
    } else if taxable_base <= reform.phase_out_limit {
        let phased = reform.phase_out_intercept - reform.phase_out_slope * taxable_base;
        min(floor_at_zero(phased), tax)
    } else {
        Decimal::ZERO
    };

    debug!(taxable_base = %taxable_base, computed_tax = %computed_tax, rebate = %rebate, "computed reform rebate");
    rebate
}
