//! Progressive bracket arithmetic.
//!
//! Both the INSS contribution and the monthly income tax are computed by the
//! same cumulative walk over a [`BracketTable`]: each tier contributes
//! `(min(amount, upper) - lower) * rate` for as long as the amount exceeds
//! its lower bound. The tables differ only in what happens above the last
//! bound, which [`Overflow`] describes.
//!
//! | Table        | Tiers (upper bound, rate)                                             | Above last bound |
//! |--------------|-----------------------------------------------------------------------|------------------|
//! | Contribution | 1412.00 @ 7.5%, 2666.68 @ 9%, 4000.03 @ 12%, 7786.02 @ 14%            | capped           |
//! | Income tax   | 2259.20 @ 0%, 2826.65 @ 7.5%, 3751.05 @ 15%, 4664.68 @ 22.5%          | 27.5%            |

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{floor_at_zero, min};
use crate::{BracketTable, Overflow, WithholdingRules};

/// Accumulates `amount` across the tiers of `table`.
///
/// Amounts at or below zero accrue nothing.
///
/// ```
/// use rust_decimal_macros::dec;
/// use irrf_core::{BracketTable, Overflow, TaxBracket};
/// use irrf_core::calculations::brackets::tiered_amount;
///
/// let table = BracketTable::new(
///     vec![
///         TaxBracket::new(dec!(1000), dec!(0.10)),
///         TaxBracket::new(dec!(2000), dec!(0.20)),
///     ],
///     Overflow::Capped,
/// );
///
/// assert_eq!(tiered_amount(&table, dec!(1500)), dec!(200));
/// assert_eq!(tiered_amount(&table, dec!(9000)), dec!(300));
/// ```
pub fn tiered_amount(
    table: &BracketTable,
    amount: Decimal,
) -> Decimal {
    let mut total = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in &table.brackets {
        if amount <= lower {
            return total;
        }
        total += (min(amount, bracket.upper_bound) - lower) * bracket.rate;
        lower = bracket.upper_bound;
    }

    if let Overflow::Marginal(rate) = table.overflow {
        if amount > lower {
            total += (amount - lower) * rate;
        }
    }

    total
}

/// Social-security (INSS) contribution withheld from a gross salary.
///
/// Salaries above the table's top bound pay the same contribution as the
/// top bound itself.
///
/// ```
/// use rust_decimal_macros::dec;
/// use irrf_core::{WithholdingRules, contribution};
///
/// let rules = WithholdingRules::statutory();
///
/// assert_eq!(contribution(&rules, dec!(1000.00)), dec!(75.00));
/// assert_eq!(contribution(&rules, dec!(4161.00)), dec!(401.359));
/// assert_eq!(contribution(&rules, dec!(20000.00)), dec!(908.8618));
/// ```
pub fn contribution(
    rules: &WithholdingRules,
    gross_salary: Decimal,
) -> Decimal {
    let amount = tiered_amount(&rules.contribution, gross_salary);
    debug!(gross_salary = %gross_salary, contribution = %amount, "computed INSS contribution");
    amount
}

/// Monthly income tax on a taxable base, before any reform rebate.
///
/// A negative base is clamped to zero and taxed as such.
///
/// ```
/// use rust_decimal_macros::dec;
/// use irrf_core::{WithholdingRules, progressive_tax};
///
/// let rules = WithholdingRules::statutory();
///
/// assert_eq!(progressive_tax(&rules, dec!(2259.20)), dec!(0));
/// assert_eq!(progressive_tax(&rules, dec!(3114.691)), dec!(85.7649));
/// ```
pub fn progressive_tax(
    rules: &WithholdingRules,
    taxable_base: Decimal,
) -> Decimal {
    if taxable_base < Decimal::ZERO {
        warn!(taxable_base = %taxable_base, "negative taxable base clamped to zero");
    }
    let base = floor_at_zero(taxable_base);
    let tax = tiered_amount(&rules.income_tax, base);
    debug!(taxable_base = %base, tax = %tax, "computed progressive income tax");
    tax
}
