use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single tier of a progressive table: everything up to `upper_bound`
/// (and above the previous tier's bound) is charged at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn new(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { upper_bound, rate }
    }
}

/// What happens to the part of an amount that lies above the last bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "rate")]
pub enum Overflow {
    /// Nothing more accrues once the last bound is passed (INSS ceiling).
    Capped,
    /// The excess is charged at this rate without limit.
    Marginal(Decimal),
}

/// Ordered bracket table shared by the contribution and income-tax walks.
///
/// Brackets must be sorted by strictly increasing `upper_bound`; the lower
/// bound of the first bracket is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    pub brackets: Vec<TaxBracket>,
    pub overflow: Overflow,
}

impl BracketTable {
    pub fn new(
        brackets: Vec<TaxBracket>,
        overflow: Overflow,
    ) -> Self {
        Self { brackets, overflow }
    }

    /// Upper bound of the last bracket, or zero for an empty table.
    pub fn top_bound(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.upper_bound)
            .unwrap_or(Decimal::ZERO)
    }
}
