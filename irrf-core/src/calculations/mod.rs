//! Withholding calculations: bracket engine, reform rebate and the four
//! regime × filing-method scenarios built on them.

pub mod brackets;
pub mod common;
pub mod reform;
pub mod scenarios;

pub use brackets::{contribution, progressive_tax};
pub use reform::reform_rebate;
pub use scenarios::{
    WithholdingCalculator, calculate_itemized_2025, calculate_itemized_2026,
    calculate_simplified_2025, calculate_simplified_2026,
};
